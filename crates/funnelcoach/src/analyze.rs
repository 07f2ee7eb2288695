use std::time::Duration;

use crate::loading::LoadingIndicator;
use crate::prelude::{eprintln, println, *};
use crate::render::{render_analysis, OutputFormat};
use funnelcoach_core::analysis::{
    interpret_response, prepare_request, AnalyzeRequest, AnalyzeResponse, Outcome,
};
use funnelcoach_core::carousel::Carousel;

#[derive(Debug, clap::Args, Clone)]
pub struct AnalyzeOptions {
    /// Transcript file, or `-` to read it from stdin
    #[arg(short, long, env = "FUNNELCOACH_TRANSCRIPT", default_value = "-")]
    transcript: String,

    /// Sales rep name(s) as they appear in the transcript
    #[arg(short, long, env = "FUNNELCOACH_REPS", default_value = "")]
    reps: String,

    /// Base URL of the analysis backend
    #[arg(long, env = "FUNNELCOACH_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, env = "FUNNELCOACH_TIMEOUT", default_value = "120")]
    timeout: u64,

    /// How to display the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Seconds between tips while waiting
    #[arg(long, env = "FUNNELCOACH_SLIDE_INTERVAL", default_value = "7")]
    slide_interval: u64,
}

pub async fn run(options: AnalyzeOptions, global: crate::Global) -> Result<()> {
    let transcript = crate::input::read_text(&options.transcript).await?;
    let request = prepare_request(&transcript, &options.reps).map_err(Error::from)?;

    if global.verbose {
        eprintln!("Backend: {}", options.url);
        eprintln!("Sales rep(s): {}", request.sales_rep_names);
        eprintln!("Transcript length: {} chars", request.transcript.len());
    }

    let indicator = LoadingIndicator::start(
        Carousel::with_default_slides(),
        Duration::from_secs(options.slide_interval),
    );
    let exchange = send_request(&options.url, options.timeout, &request).await;
    indicator.stop();

    let (status, body) = exchange.map_err(|e| {
        log::error!("analysis request failed: {e:#}");
        Error::Transport(e.to_string())
    })?;

    let report = report_or_error(interpret_response(status, body), options.output)?;
    println!("{}", report);

    Ok(())
}

/// The rendered report, or the single error the user sees instead.
fn report_or_error(outcome: Outcome, output: OutputFormat) -> Result<String> {
    match outcome {
        Outcome::Report(text) => render_analysis(&text, output),
        Outcome::Flagged(text) => Err(Error::Flagged(text).into()),
        Outcome::BackendError(message) => Err(Error::Backend(message).into()),
        Outcome::Empty => Err(Error::EmptyAnalysis.into()),
    }
}

/// POST the request and return the status with the decoded body, if any.
async fn send_request(
    base_url: &str,
    timeout: u64,
    request: &AnalyzeRequest,
) -> Result<(u16, Option<AnalyzeResponse>)> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let response = client
        .post(analyze_url(base_url))
        .json(request)
        .send()
        .await
        .wrap_err("Failed to reach the analysis backend")?;

    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .wrap_err("Failed to read the analysis response")?;

    let body = match serde_json::from_slice::<AnalyzeResponse>(&bytes) {
        Ok(body) => Some(body),
        Err(e) => {
            log::debug!("response body is not valid JSON: {}", e);
            None
        }
    };

    Ok((status, body))
}

fn analyze_url(base_url: &str) -> String {
    format!("{}/analyze", base_url.trim_end_matches('/'))
}
