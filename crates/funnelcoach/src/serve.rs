use std::sync::Arc;

use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use funnelcoach_core::analysis::{
    classify_model_reply, validate_request, AnalyzeRequest, AnalyzeResponse, ModelReply,
};
use funnelcoach_core::prompt::build_prompt;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::ollama;
use tower_http::cors::{Any, CorsLayer};

const SYSTEM_PREAMBLE: &str = "\
You are a revenue-enablement coach reviewing sales-call transcripts.

Rules:
- Follow the output format in the instructions exactly. Plain text only.
- When the instructions ask for a fixed reply such as NEED_SPEAKER_ROLES, DATA_NOT_REDACTED or UNSUPPORTED_INPUT, reply with it and nothing else.
- Quote the sales rep's own words. Never invent dialogue.";

#[derive(Debug, clap::Args, Clone)]
pub struct ServeOptions {
    /// Host to bind to
    #[clap(long, env = "FUNNELCOACH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[clap(long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Ollama base URL
    #[clap(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Model used to score transcripts
    #[clap(long, env = "FUNNELCOACH_MODEL", default_value = "llama3.1")]
    model: String,
}

struct Backend {
    client: ollama::Client,
    model: String,
    verbose: bool,
}

fn create_client(ollama_url: &str) -> Result<ollama::Client> {
    use rig::client::Nothing;

    ollama::Client::builder()
        .api_key(Nothing)
        .base_url(ollama_url)
        .build()
        .map_err(|e| eyre!("Failed to create Ollama client: {}", e))
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    let backend = Arc::new(Backend {
        client: create_client(&options.ollama_url)?,
        model: options.model.clone(),
        verbose: global.verbose,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app_router = Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(backend);

    if global.verbose {
        eprintln!("Ollama URL: {}", options.ollama_url);
        eprintln!("Model: {}", options.model);
        eprintln!("Analysis endpoint: http://{}/analyze", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("listening on http://{}", addr);

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn analyze_handler(
    State(backend): State<Arc<Backend>>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    if let Err(rejection) = validate_request(&request) {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnalyzeResponse::error(rejection.to_string())),
        );
    }

    let prompt = build_prompt(&request);

    if backend.verbose {
        eprintln!("Prompt length: {} chars", prompt.len());
    }

    let agent = backend
        .client
        .agent(&backend.model)
        .preamble(SYSTEM_PREAMBLE)
        .temperature(0.0)
        .build();

    let reply = agent.prompt(&prompt).await.map_err(|e| e.to_string());
    let (status, body) = respond(reply);

    (status, Json(body))
}

/// Map a model call to the response the client expects.
fn respond(reply: std::result::Result<String, String>) -> (StatusCode, AnalyzeResponse) {
    let text = match reply {
        Ok(text) => text,
        Err(e) => {
            log::error!("model call failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                AnalyzeResponse::error(format!(
                    "An error occurred processing your request: {}",
                    e
                )),
            );
        }
    };

    let reply = classify_model_reply(&text);
    let status = match &reply {
        ModelReply::Empty => StatusCode::INTERNAL_SERVER_ERROR,
        ModelReply::Flagged(sentinel, _) => {
            log::info!("model flagged the transcript: {}", sentinel.token());
            StatusCode::OK
        }
        ModelReply::Report(_) => StatusCode::OK,
    };

    (status, reply.into())
}
