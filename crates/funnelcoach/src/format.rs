use crate::prelude::{eprintln, println, *};
use crate::render::{render_analysis, OutputFormat};

#[derive(Debug, clap::Args, Clone)]
pub struct FormatOptions {
    /// Report file, or `-` to read it from stdin
    #[clap(default_value = "-")]
    source: String,

    /// How to display the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

pub async fn run(options: FormatOptions, global: crate::Global) -> Result<()> {
    let text = crate::input::read_text(&options.source).await?;

    if global.verbose {
        eprintln!("Report length: {} chars", text.len());
    }

    println!("{}", render_analysis(&text, options.output)?);

    Ok(())
}
