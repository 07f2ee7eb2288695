use crate::prelude::*;
use clap::Parser;

mod analyze;
mod error;
mod format;
mod input;
mod loading;
mod prelude;
mod render;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Score Explore-stage sales calls against the funneling technique"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "FUNNELCOACH_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Send a transcript to the analysis backend and display the report
    Analyze(crate::analyze::AnalyzeOptions),

    /// Format an analysis report that is already on disk
    Format(crate::format::FormatOptions),

    /// Run the analysis backend on top of a local Ollama model
    Serve(crate::serve::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Analyze(options) => crate::analyze::run(options, app.global).await,
        SubCommands::Format(options) => crate::format::run(options, app.global).await,
        SubCommands::Serve(options) => crate::serve::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
