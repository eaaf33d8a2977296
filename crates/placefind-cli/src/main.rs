mod browser;
mod render;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use placefind_core::AppConfig;
use placefind_orchestrator::{OrchestrationResult, RequestOrchestrator};
use placefind_wiki::Resolver;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placefind")]
#[command(version)]
#[command(about = "Look up a place in Wikipedia and get a Google Maps link")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Open the article and map links in the default web browser
    #[arg(long, global = true)]
    open: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a typed place name
    Search {
        /// Place name; multiple words are joined with spaces
        place: Vec<String>,
    },
    /// Speak a place name into the default microphone
    Listen,
    /// Show program information and usage help
    About,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = placefind_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let spoken = matches!(cli.command, Commands::Listen);
    let result = match cli.command {
        Commands::About => {
            println!("{}", render::about_text());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Search { place } => {
            let orchestrator = RequestOrchestrator::text_only(Resolver::from_config(&config)?);
            orchestrator.handle_text_query(&place.join(" ")).await
        }
        Commands::Listen => {
            if !cli.json {
                eprintln!("Listening for a place name...");
            }
            listen(&config).await?
        }
    };

    let exit = render::report(&result, cli.json, spoken)?;
    if cli.open {
        if let Ok(resolution) = &result {
            browser::open_links(resolution);
        }
    }
    Ok(exit)
}

#[cfg(feature = "microphone")]
async fn listen(config: &AppConfig) -> anyhow::Result<OrchestrationResult> {
    use placefind_voice::{CpalMicrophone, VoiceInputAdapter};

    let voice = VoiceInputAdapter::from_config(CpalMicrophone, config)?;
    let orchestrator =
        RequestOrchestrator::new(Resolver::from_config(config)?, voice, config.voice_timeout());
    Ok(orchestrator.handle_voice_query().await)
}

#[cfg(not(feature = "microphone"))]
#[allow(clippy::unused_async)]
async fn listen(_config: &AppConfig) -> anyhow::Result<OrchestrationResult> {
    anyhow::bail!(
        "placefind was built without microphone support; rebuild with `--features microphone`"
    )
}
