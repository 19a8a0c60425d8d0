mod charts;
mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "umico-cli")]
#[command(about = "Umico store directory scraper and chart generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every store from the search API and save CSV and Excel files.
    Scrape,
    /// Read the saved CSV and render the analysis charts as PNG files.
    Charts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = umico_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Scrape) | None => scrape::run_scrape(&config).await,
        Some(Commands::Charts) => charts::run_charts(&config),
    }
}
