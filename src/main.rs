use clap::Parser;
use models::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod campaign;
mod cli;
mod config;
mod email_gen;
mod email_sender;
mod errors;
mod fetcher;
mod insight_engine;
mod models;
mod prospects;
mod site_analyzer;

use config::{load_config, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = cli::Args::parse();

    // Setup logging before anything that may want to log (config load warns
    // when falling back to defaults).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("prospect_mailer=info".parse().unwrap()),
        )
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load configuration
    let config = match load_config(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", args.config, e);
            Config::default()
        }
    };

    tokio::fs::create_dir_all(&config.output.directory).await?;

    cli::run(args, config).await
}
