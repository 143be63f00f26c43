use anyhow::{Context, Result};
use clap::Parser;
use packngo::application::{Cli, CommandExecutor};
use packngo::shared::config::ConfigLoader;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.config {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file given, using built-in defaults"),
    }

    CommandExecutor::execute(cli.command, config, cli.json).await?;
    Ok(())
}
