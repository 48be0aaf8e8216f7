//! tickstream - Entry Point
//!
//! Streams live equity ticks for the configured ticker list, normalizes
//! each one and hands it to the configured record sink until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use tickstream_collector::{AppConfig, DataCollector};
use tickstream_telemetry::Metrics;
use tracing::{debug, error, info};

/// Live equity tick collector
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults to config/default.toml if present)
    #[arg(short, long, env = "TICKSTREAM_CONFIG")]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    tickstream_telemetry::init_logging(&config.logging)?;

    info!("Starting tickstream v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = args.config.as_deref().unwrap_or("<default>"),
        tickers_file = %config.tickers_file,
        feed_url = %config.feed.url,
        backend = ?config.persistence.backend,
        "Configuration loaded"
    );

    let mut collector = DataCollector::from_config(&config)?;
    collector.run(interrupt()).await?;

    match Metrics::render() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(e) => error!(?e, "Failed to render metrics"),
    }

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the process
/// runs until the feed ends.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
