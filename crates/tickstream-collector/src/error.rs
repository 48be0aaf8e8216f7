//! Collector error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read tickers file {path}: {source}")]
    Tickers {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed error: {0}")]
    Feed(#[from] tickstream_feed::FeedError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] tickstream_persistence::PersistenceError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] tickstream_telemetry::TelemetryError),

    #[error("Core error: {0}")]
    Core(#[from] tickstream_core::CoreError),
}

pub type CollectorResult<T> = Result<T, CollectorError>;
