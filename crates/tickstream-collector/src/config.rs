//! Application configuration.

use crate::error::{CollectorError, CollectorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tickstream_core::{TimestampRenderer, DEFAULT_UTC_OFFSET_HOURS};
use tickstream_feed::WsFeedConfig;
use tickstream_persistence::{JsonLinesSink, NoopSink, RecordSink};
use tickstream_telemetry::LoggingConfig;
use tracing::info;

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Record sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkBackend {
    /// Discard entries.
    #[default]
    Noop,
    /// Append entries to daily JSON Lines files.
    Jsonl,
}

/// Live feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// WebSocket URL of the price streamer.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Send a subscription request for the ticker list after connecting.
    #[serde(default = "default_subscribe")]
    pub subscribe: bool,
    /// Offset from UTC, in hours, used to render tick timestamps.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

fn default_feed_url() -> String {
    WsFeedConfig::default().url
}

fn default_subscribe() -> bool {
    true
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            subscribe: default_subscribe(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl From<FeedConfig> for WsFeedConfig {
    fn from(cfg: FeedConfig) -> Self {
        Self {
            url: cfg.url,
            subscribe: cfg.subscribe,
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: SinkBackend,
    /// Output directory for the `jsonl` backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Entries buffered before a flush (`jsonl` backend).
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_data_dir() -> String {
    "./data/ticks".to_string()
}

fn default_buffer_size() -> usize {
    100
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: SinkBackend::default(),
            data_dir: default_data_dir(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl PersistenceConfig {
    /// Build the configured sink.
    pub fn build_sink(&self) -> CollectorResult<Box<dyn RecordSink>> {
        info!(backend = ?self.backend, "Creating record sink");
        match self.backend {
            SinkBackend::Noop => Ok(Box::new(NoopSink)),
            SinkBackend::Jsonl => Ok(Box::new(JsonLinesSink::new(
                &self.data_dir,
                self.buffer_size,
            )?)),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Newline-delimited ticker symbol file.
    #[serde(default = "default_tickers_file")]
    pub tickers_file: String,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_tickers_file() -> String {
    "tickers.txt".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tickers_file: default_tickers_file(),
            feed: FeedConfig::default(),
            persistence: PersistenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/default.toml` if present, otherwise use defaults.
    pub fn load() -> CollectorResult<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> CollectorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CollectorError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| CollectorError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> CollectorResult<()> {
        if self.feed.url.trim().is_empty() {
            return Err(CollectorError::Config("feed.url must not be empty".to_string()));
        }
        if self.persistence.buffer_size == 0 {
            return Err(CollectorError::Config(
                "persistence.buffer_size must be at least 1".to_string(),
            ));
        }
        TimestampRenderer::new(self.feed.utc_offset_hours)?;
        Ok(())
    }

    /// Timestamp renderer for the configured offset.
    pub fn timestamp_renderer(&self) -> CollectorResult<TimestampRenderer> {
        Ok(TimestampRenderer::new(self.feed.utc_offset_hours)?)
    }
}
