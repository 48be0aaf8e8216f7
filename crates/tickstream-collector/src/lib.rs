//! Live equity tick collector.
//!
//! Wires the pieces together:
//! - Ticker list loading
//! - Live feed subscription
//! - Message normalization
//! - Record persistence

pub mod collector;
pub mod config;
pub mod error;
pub mod tickers;

pub use collector::{DataCollector, TickHandler};
pub use config::{AppConfig, FeedConfig, PersistenceConfig, SinkBackend};
pub use error::{CollectorError, CollectorResult};
pub use tickers::read_tickers;
