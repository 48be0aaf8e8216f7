//! Structured logging and Prometheus metrics for tickstream.
//!
//! - Logging is configured explicitly by the caller through `LoggingConfig`
//! - Counters track received, stored and rejected feed messages

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::Metrics;
