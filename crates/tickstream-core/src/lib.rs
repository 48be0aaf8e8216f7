//! Core domain types for tickstream.
//!
//! This crate provides the types shared by the feed, persistence and
//! collector crates:
//! - `PriceEntry`: one normalized price tick
//! - `TickerList`: the ordered symbol list a process subscribes to
//! - `time`: millisecond timestamp parsing and fixed-offset rendering

pub mod error;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use time::{
    format_epoch_millis, parse_epoch_millis, TimestampRenderer, DEFAULT_UTC_OFFSET_HOURS,
    TIMESTAMP_FORMAT,
};
pub use types::{PriceEntry, TickerList};
