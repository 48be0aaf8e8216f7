//! Record sinks for normalized price ticks.
//!
//! A `RecordSink` stores one `PriceEntry` at a time. Provided sinks:
//! - `NoopSink`: discards everything (default)
//! - `MemorySink`: keeps entries in a shared buffer
//! - `JsonLinesSink`: appends entries to daily JSON Lines files

pub mod error;
pub mod sink;
pub mod writer;

pub use error::{PersistenceError, PersistenceResult};
pub use sink::{MemorySink, NoopSink, RecordSink};
pub use writer::JsonLinesSink;
