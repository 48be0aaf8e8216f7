//! Prometheus metrics for the tick collector.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. Registration only fails on a
//! duplicate metric name, which is a programming error caught on first use.

use crate::error::TelemetryResult;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

/// Total messages delivered by the live feed.
pub static MESSAGES_RECEIVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "tickstream_messages_received_total",
        "Total messages delivered by the live feed"
    )
    .unwrap()
});

/// Total entries handed to the record sink.
/// Labels: ticker
pub static ENTRIES_STORED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "tickstream_entries_stored_total",
        "Total price entries stored",
        &["ticker"]
    )
    .unwrap()
});

/// Total messages that failed normalization or storage.
/// Labels: reason (normalize/store)
pub static MESSAGES_REJECTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "tickstream_messages_rejected_total",
        "Total messages rejected",
        &["reason"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    pub fn message_received() {
        MESSAGES_RECEIVED_TOTAL.inc();
    }

    pub fn entry_stored(ticker: &str) {
        ENTRIES_STORED_TOTAL.with_label_values(&[ticker]).inc();
    }

    pub fn message_rejected(reason: &str) {
        MESSAGES_REJECTED_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn messages_received() -> u64 {
        MESSAGES_RECEIVED_TOTAL.get()
    }

    pub fn entries_stored(ticker: &str) -> u64 {
        ENTRIES_STORED_TOTAL.with_label_values(&[ticker]).get()
    }

    pub fn messages_rejected(reason: &str) -> u64 {
        MESSAGES_REJECTED_TOTAL.with_label_values(&[reason]).get()
    }

    /// Render the default registry in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
