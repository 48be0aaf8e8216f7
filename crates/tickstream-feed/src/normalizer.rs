//! Message normalization.
//!
//! Feed messages arrive as JSON objects:
//! `{"id": "AAPL", "price": 227.5, "time": "1756386138000", "change": 1.2,
//! "change_percent": 0.53}`. The normalizer maps them field-for-field onto
//! `PriceEntry`, rendering `time` as a wall-clock string. Extra keys are
//! ignored.

use crate::error::{FeedError, FeedResult};
use crate::feed::RawMessage;
use serde_json::Value;
use tickstream_core::{PriceEntry, TimestampRenderer};

/// Converts raw feed messages into `PriceEntry` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageNormalizer {
    renderer: TimestampRenderer,
}

impl MessageNormalizer {
    pub fn new(renderer: TimestampRenderer) -> Self {
        Self { renderer }
    }

    /// Normalize one message.
    ///
    /// Fields are looked up in record order (`id`, `price`, `time`,
    /// `change`, `change_percent`); the first missing one is reported.
    pub fn normalize(&self, message: &RawMessage) -> FeedResult<PriceEntry> {
        let id = require_str(message, "id")?.to_string();
        let price = require_f64(message, "price")?;
        let time = self.render_time(require(message, "time")?)?;
        let change = require_f64(message, "change")?;
        let change_percent = require_f64(message, "change_percent")?;

        Ok(PriceEntry {
            id,
            price,
            time,
            change,
            change_percent,
        })
    }

    /// Render the `time` field. Integer millisecond strings are the feed's
    /// format; bare JSON integers are accepted too.
    fn render_time(&self, value: &Value) -> FeedResult<String> {
        match value {
            Value::String(raw) => Ok(self.renderer.convert(raw)?),
            Value::Number(n) => {
                let millis = n.as_i64().ok_or_else(|| FeedError::InvalidField {
                    field: "time",
                    reason: format!("{n} is not an integer"),
                })?;
                Ok(self.renderer.render(millis)?)
            }
            other => Err(FeedError::InvalidField {
                field: "time",
                reason: format!("expected integer string, got {}", type_name(other)),
            }),
        }
    }
}

fn require<'a>(message: &'a RawMessage, field: &'static str) -> FeedResult<&'a Value> {
    message.get(field).ok_or(FeedError::MissingField(field))
}

fn require_str<'a>(message: &'a RawMessage, field: &'static str) -> FeedResult<&'a str> {
    let value = require(message, field)?;
    value.as_str().ok_or_else(|| FeedError::InvalidField {
        field,
        reason: format!("expected string, got {}", type_name(value)),
    })
}

fn require_f64(message: &RawMessage, field: &'static str) -> FeedResult<f64> {
    let value = require(message, field)?;
    value.as_f64().ok_or_else(|| FeedError::InvalidField {
        field,
        reason: format!("expected number, got {}", type_name(value)),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
