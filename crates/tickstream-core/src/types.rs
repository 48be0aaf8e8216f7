//! Price tick and ticker list types.

use serde::{Deserialize, Serialize};

/// One normalized price tick, as handed to a record sink.
///
/// Only `time` differs from the feed message: it holds the rendered
/// wall-clock string instead of raw epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Ticker symbol.
    pub id: String,
    /// Last price.
    pub price: f64,
    /// Rendered timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub time: String,
    /// Absolute change from the start of the day.
    pub change: f64,
    /// Percent change from the start of the day.
    pub change_percent: f64,
}

/// Ordered, immutable list of ticker symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerList {
    symbols: Vec<String>,
}

impl TickerList {
    /// Build a list from newline-delimited text.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Each line is trimmed and
    /// blank lines are dropped. Symbol format is not validated and
    /// duplicates are kept.
    pub fn parse(text: &str) -> Self {
        Self {
            symbols: text
                .split(['\n', '\r'])
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.symbols.iter()
    }
}

impl From<Vec<String>> for TickerList {
    fn from(symbols: Vec<String>) -> Self {
        Self { symbols }
    }
}

impl<'a> IntoIterator for &'a TickerList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
