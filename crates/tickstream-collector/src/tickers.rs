//! Ticker file loading.

use crate::error::{CollectorError, CollectorResult};
use std::path::Path;
use tickstream_core::TickerList;
use tracing::info;

/// Read a newline-delimited ticker file.
///
/// Lines are trimmed and blank lines skipped; order is preserved.
pub fn read_tickers(path: impl AsRef<Path>) -> CollectorResult<TickerList> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CollectorError::Tickers {
        path: path.to_path_buf(),
        source,
    })?;

    let tickers = TickerList::parse(&text);
    info!(path = %path.display(), count = tickers.len(), "Loaded tickers");
    Ok(tickers)
}
