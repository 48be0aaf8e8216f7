//! Feed timestamp handling.
//!
//! The upstream feed stamps every tick with a string holding integer
//! milliseconds since the Unix epoch. Stored records carry a wall-clock
//! string rendered in a fixed UTC offset (UTC-8 unless configured
//! otherwise). The offset never shifts for daylight saving, so the mapping
//! from input to output is a pure, monotonic function.

use crate::error::{CoreError, Result};
use chrono::{Datelike, FixedOffset, TimeZone};

/// Default render offset in hours relative to UTC.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -8;

/// Years representable by `TIMESTAMP_FORMAT` as four unsigned digits.
const RENDERABLE_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Render format for stored timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders feed millisecond timestamps in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampRenderer {
    /// Seconds east of UTC (negative for the Americas).
    offset_secs: i32,
}

impl TimestampRenderer {
    /// Create a renderer for a whole-hour offset from UTC (e.g. `-8`).
    pub fn new(utc_offset_hours: i32) -> Result<Self> {
        let offset_secs = utc_offset_hours
            .checked_mul(3600)
            .filter(|secs| FixedOffset::east_opt(*secs).is_some())
            .ok_or(CoreError::InvalidOffset(utc_offset_hours))?;
        Ok(Self { offset_secs })
    }

    /// Seconds east of UTC that timestamps are rendered in.
    pub fn offset_secs(&self) -> i32 {
        self.offset_secs
    }

    /// Render milliseconds since the epoch as `YYYY-MM-DD HH:MM:SS`.
    ///
    /// The sub-second remainder is dropped by flooring, so the output stays
    /// monotonic in `millis` for negative inputs as well. Instants whose
    /// local year falls outside 1..=9999 are out of range.
    pub fn render(&self, millis: i64) -> Result<String> {
        let offset = FixedOffset::east_opt(self.offset_secs)
            .ok_or(CoreError::InvalidOffset(self.offset_secs / 3600))?;
        let local = offset
            .timestamp_opt(millis.div_euclid(1000), 0)
            .single()
            .filter(|local| RENDERABLE_YEARS.contains(&local.year()))
            .ok_or(CoreError::TimestampOutOfRange(millis))?;
        Ok(local.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Parse a feed millisecond string and render it.
    pub fn convert(&self, raw: &str) -> Result<String> {
        self.render(parse_epoch_millis(raw)?)
    }
}

impl Default for TimestampRenderer {
    fn default() -> Self {
        Self {
            offset_secs: DEFAULT_UTC_OFFSET_HOURS * 3600,
        }
    }
}

/// Parse an integer millisecond string as sent by the feed.
///
/// Surrounding whitespace is tolerated; fractional or non-numeric
/// values are rejected.
pub fn parse_epoch_millis(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

/// Render milliseconds since the epoch in the default UTC-8 offset.
pub fn format_epoch_millis(millis: i64) -> Result<String> {
    TimestampRenderer::default().render(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_MS: i64 = 1_756_386_138_000;

    #[test]
    fn test_default_offset_is_utc_minus_8() {
        let renderer = TimestampRenderer::default();
        assert_eq!(renderer.offset_secs(), -8 * 3600);
        assert_eq!(renderer, TimestampRenderer::new(DEFAULT_UTC_OFFSET_HOURS).unwrap());
    }

    #[test]
    fn test_format_known_timestamp() {
        // 2025-08-28 13:02:18 UTC
        assert_eq!(format_epoch_millis(BASE_MS).unwrap(), "2025-08-28 05:02:18");
        assert_eq!(
            format_epoch_millis(BASE_MS + 1000).unwrap(),
            "2025-08-28 05:02:19"
        );
        assert_eq!(
            format_epoch_millis(BASE_MS + 60_000).unwrap(),
            "2025-08-28 05:03:18"
        );
    }

    #[test]
    fn test_format_known_timestamp_utc_minus_7() {
        let renderer = TimestampRenderer::new(-7).unwrap();
        assert_eq!(renderer.render(BASE_MS).unwrap(), "2025-08-28 06:02:18");
        assert_eq!(renderer.render(BASE_MS + 1000).unwrap(), "2025-08-28 06:02:19");
        assert_eq!(
            renderer.render(BASE_MS + 60_000).unwrap(),
            "2025-08-28 06:03:18"
        );
    }

    #[test]
    fn test_sub_second_truncated() {
        assert_eq!(
            format_epoch_millis(BASE_MS + 999).unwrap(),
            "2025-08-28 05:02:18"
        );
    }

    #[test]
    fn test_epoch_renders_in_offset() {
        // Midnight UTC is 16:00 the previous day at UTC-8.
        assert_eq!(format_epoch_millis(0).unwrap(), "1969-12-31 16:00:00");
        assert_eq!(format_epoch_millis(-1).unwrap(), "1969-12-31 15:59:59");
    }

    #[test]
    fn test_no_daylight_saving_shift() {
        // 2025-01-15 12:00:00 UTC and 2025-07-15 12:00:00 UTC.
        assert_eq!(
            format_epoch_millis(1_736_942_400_000).unwrap(),
            "2025-01-15 04:00:00"
        );
        assert_eq!(
            format_epoch_millis(1_752_580_800_000).unwrap(),
            "2025-07-15 04:00:00"
        );
        // US fall-back instant (2025-11-02 09:00:00 UTC) stays contiguous.
        assert_eq!(
            format_epoch_millis(1_762_073_999_000).unwrap(),
            "2025-11-02 00:59:59"
        );
        assert_eq!(
            format_epoch_millis(1_762_074_000_000).unwrap(),
            "2025-11-02 01:00:00"
        );
    }

    #[test]
    fn test_monotonic_over_range() {
        let mut previous = format_epoch_millis(BASE_MS - 5_000).unwrap();
        for step in (-4_999..5_000).step_by(250) {
            let current = format_epoch_millis(BASE_MS + step).unwrap();
            assert!(current >= previous, "{current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            format_epoch_millis(i64::MAX),
            Err(CoreError::TimestampOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_year_10000_out_of_range() {
        assert_eq!(
            format_epoch_millis(253_402_329_599_000).unwrap(),
            "9999-12-31 23:59:59"
        );
        assert_eq!(
            format_epoch_millis(253_402_329_600_000),
            Err(CoreError::TimestampOutOfRange(253_402_329_600_000))
        );
    }

    #[test]
    fn test_year_before_1_out_of_range() {
        assert_eq!(
            format_epoch_millis(-62_135_568_000_000).unwrap(),
            "0001-01-01 00:00:00"
        );
        assert_eq!(
            format_epoch_millis(-62_135_568_001_000),
            Err(CoreError::TimestampOutOfRange(-62_135_568_001_000))
        );
        assert_eq!(
            format_epoch_millis(i64::MIN),
            Err(CoreError::TimestampOutOfRange(i64::MIN))
        );
    }

    #[test]
    fn test_invalid_offset() {
        assert_eq!(TimestampRenderer::new(24), Err(CoreError::InvalidOffset(24)));
        assert_eq!(
            TimestampRenderer::new(i32::MIN),
            Err(CoreError::InvalidOffset(i32::MIN))
        );
    }

    #[test]
    fn test_parse_epoch_millis() {
        assert_eq!(parse_epoch_millis("1756386138000").unwrap(), BASE_MS);
        assert_eq!(parse_epoch_millis(" 42\n").unwrap(), 42);
        assert_eq!(parse_epoch_millis("-1000").unwrap(), -1000);
    }

    #[test]
    fn test_parse_epoch_millis_rejects_non_integer() {
        for raw in ["", "abc", "1756386138000.5", "1e12"] {
            assert_eq!(
                parse_epoch_millis(raw),
                Err(CoreError::InvalidTimestamp(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_convert() {
        let renderer = TimestampRenderer::default();
        assert_eq!(renderer.convert("1756386138000").unwrap(), "2025-08-28 05:02:18");
        assert!(renderer.convert("now").is_err());
    }
}
