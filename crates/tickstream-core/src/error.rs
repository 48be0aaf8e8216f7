//! Error types for tickstream-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid timestamp: {0:?} is not an integer millisecond value")]
    InvalidTimestamp(String),

    #[error("Timestamp out of range: {0}ms")]
    TimestampOutOfRange(i64),

    #[error("Invalid UTC offset: {0}s")]
    InvalidOffset(i32),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
