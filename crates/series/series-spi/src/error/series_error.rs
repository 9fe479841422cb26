//! Series error types.

use thiserror::Error;

/// Errors raised while scanning, decoding and resampling counter series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// Row key does not follow the `<entity>#<timestamp>` layout
    #[error("Malformed key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    /// Cell value is not a valid big-endian counter
    #[error("Malformed value: {0}")]
    MalformedValue(String),

    /// Store unreachable, scan failed or scan truncated
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// No observations to build a series from
    #[error("Empty series: no observations in range")]
    EmptySeries,

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The observed span needs more bins than allowed
    #[error("Too many bins: span needs {bins} bins, limit is {limit}")]
    TooManyBins { bins: u128, limit: usize },
}

impl SeriesError {
    /// Shorthand for [`SeriesError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error only affects a single row and the scan may continue.
    pub fn is_row_level(&self) -> bool {
        matches!(self, Self::MalformedKey { .. } | Self::MalformedValue(_))
    }
}

/// Result type for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
