//! Forecast error types

use thiserror::Error;

/// Errors that can occur while fitting, predicting or emitting forecasts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Not enough bins for the requested model
    #[error("Insufficient history: need at least {required} bins, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// The forecast sink rejected the table
    #[error("Sink error: {0}")]
    Sink(String),
}

impl ForecastError {
    /// Shorthand for [`ForecastError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
