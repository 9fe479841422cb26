//! Pipeline error types

use forecast_facade::ForecastError;
use series_facade::SeriesError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running a forecast pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Scanning, decoding or resampling failed
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Fitting, prediction or the sink failed
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// The scan produced no observations for the entity
    #[error("Empty series for entity '{entity}': no observations in range")]
    EmptySeries { entity: String },

    /// Invalid pipeline configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// Attach the entity to a series error, promoting `EmptySeries`.
    pub fn for_entity(error: SeriesError, entity: &str) -> Self {
        match error {
            SeriesError::EmptySeries => PipelineError::EmptySeries {
                entity: entity.to_string(),
            },
            other => PipelineError::Series(other),
        }
    }
}
