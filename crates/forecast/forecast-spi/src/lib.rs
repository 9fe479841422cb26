//! Forecast Service Provider Interface
//!
//! Defines traits for trend fitting, seasonal decomposition, interval
//! computation and forecast sinks, plus the models they exchange.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceIntervalComputer, Decomposer, ForecastSink, TrendFitter};
pub use error::{ForecastError, Result};
pub use model::{
    ConfidenceInterval, DecompositionResult, FitMode, ForecastPoint, ForecastTable, TrendKind,
    TrendModel,
};
