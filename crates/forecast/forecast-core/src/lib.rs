//! Forecast Core
//!
//! Core implementations for trend regression, additive decomposition,
//! prediction intervals and the forecast engine.

pub mod confidence;
pub mod decomposition;
pub mod engine;
pub mod normal;
pub mod trend;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, Decomposer, FitMode,
    ForecastError, ForecastPoint, ForecastSink, ForecastTable, Result, TrendFitter, TrendKind,
    TrendModel,
};

// Re-export main types
pub use confidence::HorizonWideningComputer;
pub use decomposition::{AdditiveDecomposer, AdditiveFit};
pub use engine::{ForecastEngine, Model, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_PERIOD};
pub use normal::{normal_quantile, z_score};
pub use trend::RegressionTrendFitter;
