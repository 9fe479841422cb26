//! Forecast Facade
//!
//! High-level API for trend and seasonal forecasting. Re-exports all public
//! types from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{confidence, decomposition, engine, normal, trend};

// Re-export SPI traits
pub use forecast_spi::{
    ConfidenceIntervalComputer, Decomposer, ForecastError, ForecastSink, TrendFitter,
};
