//! Forecast Consumer API
//!
//! Consumer configuration and builder APIs for the forecast engine.
//!
//! This crate provides:
//! - `ForecastConfig` with serde defaults
//! - `ForecastConfigBuilder` for constructing validated configurations
//! - Re-exports from SPI and core for convenience

// Re-export from core
pub use forecast_core::{
    confidence, decomposition, engine, normal, normal_quantile, trend, z_score,
    AdditiveDecomposer, AdditiveFit, ForecastEngine, HorizonWideningComputer, Model,
    RegressionTrendFitter, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_PERIOD,
};

// Re-export traits and models from SPI
pub use forecast_spi::{
    ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, Decomposer, FitMode,
    ForecastError, ForecastPoint, ForecastSink, ForecastTable, Result, TrendFitter, TrendKind,
    TrendModel,
};

use serde::{Deserialize, Serialize};

/// Default number of future bins to project
pub const DEFAULT_HORIZON: usize = 24;

/// Configuration for the forecast engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Seasonal period in bins
    pub seasonal_period_bins: usize,
    /// Central confidence level of the intervals, in (0, 1)
    pub confidence_level: f64,
    /// Trend shape
    pub trend: TrendKind,
    /// Fit a trend-only model when the history is shorter than two periods
    pub allow_trend_only: bool,
    /// Number of future bins to project
    #[serde(rename = "forecast_horizon_bins", alias = "horizon_bins")]
    pub horizon_bins: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seasonal_period_bins: DEFAULT_PERIOD,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            trend: TrendKind::Linear,
            allow_trend_only: false,
            horizon_bins: DEFAULT_HORIZON,
        }
    }
}

impl ForecastConfig {
    /// Build the engine described by this configuration.
    pub fn engine(&self) -> Result<ForecastEngine> {
        Ok(
            ForecastEngine::new(self.seasonal_period_bins, self.confidence_level)?
                .with_trend(self.trend)
                .with_trend_only_fallback(self.allow_trend_only),
        )
    }

    /// Check the parameters without building an engine.
    pub fn validate(&self) -> Result<()> {
        self.engine().map(|_| ())
    }
}

/// Builder for ForecastConfig
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    config: ForecastConfig,
}

impl ForecastConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seasonal_period_bins(mut self, period: usize) -> Self {
        self.config.seasonal_period_bins = period;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    pub fn trend(mut self, trend: TrendKind) -> Self {
        self.config.trend = trend;
        self
    }

    pub fn allow_trend_only(mut self, allow: bool) -> Self {
        self.config.allow_trend_only = allow;
        self
    }

    pub fn horizon_bins(mut self, horizon: usize) -> Self {
        self.config.horizon_bins = horizon;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<ForecastConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, ForecastConfigBuilder, DEFAULT_HORIZON};
    pub use forecast_core::{ForecastEngine, Model};
    pub use forecast_spi::{
        FitMode, ForecastError, ForecastPoint, ForecastSink, ForecastTable, Result, TrendKind,
    };
}
