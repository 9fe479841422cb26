//! Pipeline configuration
//!
//! One entity's end-to-end settings: which cell to read, how wide the bins
//! are, and how the forecast is fitted. Every field but `entity` has a
//! default, so a minimal JSON document is just `{"entity": "10.0.0.99"}`.

use crate::error::{PipelineError, Result};
use forecast_facade::{ForecastConfig, TrendKind};
use serde::{Deserialize, Serialize};
use series_facade::{LoadConfig, ResampleConfig};

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Entity whose counters are forecast (e.g. an IPv4 address)
    pub entity: String,
    #[serde(flatten)]
    pub load: LoadConfig,
    #[serde(flatten)]
    pub resample: ResampleConfig,
    #[serde(flatten)]
    pub forecast: ForecastConfig,
}

impl PipelineConfig {
    /// Defaults for everything but the entity.
    pub fn new(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            load: LoadConfig::default(),
            resample: ResampleConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }

    pub fn builder(entity: &str) -> PipelineConfigBuilder {
        PipelineConfigBuilder::new(entity)
    }

    /// Same settings, different entity
    pub fn for_entity(&self, entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            ..self.clone()
        }
    }

    /// Check every layer's parameters.
    pub fn validate(&self) -> Result<()> {
        if self.entity.is_empty() {
            return Err(PipelineError::Config("entity must not be empty".to_string()));
        }
        if self.load.family.is_empty() || self.load.column.is_empty() {
            return Err(PipelineError::Config(
                "family and column must not be empty".to_string(),
            ));
        }
        self.resample
            .resampler()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        self.forecast
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new(entity: &str) -> Self {
        Self {
            config: PipelineConfig::new(entity),
        }
    }

    pub fn family(mut self, family: &str) -> Self {
        self.config.load.family = family.to_string();
        self
    }

    pub fn column(mut self, column: &str) -> Self {
        self.config.load.column = column.to_string();
        self
    }

    pub fn bin_width_seconds(mut self, width: i64) -> Self {
        self.config.resample.bin_width_seconds = width;
        self
    }

    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.config.resample.max_bins = max_bins;
        self
    }

    pub fn seasonal_period_bins(mut self, period: usize) -> Self {
        self.config.forecast.seasonal_period_bins = period;
        self
    }

    pub fn forecast_horizon_bins(mut self, horizon: usize) -> Self {
        self.config.forecast.horizon_bins = horizon;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.forecast.confidence_level = level;
        self
    }

    pub fn allow_trend_only(mut self, allow: bool) -> Self {
        self.config.forecast.allow_trend_only = allow;
        self
    }

    pub fn trend(mut self, trend: TrendKind) -> Self {
        self.config.forecast.trend = trend;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
