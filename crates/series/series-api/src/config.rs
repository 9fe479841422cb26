//! Series loading and resampling configuration types.

use serde::{Deserialize, Serialize};
use series_core::{Resampler, SeriesLoader, DEFAULT_COLUMN, DEFAULT_FAMILY, DEFAULT_MAX_BINS};
use series_spi::{Granularity, Result};

/// Which cell of an entity's rows holds the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Column family (e.g. "stats")
    pub family: String,
    /// Column qualifier (e.g. "ips")
    pub column: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_string(),
            column: DEFAULT_COLUMN.to_string(),
        }
    }
}

impl LoadConfig {
    /// Create a load configuration for `(family, column)`.
    pub fn new(family: &str, column: &str) -> Self {
        Self {
            family: family.to_string(),
            column: column.to_string(),
        }
    }

    /// Build the loader described by this configuration.
    pub fn loader(&self) -> SeriesLoader {
        SeriesLoader::new(&self.family, &self.column)
    }
}

/// Bin width and allocation limit for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Width of one bin in seconds
    pub bin_width_seconds: i64,
    /// Maximum number of bins a single series may span
    pub max_bins: usize,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self::from_granularity(Granularity::Hour)
    }
}

impl ResampleConfig {
    /// Create a resample configuration with `bin_width_seconds` wide bins.
    pub fn new(bin_width_seconds: i64) -> Self {
        Self {
            bin_width_seconds,
            max_bins: DEFAULT_MAX_BINS,
        }
    }

    /// Create a resample configuration from a preset width.
    pub fn from_granularity(granularity: Granularity) -> Self {
        Self::new(granularity.seconds())
    }

    /// Build the resampler, validating the width.
    pub fn resampler(&self) -> Result<Resampler> {
        Ok(Resampler::new(self.bin_width_seconds)?.with_max_bins(self.max_bins))
    }
}

/// Builder for LoadConfig.
#[derive(Debug, Default)]
pub struct LoadConfigBuilder {
    family: Option<String>,
    column: Option<String>,
}

impl LoadConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column family.
    pub fn family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }

    /// Set the column qualifier.
    pub fn column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<LoadConfig, &'static str> {
        let family = self.family.unwrap_or_else(|| DEFAULT_FAMILY.to_string());
        let column = self.column.unwrap_or_else(|| DEFAULT_COLUMN.to_string());
        if family.is_empty() {
            return Err("family must not be empty");
        }
        if column.is_empty() {
            return Err("column must not be empty");
        }
        Ok(LoadConfig { family, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use series_spi::SeriesError;

    #[test]
    fn test_load_config_default() {
        let config = LoadConfig::default();
        assert_eq!(config.family, "stats");
        assert_eq!(config.column, "ips");
        assert_eq!(config.loader(), SeriesLoader::default());
    }

    #[test]
    fn test_resample_config_default_is_hourly() {
        let config = ResampleConfig::default();
        assert_eq!(config.bin_width_seconds, 3600);
        assert_eq!(config.max_bins, DEFAULT_MAX_BINS);
    }

    #[test]
    fn test_resample_config_from_granularity() {
        assert_eq!(ResampleConfig::from_granularity(Granularity::Day).bin_width_seconds, 86_400);
        assert_eq!(ResampleConfig::from_granularity(Granularity::Minute).bin_width_seconds, 60);
    }

    #[test]
    fn test_resampler_validates_width() {
        let err = ResampleConfig::new(0).resampler().unwrap_err();
        assert!(matches!(err, SeriesError::InvalidParameter { .. }));

        let resampler = ResampleConfig {
            bin_width_seconds: 60,
            max_bins: 10,
        }
        .resampler()
        .unwrap();
        assert_eq!(resampler.bin_width(), 60);
        assert_eq!(resampler.max_bins(), 10);
    }

    #[test]
    fn test_builder_defaults() {
        let config = LoadConfigBuilder::new().build().unwrap();
        assert_eq!(config, LoadConfig::default());
    }

    #[test]
    fn test_builder_custom_cell() {
        let config = LoadConfigBuilder::new()
            .family("metrics")
            .column("bytes")
            .build()
            .unwrap();
        assert_eq!(config, LoadConfig::new("metrics", "bytes"));
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        assert!(LoadConfigBuilder::new().family("").build().is_err());
        assert!(LoadConfigBuilder::new().column("").build().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoadConfig = serde_json::from_str(r#"{"column":"hits"}"#).unwrap();
        assert_eq!(config.family, "stats");
        assert_eq!(config.column, "hits");

        let resample: ResampleConfig = serde_json::from_str(r#"{"bin_width_seconds":60}"#).unwrap();
        assert_eq!(resample.bin_width_seconds, 60);
        assert_eq!(resample.max_bins, DEFAULT_MAX_BINS);
    }
}
