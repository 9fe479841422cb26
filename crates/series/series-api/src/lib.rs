//! Series Consumer API
//!
//! Consumer configurations and builder APIs for loading and resampling
//! counter series.
//!
//! This crate provides:
//! - Configuration types for the loader and the resampler
//! - Builder patterns for constructing load configurations
//! - Re-exports from SPI and core for convenience

pub mod config;

pub use config::{LoadConfig, LoadConfigBuilder, ResampleConfig};

// Re-export from core
pub use series_core::{
    codec, dump, loader, memory, resample, writer, CounterWriter, KeyRange, MemoryStore,
    Resampler, SeriesLoad, SeriesLoader,
};

// Re-export traits and models from SPI
pub use series_spi::{
    Bin, CounterStore, Granularity, Observation, Result, Row, RowStream, ScanEvent, ScanProvider,
    ScanSummary, SeriesError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LoadConfig, LoadConfigBuilder, ResampleConfig};
    pub use series_core::{CounterWriter, MemoryStore, Resampler, SeriesLoad, SeriesLoader};
    pub use series_spi::{
        Bin, CounterStore, Granularity, Observation, Result, ScanProvider, ScanSummary,
        SeriesError,
    };
}
