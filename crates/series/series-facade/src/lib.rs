//! Series Facade
//!
//! Unified re-exports for the series module.
//!
//! This facade provides a single entry point for all series functionality:
//! - `series_spi` - Store contracts, models and errors
//! - `series_api` - Configuration types and builders
//! - `series_core` - Codec, loader, resampler and the in-memory store
//!
//! # Example
//!
//! ```rust
//! use series_facade::{resample, CounterWriter, MemoryStore, SeriesLoader};
//!
//! let mut store = MemoryStore::open("stats");
//! let mut writer = CounterWriter::new(&mut store);
//! writer.record("10.0.0.99", 1725027060).unwrap();
//! writer.record("10.0.0.99", 1725030660).unwrap();
//!
//! let load = SeriesLoader::default().load(&store, "10.0.0.99").unwrap();
//! let bins = resample(&load.observations, 3600).unwrap();
//! assert_eq!(bins.len(), 2);
//! ```

// Re-export everything from SPI
pub use series_spi::*;

// Re-export everything from API
pub use series_api::*;

// Re-export everything from Core
pub use series_core::*;
