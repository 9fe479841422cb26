//! Forecast Pipeline
//!
//! Wires the series and forecast stacks together: scan an entity's counter
//! rows from a store, resample them into bins, fit and project the series,
//! and hand the result to a sink.
//!
//! # Example
//!
//! ```rust
//! use pipeline::{ForecastPipeline, PipelineConfig};
//! use series_facade::{CounterWriter, MemoryStore};
//!
//! let mut store = MemoryStore::open("stats");
//! let mut writer = CounterWriter::new(&mut store);
//! for hour in 0..48 {
//!     writer.record("10.0.0.99", 1_725_000_000 + hour * 3600).unwrap();
//! }
//!
//! let output = ForecastPipeline::new(&store)
//!     .run(&PipelineConfig::new("10.0.0.99"))
//!     .unwrap();
//! assert_eq!(output.table.future().len(), 24);
//! ```

pub mod config;
pub mod error;
pub mod runner;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{PipelineError, Result};
pub use runner::{ForecastPipeline, PipelineOutput};
