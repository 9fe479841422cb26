//! Series Service Provider Interface
//!
//! Defines the store contracts, the typed event models and the errors used to
//! turn sparse counter rows into a regular time series.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CounterStore, RowStream, ScanProvider};
pub use error::{Result, SeriesError};
pub use model::{
    bin_starts, bin_values, Bin, Granularity, Observation, Row, ScanEvent, ScanSummary,
};

// ============================================================================
// Tests
// ============================================================================
