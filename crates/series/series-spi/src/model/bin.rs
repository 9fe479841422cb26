//! Fixed-width aggregation bins.

use serde::{Deserialize, Serialize};

/// Sum of all observations falling into `[bin_start, bin_start + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bin {
    /// Start of the interval, unix seconds
    pub bin_start: i64,
    /// Summed counter value, zero for empty intervals
    pub sum: u64,
}

impl Bin {
    pub fn new(bin_start: i64, sum: u64) -> Self {
        Self { bin_start, sum }
    }
}

/// Extract the bin sums as `f64` values.
pub fn bin_values(bins: &[Bin]) -> Vec<f64> {
    bins.iter().map(|b| b.sum as f64).collect()
}

/// Extract the bin start timestamps.
pub fn bin_starts(bins: &[Bin]) -> Vec<i64> {
    bins.iter().map(|b| b.bin_start).collect()
}
