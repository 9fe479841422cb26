//! Scan stream events and per-scan accounting.

use serde::{Deserialize, Serialize};

use super::row::Row;

/// Item of a range scan stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A row inside the requested range
    Row(Row),
    /// End-of-range sentinel, the scan delivered every row
    Complete,
}

/// Counters describing what a loader did with the rows of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Rows delivered by the store
    pub rows_scanned: u64,
    /// Rows decoded into observations
    pub observations: u64,
    /// Rows without the requested cell
    pub missing_cell: u64,
    /// Rows skipped because the key could not be decoded
    pub malformed_keys: u64,
    /// Rows skipped because the cell value could not be decoded
    pub malformed_values: u64,
    /// Rows whose key belongs to a different entity
    pub foreign_rows: u64,
    /// Observations whose timestamp precedes the previous one
    pub out_of_order: u64,
    /// Whether the store signalled the end of the range
    pub complete: bool,
}

impl ScanSummary {
    /// Rows that did not produce an observation.
    pub fn skipped(&self) -> u64 {
        self.missing_cell + self.malformed_keys + self.malformed_values + self.foreign_rows
    }

    /// Rows dropped because of corrupt data.
    pub fn malformed(&self) -> u64 {
        self.malformed_keys + self.malformed_values
    }

    /// Complete scan with no corrupt rows.
    pub fn is_clean(&self) -> bool {
        self.complete && self.malformed() == 0
    }
}

impl std::fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} observations, {} missing cell, ",
            self.rows_scanned, self.observations, self.missing_cell
        )?;
        write!(
            f,
            "{} malformed keys, {} malformed values, {} foreign, {} out of order",
            self.malformed_keys, self.malformed_values, self.foreign_rows, self.out_of_order
        )
    }
}
