//! Decoded counter observation.

use serde::{Deserialize, Serialize};

/// A single counter reading decoded from one store row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Counter value
    pub value: u64,
}

impl Observation {
    pub fn new(timestamp: i64, value: u64) -> Self {
        Self { timestamp, value }
    }
}
