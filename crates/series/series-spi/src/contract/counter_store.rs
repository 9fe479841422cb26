//! Counter increment trait definition.

use crate::error::Result;

/// Trait for stores that support atomic read-modify-write counter increments.
pub trait CounterStore {
    /// Add `delta` to the big-endian counter stored at `(key, family, column)`.
    ///
    /// A missing cell counts as zero. Returns the counter value after the
    /// increment.
    fn increment(&mut self, key: &[u8], family: &str, column: &str, delta: u64) -> Result<u64>;
}
