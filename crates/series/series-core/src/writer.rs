//! Counter writer
//!
//! Records hits for an entity under `entity#timestamp` row keys through a
//! [`CounterStore`] increment.

use series_spi::{CounterStore, Result};
use tracing::trace;

use crate::codec::encode_key;
use crate::loader::{DEFAULT_COLUMN, DEFAULT_FAMILY};

/// Writes counter increments for entities into a store.
pub struct CounterWriter<'a, S: CounterStore> {
    store: &'a mut S,
    family: String,
    column: String,
    written: u64,
}

impl<'a, S: CounterStore> CounterWriter<'a, S> {
    /// Writer targeting the default `stats:ips` cell.
    pub fn new(store: &'a mut S) -> Self {
        Self::with_cell(store, DEFAULT_FAMILY, DEFAULT_COLUMN)
    }

    /// Writer targeting the cell at `(family, column)`.
    pub fn with_cell(store: &'a mut S, family: &str, column: &str) -> Self {
        Self {
            store,
            family: family.to_string(),
            column: column.to_string(),
            written: 0,
        }
    }

    /// Add one hit for `entity` at `timestamp`.
    pub fn record(&mut self, entity: &str, timestamp: i64) -> Result<u64> {
        self.record_many(entity, timestamp, 1)
    }

    /// Add `count` hits for `entity` at `timestamp`.
    pub fn record_many(&mut self, entity: &str, timestamp: i64, count: u64) -> Result<u64> {
        let key = encode_key(entity, timestamp)?;
        let value = self
            .store
            .increment(&key, &self.family, &self.column, count)?;
        self.written += 1;
        trace!(entity, timestamp, value, "counter incremented");
        Ok(value)
    }

    /// Number of increments applied through this writer.
    pub fn written(&self) -> u64 {
        self.written
    }
}
