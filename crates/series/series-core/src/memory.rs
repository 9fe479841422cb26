//! In-memory sorted store
//!
//! A `BTreeMap`-backed store serving range scans and counter increments.
//! Handles are opened and closed explicitly; a closed store refuses scans.

use std::collections::BTreeMap;

use series_spi::{CounterStore, Result, Row, RowStream, ScanEvent, ScanProvider, SeriesError};
use tracing::debug;

use crate::codec::{decode_counter_value, decode_key, encode_counter_value};

/// Sorted in-memory table.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    name: String,
    rows: BTreeMap<Vec<u8>, Row>,
    open: bool,
    max_age: Option<i64>,
}

impl MemoryStore {
    /// Open an empty store.
    pub fn open(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: BTreeMap::new(),
            open: true,
            max_age: None,
        }
    }

    /// Expire rows older than `seconds` on [`MemoryStore::expire`].
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Close the handle. Subsequent reads and writes fail.
    pub fn close(&mut self) {
        if self.open {
            debug!(store = %self.name, rows = self.rows.len(), "closing store");
        }
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in key order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Insert or replace a whole row.
    pub fn put(&mut self, row: Row) -> Result<()> {
        self.ensure_open()?;
        self.rows.insert(row.key.clone(), row);
        Ok(())
    }

    /// Set a single cell, creating the row if needed.
    pub fn set_cell(
        &mut self,
        key: &[u8],
        family: &str,
        column: &str,
        value: Vec<u8>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.rows
            .entry(key.to_vec())
            .or_insert_with(|| Row::new(key.to_vec()))
            .set_cell(family, column, value);
        Ok(())
    }

    /// Drop rows whose key timestamp is older than `now - max_age`.
    ///
    /// Rows with undecodable keys are kept. Returns the number of rows removed;
    /// without a max age nothing is removed.
    pub fn expire(&mut self, now: i64) -> Result<usize> {
        self.ensure_open()?;
        let Some(max_age) = self.max_age else {
            return Ok(0);
        };
        let cutoff = now.saturating_sub(max_age);
        let before = self.rows.len();
        self.rows.retain(|key, _| match decode_key(key) {
            Ok((_, ts)) => ts >= cutoff,
            Err(_) => true,
        });
        let removed = before - self.rows.len();
        debug!(store = %self.name, cutoff, removed, "expired rows");
        Ok(removed)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(SeriesError::SourceUnavailable(format!(
                "store '{}' is closed",
                self.name
            )))
        }
    }
}

impl ScanProvider for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan_range(&self, start: &[u8], end: &[u8]) -> Result<RowStream<'_>> {
        self.ensure_open()?;
        if start >= end {
            return Ok(Box::new(std::iter::once(Ok(ScanEvent::Complete))));
        }
        let rows = self
            .rows
            .range(start.to_vec()..end.to_vec())
            .map(|(_, row)| Ok(ScanEvent::Row(row.clone())));
        Ok(Box::new(rows.chain(std::iter::once(Ok(ScanEvent::Complete)))))
    }
}

impl CounterStore for MemoryStore {
    fn increment(&mut self, key: &[u8], family: &str, column: &str, delta: u64) -> Result<u64> {
        self.ensure_open()?;
        let row = self
            .rows
            .entry(key.to_vec())
            .or_insert_with(|| Row::new(key.to_vec()));
        let current = match row.cell(family, column) {
            Some(cell) => decode_counter_value(cell)?,
            None => 0,
        };
        let updated = current.saturating_add(delta);
        row.set_cell(family, column, encode_counter_value(updated).to_vec());
        Ok(updated)
    }
}
