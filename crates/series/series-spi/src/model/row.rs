//! Store row model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row returned by a range scan.
///
/// Cells are addressed by column family, then column qualifier. Only the
/// latest cell version is carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Raw row key bytes
    pub key: Vec<u8>,
    /// Cells by family and column
    pub cells: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl Row {
    pub fn new(key: Vec<u8>) -> Self {
        Self {
            key,
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style cell setter.
    pub fn with_cell(mut self, family: &str, column: &str, value: Vec<u8>) -> Self {
        self.set_cell(family, column, value);
        self
    }

    /// Set or replace the cell at `(family, column)`.
    pub fn set_cell(&mut self, family: &str, column: &str, value: Vec<u8>) {
        self.cells
            .entry(family.to_string())
            .or_default()
            .insert(column.to_string(), value);
    }

    /// Look up the cell at `(family, column)`.
    pub fn cell(&self, family: &str, column: &str) -> Option<&[u8]> {
        self.cells
            .get(family)
            .and_then(|columns| columns.get(column))
            .map(Vec::as_slice)
    }

    /// Row key rendered for logs, invalid UTF-8 replaced.
    pub fn key_lossy(&self) -> String {
        String::from_utf8_lossy(&self.key).into_owned()
    }
}
