//! Series loader
//!
//! Drives one range scan for an entity and decodes the returned rows into
//! observations. Corrupt rows are skipped and counted; a failed or truncated
//! scan aborts the load.

use series_spi::{Observation, Result, Row, ScanEvent, ScanProvider, ScanSummary, SeriesError};
use tracing::{debug, info, warn};

use crate::codec::{decode_counter_value, decode_key, KeyRange};

/// Default column family holding the counters.
pub const DEFAULT_FAMILY: &str = "stats";

/// Default column qualifier holding the counters.
pub const DEFAULT_COLUMN: &str = "ips";

/// Observations of one entity plus the scan accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLoad {
    /// Observations in the order the store returned them
    pub observations: Vec<Observation>,
    /// What happened to every scanned row
    pub summary: ScanSummary,
}

/// Loads the counter series of an entity from a [`ScanProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLoader {
    family: String,
    column: String,
}

enum RowOutcome {
    Observation(Observation),
    MissingCell,
    Foreign(String),
}

impl Default for SeriesLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_COLUMN)
    }
}

impl SeriesLoader {
    /// Create a loader reading the cell at `(family, column)`.
    pub fn new(family: &str, column: &str) -> Self {
        Self {
            family: family.to_string(),
            column: column.to_string(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Scan every row of `entity` and decode it.
    ///
    /// Returns [`SeriesError::SourceUnavailable`] when the scan cannot be
    /// opened, fails midway, or ends without the completion sentinel.
    pub fn load(&self, provider: &dyn ScanProvider, entity: &str) -> Result<SeriesLoad> {
        let range = KeyRange::for_entity(entity);
        debug!(
            store = provider.name(),
            entity,
            start = %String::from_utf8_lossy(&range.start),
            end = %String::from_utf8_lossy(&range.end),
            "starting range scan"
        );

        let stream = provider
            .scan_range(&range.start, &range.end)
            .map_err(|e| unavailable(provider.name(), e))?;

        let mut summary = ScanSummary::default();
        let mut observations = Vec::new();
        let mut last_timestamp: Option<i64> = None;

        for event in stream {
            let row = match event.map_err(|e| unavailable(provider.name(), e))? {
                ScanEvent::Complete => {
                    summary.complete = true;
                    break;
                }
                ScanEvent::Row(row) => row,
            };
            summary.rows_scanned += 1;

            match self.decode_row(&row, entity) {
                Ok(RowOutcome::Observation(obs)) => {
                    if last_timestamp.is_some_and(|last| obs.timestamp < last) {
                        summary.out_of_order += 1;
                    }
                    last_timestamp = Some(obs.timestamp);
                    summary.observations += 1;
                    observations.push(obs);
                }
                Ok(RowOutcome::MissingCell) => summary.missing_cell += 1,
                Ok(RowOutcome::Foreign(other)) => {
                    warn!(
                        key = %row.key_lossy(),
                        found = %other,
                        entity,
                        "row belongs to another entity, skipping"
                    );
                    summary.foreign_rows += 1;
                }
                Err(err @ SeriesError::MalformedKey { .. }) => {
                    warn!(key = %row.key_lossy(), error = %err, "skipping row");
                    summary.malformed_keys += 1;
                }
                Err(err @ SeriesError::MalformedValue(_)) => {
                    warn!(key = %row.key_lossy(), error = %err, "skipping row");
                    summary.malformed_values += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if !summary.complete {
            return Err(SeriesError::SourceUnavailable(format!(
                "scan of '{}' on store '{}' ended after {} rows without completion",
                entity,
                provider.name(),
                summary.rows_scanned
            )));
        }

        info!(store = provider.name(), entity, summary = %summary, "range scan complete");
        Ok(SeriesLoad {
            observations,
            summary,
        })
    }

    fn decode_row(&self, row: &Row, entity: &str) -> Result<RowOutcome> {
        let (found, timestamp) = decode_key(&row.key)?;
        if found != entity {
            return Ok(RowOutcome::Foreign(found));
        }
        match row.cell(&self.family, &self.column) {
            None => Ok(RowOutcome::MissingCell),
            Some(cell) => {
                let value = decode_counter_value(cell)?;
                Ok(RowOutcome::Observation(Observation::new(timestamp, value)))
            }
        }
    }
}

/// Load `entity` reading the cell at `(family, column)`.
pub fn load(
    provider: &dyn ScanProvider,
    entity: &str,
    family: &str,
    column: &str,
) -> Result<SeriesLoad> {
    SeriesLoader::new(family, column).load(provider, entity)
}

fn unavailable(store: &str, err: SeriesError) -> SeriesError {
    match err {
        SeriesError::SourceUnavailable(_) => err,
        other => SeriesError::SourceUnavailable(format!("store '{}': {}", store, other)),
    }
}
