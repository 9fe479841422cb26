//! CSV table dumps
//!
//! One line per cell: `key,family,column,value_hex`. Row keys are written as
//! UTF-8 text and cell values as lowercase hex, so corrupt cells (for example
//! an empty value) survive a round trip unchanged. Rows whose key is not
//! UTF-8 cannot be dumped.

use std::io::{Read, Write};

use series_spi::{Result, SeriesError};

use crate::memory::MemoryStore;

/// Header line of a dump file.
pub const DUMP_HEADER: [&str; 4] = ["key", "family", "column", "value_hex"];

/// Write every cell of `store` as CSV. Returns the number of cells written.
pub fn write_dump<W: Write>(store: &MemoryStore, writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DUMP_HEADER).map_err(dump_error)?;

    let mut cells = 0;
    for row in store.rows() {
        let key = std::str::from_utf8(&row.key).map_err(|e| SeriesError::MalformedKey {
            key: row.key_lossy(),
            reason: format!("cannot dump a non UTF-8 key: {}", e),
        })?;
        for (family, columns) in &row.cells {
            for (column, value) in columns {
                let value_hex = hex::encode(value);
                csv.write_record([key, family.as_str(), column.as_str(), value_hex.as_str()])
                    .map_err(dump_error)?;
                cells += 1;
            }
        }
    }
    csv.flush()
        .map_err(|e| SeriesError::SourceUnavailable(format!("dump write failed: {}", e)))?;
    Ok(cells)
}

/// Load cells from a CSV dump into `store`. Returns the number of cells read.
pub fn read_dump<R: Read>(store: &mut MemoryStore, reader: R) -> Result<usize> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut cells = 0;

    for (line, record) in csv.records().enumerate() {
        let record = record.map_err(dump_error)?;
        let value = decode_value(field(&record, 3, line)?).map_err(|e| {
            SeriesError::SourceUnavailable(format!("dump record {}: {}", line + 1, e))
        })?;
        store.set_cell(
            field(&record, 0, line)?.as_bytes(),
            field(&record, 1, line)?,
            field(&record, 2, line)?,
            value,
        )?;
        cells += 1;
    }
    Ok(cells)
}

/// Parse a hex cell value, optionally `0x` prefixed.
fn decode_value(text: &str) -> std::result::Result<Vec<u8>, hex::FromHexError> {
    let digits = text.trim();
    hex::decode(digits.strip_prefix("0x").unwrap_or(digits))
}

fn field(record: &csv::StringRecord, idx: usize, line: usize) -> Result<&str> {
    record.get(idx).ok_or_else(|| {
        SeriesError::SourceUnavailable(format!(
            "dump record {}: missing field '{}'",
            line + 1,
            DUMP_HEADER[idx]
        ))
    })
}

fn dump_error(err: csv::Error) -> SeriesError {
    SeriesError::SourceUnavailable(format!("dump i/o failed: {}", err))
}
