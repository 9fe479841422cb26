//! Range key codec
//!
//! Row keys have the layout `<entity>#<timestamp>`. Timestamps are written as
//! zero-padded 19-digit decimals so that bytewise key order matches
//! chronological order; unpadded suffixes written by older tooling still
//! decode.
//!
//! Counter cells hold unsigned big-endian integers.

use series_spi::{Result, SeriesError};

/// Separator between entity and timestamp.
pub const SEPARATOR: u8 = b'#';

/// Digits of a padded timestamp suffix, enough for any non-negative `i64`.
pub const TIMESTAMP_WIDTH: usize = 19;

/// Width of an encoded counter cell.
pub const COUNTER_WIDTH: usize = 8;

/// Bounds of the scan covering every row of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    /// Inclusive start key
    pub start: Vec<u8>,
    /// Exclusive end key
    pub end: Vec<u8>,
}

impl KeyRange {
    /// Range spanning all timestamps of `entity`.
    pub fn for_entity(entity: &str) -> Self {
        Self {
            start: encode_range_start(entity),
            end: encode_range_end(entity),
        }
    }

    /// Whether `key` falls inside `[start, end)`.
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && key < self.end.as_slice()
    }
}

/// First key of an entity's range: `entity#0`.
pub fn encode_range_start(entity: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(entity.len() + 2);
    key.extend_from_slice(entity.as_bytes());
    key.push(SEPARATOR);
    key.push(b'0');
    key
}

/// Exclusive end key of an entity's range: `entity#` followed by nineteen `9`s.
///
/// Every padded suffix and every unpadded suffix of up to nineteen digits
/// sorts below the sentinel.
pub fn encode_range_end(entity: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(entity.len() + 1 + TIMESTAMP_WIDTH);
    key.extend_from_slice(entity.as_bytes());
    key.push(SEPARATOR);
    key.extend(std::iter::repeat(b'9').take(TIMESTAMP_WIDTH));
    key
}

/// Encode `entity#<zero-padded timestamp>`.
pub fn encode_key(entity: &str, timestamp: i64) -> Result<Vec<u8>> {
    if timestamp < 0 {
        return Err(SeriesError::invalid_parameter(
            "timestamp",
            format!("must be non-negative, got {}", timestamp),
        ));
    }
    Ok(format!(
        "{}{}{:0width$}",
        entity,
        SEPARATOR as char,
        timestamp,
        width = TIMESTAMP_WIDTH
    )
    .into_bytes())
}

/// Split a row key on its last `#` into entity and timestamp.
pub fn decode_key(key: &[u8]) -> Result<(String, i64)> {
    let malformed = |reason: &str| SeriesError::MalformedKey {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: reason.to_string(),
    };

    let pos = key
        .iter()
        .rposition(|&b| b == SEPARATOR)
        .ok_or_else(|| malformed("missing '#' separator"))?;

    let entity = std::str::from_utf8(&key[..pos])
        .map_err(|_| malformed("entity is not valid UTF-8"))?;

    let suffix = &key[pos + 1..];
    if suffix.is_empty() {
        return Err(malformed("empty timestamp"));
    }
    if !suffix.iter().all(u8::is_ascii_digit) {
        return Err(malformed("timestamp is not a non-negative decimal integer"));
    }

    // All-digit input is ASCII, so the conversion cannot fail.
    let digits = std::str::from_utf8(suffix).map_err(|_| malformed("timestamp is not ASCII"))?;
    let timestamp = digits
        .parse::<i64>()
        .map_err(|_| malformed("timestamp out of range"))?;

    Ok((entity.to_string(), timestamp))
}

/// Interpret a cell as an unsigned big-endian counter.
///
/// Leading zero bytes are ignored, so cells wider than eight bytes decode as
/// long as the value fits in a `u64`.
pub fn decode_counter_value(bytes: &[u8]) -> Result<u64> {
    if bytes.is_empty() {
        return Err(SeriesError::MalformedValue("empty cell value".to_string()));
    }

    let first_significant = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first_significant..];
    if significant.len() > COUNTER_WIDTH {
        return Err(SeriesError::MalformedValue(format!(
            "{} significant bytes overflow a 64-bit counter",
            significant.len()
        )));
    }

    Ok(significant
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Encode a counter the way the store's increment writes it.
pub fn encode_counter_value(value: u64) -> [u8; COUNTER_WIDTH] {
    value.to_be_bytes()
}
