//! Series Core
//!
//! Implementations for turning sparse counter rows into a dense series:
//! key codec, range-scan loader, resampler, and an in-memory sorted store.

pub mod codec;
pub mod dump;
pub mod loader;
pub mod memory;
pub mod resample;
pub mod writer;

// Re-export SPI types for implementations
pub use series_spi::{
    bin_starts, bin_values, Bin, CounterStore, Granularity, Observation, Result, Row, RowStream,
    ScanEvent, ScanProvider, ScanSummary, SeriesError,
};

// Re-export main types
pub use codec::{
    decode_counter_value, decode_key, encode_counter_value, encode_key, encode_range_end,
    encode_range_start, KeyRange,
};
pub use loader::{load, SeriesLoad, SeriesLoader, DEFAULT_COLUMN, DEFAULT_FAMILY};
pub use memory::MemoryStore;
pub use resample::{resample, Resampler, DEFAULT_MAX_BINS};
pub use writer::CounterWriter;
