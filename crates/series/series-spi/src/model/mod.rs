//! Model module containing data structures

mod bin;
mod granularity;
mod observation;
mod row;
mod scan;

pub use bin::{bin_starts, bin_values, Bin};
pub use granularity::Granularity;
pub use observation::Observation;
pub use row::Row;
pub use scan::{ScanEvent, ScanSummary};
