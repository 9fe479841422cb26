//! Contract module containing store traits

mod counter_store;
mod scan_provider;

pub use counter_store::CounterStore;
pub use scan_provider::{RowStream, ScanProvider};
