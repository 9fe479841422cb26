//! Error module containing error types and result aliases

mod series_error;

pub use series_error::{Result, SeriesError};
