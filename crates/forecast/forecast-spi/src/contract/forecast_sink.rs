//! Trait for forecast consumers

use crate::error::Result;
use crate::model::ForecastTable;
use series_spi::Bin;

/// Consumes a finished forecast, e.g. for display or export.
pub trait ForecastSink {
    /// Receive the observed bins and the forecast table built from them
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()>;
}

impl<S: ForecastSink + ?Sized> ForecastSink for &mut S {
    fn emit(&mut self, history: &[Bin], table: &ForecastTable) -> Result<()> {
        (**self).emit(history, table)
    }
}
