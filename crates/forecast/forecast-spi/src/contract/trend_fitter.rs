//! Trait for trend regression

use crate::error::Result;
use crate::model::{TrendKind, TrendModel};

/// Fits a trend over values indexed `0..n`.
pub trait TrendFitter: Send + Sync {
    /// Trend shape this fitter produces
    fn kind(&self) -> TrendKind;

    /// Least-squares fit of `values` against their bin index
    fn fit_trend(&self, values: &[f64]) -> Result<TrendModel>;
}
