//! Forecast output models

use crate::model::FitMode;
use serde::{Deserialize, Serialize};

/// Fitted or projected value for one bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Start of the bin in seconds since epoch
    pub bin_start: i64,
    /// Point estimate
    pub yhat: f64,
    /// Lower bound of the interval
    pub yhat_lower: f64,
    /// Upper bound of the interval
    pub yhat_upper: f64,
}

impl ForecastPoint {
    pub fn new(bin_start: i64, yhat: f64, yhat_lower: f64, yhat_upper: f64) -> Self {
        Self {
            bin_start,
            yhat,
            yhat_lower,
            yhat_upper,
        }
    }

    /// Distance between the upper and lower bound
    pub fn interval_width(&self) -> f64 {
        self.yhat_upper - self.yhat_lower
    }
}

/// Forecast points for the observed bins followed by the future bins.
///
/// The first `history_len` points are in-sample fits, the remaining
/// `horizon` points are projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub points: Vec<ForecastPoint>,
    pub history_len: usize,
    pub horizon: usize,
    pub bin_width_seconds: i64,
    pub period: usize,
    pub confidence_level: f64,
    pub mode: FitMode,
}

impl ForecastTable {
    /// In-sample points
    pub fn history(&self) -> &[ForecastPoint] {
        let end = self.history_len.min(self.points.len());
        &self.points[..end]
    }

    /// Projected points
    pub fn future(&self) -> &[ForecastPoint] {
        let start = self.history_len.min(self.points.len());
        &self.points[start..]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
