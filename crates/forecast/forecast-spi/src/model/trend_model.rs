//! Fitted trend coefficients

use crate::model::TrendKind;
use serde::{Deserialize, Serialize};

/// Regression coefficients of a fitted trend.
///
/// The regressor is the bin index scaled to `u = t / scale`, so the history
/// spans `u` in `[0, 1]`. Coefficients are ordered intercept, slope, then
/// one hinge coefficient per knot: `y = c0 + c1·u + Σ ck·max(0, u - knot_k)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub kind: TrendKind,
    pub coefficients: Vec<f64>,
    pub knots: Vec<f64>,
    pub scale: f64,
}

impl TrendModel {
    /// A straight line in bin-index units.
    pub fn linear(intercept: f64, slope_per_bin: f64) -> Self {
        Self {
            kind: TrendKind::Linear,
            coefficients: vec![intercept, slope_per_bin],
            knots: Vec::new(),
            scale: 1.0,
        }
    }

    /// Trend value at a (possibly fractional or future) bin index
    pub fn value_at(&self, index: f64) -> f64 {
        let u = index / self.scale;
        let hinges: f64 = self
            .coefficients
            .iter()
            .skip(2)
            .zip(&self.knots)
            .map(|(c, knot)| c * (u - knot).max(0.0))
            .sum();
        self.intercept() + self.coefficients.get(1).copied().unwrap_or(0.0) * u + hinges
    }

    /// Trend value at `index = 0`
    pub fn intercept(&self) -> f64 {
        self.coefficients.first().copied().unwrap_or(0.0)
    }

    /// Slope per bin before the first knot
    pub fn slope(&self) -> f64 {
        self.coefficients.get(1).copied().unwrap_or(0.0) / self.scale
    }

    /// Slope per bin after the last knot
    pub fn final_slope(&self) -> f64 {
        self.coefficients.iter().skip(1).sum::<f64>() / self.scale
    }
}
