//! Least-squares trend regression
//!
//! Fits `y = c0 + c1·u + Σ ck·max(0, u - knot_k)` over the bin index, where
//! `u = t / (n - 1)` maps the history onto `[0, 1]`. A linear trend has no
//! knots; a piecewise trend places its knots evenly over the first 80% of
//! the history so the final segment still has data behind it.
//!
//! ## When to Use
//!
//! - `Linear` for steady growth or decline
//! - `Piecewise` when the level bends, e.g. after a traffic shift

use forecast_spi::{ForecastError, Result, TrendFitter, TrendKind, TrendModel};
use tracing::debug;

/// Fraction of the history over which changepoints are placed
pub const CHANGEPOINT_RANGE: f64 = 0.8;

/// Diagonal penalty on hinge coefficients, relative to the number of bins
const HINGE_RIDGE: f64 = 1e-8;

/// Ordinary least-squares trend fitter
///
/// # Example
///
/// ```rust
/// use forecast_core::trend::RegressionTrendFitter;
/// use forecast_core::TrendFitter;
///
/// let data = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
/// let trend = RegressionTrendFitter::linear().fit_trend(&data).unwrap();
///
/// // Should predict approximately 22 for the next bin
/// assert!((trend.value_at(6.0) - 22.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionTrendFitter {
    kind: TrendKind,
}

impl Default for RegressionTrendFitter {
    fn default() -> Self {
        Self::linear()
    }
}

impl RegressionTrendFitter {
    pub fn new(kind: TrendKind) -> Self {
        Self { kind }
    }

    /// Straight-line fitter
    pub fn linear() -> Self {
        Self::new(TrendKind::Linear)
    }

    /// Hinge positions on the scaled index
    pub fn knots(&self) -> Vec<f64> {
        match self.kind {
            TrendKind::Linear => Vec::new(),
            TrendKind::Piecewise { changepoints } => (1..=changepoints)
                .map(|k| CHANGEPOINT_RANGE * k as f64 / changepoints as f64)
                .collect(),
        }
    }
}

impl TrendFitter for RegressionTrendFitter {
    fn kind(&self) -> TrendKind {
        self.kind
    }

    fn fit_trend(&self, values: &[f64]) -> Result<TrendModel> {
        let n = values.len();
        let required = self.kind.parameters().max(2);
        if n < required {
            return Err(ForecastError::InsufficientHistory {
                required,
                actual: n,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NumericalError(
                "trend input contains non-finite values".to_string(),
            ));
        }

        let knots = self.knots();
        let p = 2 + knots.len();
        let scale = (n - 1) as f64;

        // Normal equations X'X c = X'y, accumulated row by row in index order
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        let mut row = vec![0.0; p];
        for (t, &y) in values.iter().enumerate() {
            basis(t as f64 / scale, &knots, &mut row);
            for i in 0..p {
                xty[i] += row[i] * y;
                for j in 0..p {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }
        for (i, line) in xtx.iter_mut().enumerate().skip(2) {
            line[i] += HINGE_RIDGE * n as f64;
        }

        let coefficients = solve(xtx, xty)?;
        debug!(kind = %self.kind, bins = n, ?coefficients, "Fitted trend");

        Ok(TrendModel {
            kind: self.kind,
            coefficients,
            knots,
            scale,
        })
    }
}

fn basis(u: f64, knots: &[f64], row: &mut [f64]) {
    row[0] = 1.0;
    row[1] = u;
    for (slot, knot) in row[2..].iter_mut().zip(knots) {
        *slot = (u - knot).max(0.0);
    }
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let p = b.len();
    let norm = a
        .iter()
        .flatten()
        .fold(0.0_f64, |max, v| max.max(v.abs()));
    let tolerance = 1e-12 * norm.max(1.0);

    for col in 0..p {
        let pivot = (col..p)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= tolerance {
            return Err(ForecastError::NumericalError(format!(
                "singular normal equations at column {}",
                col
            )));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for r in (col + 1)..p {
            let factor = a[r][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..p {
                let delta = factor * a[col][k];
                a[r][k] -= delta;
            }
            let delta = factor * b[col];
            b[r] -= delta;
        }
    }

    let mut x = vec![0.0; p];
    for r in (0..p).rev() {
        let tail: f64 = ((r + 1)..p).map(|k| a[r][k] * x[k]).sum();
        x[r] = (b[r] - tail) / a[r][r];
    }
    Ok(x)
}
