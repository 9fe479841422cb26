//! Additive decomposition by trend regression and phase means
//!
//! `Y = T + S + R`, where `T` is a least-squares trend over the bin index,
//! `S` repeats one effect per seasonal phase, and `R` is what remains.

use crate::trend::RegressionTrendFitter;
use forecast_spi::{
    DecompositionResult, Decomposer, ForecastError, Result, TrendFitter, TrendKind, TrendModel,
};
use serde::{Deserialize, Serialize};

/// Trend, per-phase effects and the in-sample components they produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveFit {
    pub trend: TrendModel,
    pub effects: Vec<f64>,
    pub components: DecompositionResult,
}

/// Additive decomposition: Y = T + S + R
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdditiveDecomposer {
    fitter: RegressionTrendFitter,
}

impl AdditiveDecomposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different trend shape
    pub fn with_trend(kind: TrendKind) -> Self {
        Self {
            fitter: RegressionTrendFitter::new(kind),
        }
    }

    pub fn trend_kind(&self) -> TrendKind {
        self.fitter.kind()
    }

    /// Fit trend and seasonal effects.
    ///
    /// Needs at least two full periods so every phase is estimated from more
    /// than one cycle.
    pub fn fit(&self, data: &[f64], period: usize) -> Result<AdditiveFit> {
        if period == 0 {
            return Err(ForecastError::invalid_parameter(
                "period",
                "must be at least 1",
            ));
        }
        let required = period.saturating_mul(2);
        if data.len() < required {
            return Err(ForecastError::InsufficientHistory {
                required,
                actual: data.len(),
            });
        }

        let trend = self.fitter.fit_trend(data)?;
        let trend_values: Vec<f64> = (0..data.len()).map(|t| trend.value_at(t as f64)).collect();
        let detrended: Vec<f64> = data
            .iter()
            .zip(&trend_values)
            .map(|(y, t)| y - t)
            .collect();

        let effects = seasonal_effects(&detrended, period);
        let seasonal: Vec<f64> = (0..data.len()).map(|t| effects[t % period]).collect();
        let residual = detrended
            .iter()
            .zip(&seasonal)
            .map(|(d, s)| d - s)
            .collect();

        Ok(AdditiveFit {
            trend,
            effects,
            components: DecompositionResult {
                trend: trend_values,
                seasonal,
                residual,
            },
        })
    }
}

impl Decomposer for AdditiveDecomposer {
    fn decompose(&self, data: &[f64], period: usize) -> Result<DecompositionResult> {
        self.fit(data, period).map(|fit| fit.components)
    }
}

/// Mean detrended value per phase, shifted so the effects sum to zero.
///
/// Phases with no samples get an effect of zero before re-centering.
pub fn seasonal_effects(detrended: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }
    let mut effects: Vec<f64> = (0..period)
        .map(|phase| {
            let values: Vec<f64> = detrended.iter().skip(phase).step_by(period).copied().collect();
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        })
        .collect();

    // Normalize seasonal effects to sum to 0
    let mean_effect = effects.iter().sum::<f64>() / period as f64;
    for effect in &mut effects {
        *effect -= mean_effect;
    }
    effects
}
