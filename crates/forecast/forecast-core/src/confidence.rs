//! Confidence interval implementations
//!
//! Provides prediction intervals that stay flat over the history and widen
//! with distance into the forecast horizon.

use crate::normal::z_score;
use forecast_spi::{ConfidenceInterval, ConfidenceIntervalComputer, ForecastError, Result};

/// Build symmetric intervals from per-point standard errors
pub fn from_standard_errors(
    forecast: &[f64],
    std_errors: &[f64],
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    if forecast.len() != std_errors.len() {
        return Err(ForecastError::invalid_parameter(
            "std_errors",
            format!(
                "expected {} values, got {}",
                forecast.len(),
                std_errors.len()
            ),
        ));
    }
    let z = z_score(confidence_level)?;

    let lower = forecast
        .iter()
        .zip(std_errors)
        .map(|(&f, &se)| f - z * se)
        .collect();
    let upper = forecast
        .iter()
        .zip(std_errors)
        .map(|(&f, &se)| f + z * se)
        .collect();

    Ok(ConfidenceInterval {
        forecast: forecast.to_vec(),
        lower,
        upper,
        confidence_level,
    })
}

/// Standard error per point: `sigma · sqrt(1 + k)` with `k = 0` over the
/// history and `k = 1, 2, 3, …` for successive future points.
pub fn horizon_std_errors(noise_std_dev: f64, len: usize, history_len: usize) -> Vec<f64> {
    let last_observed = history_len.saturating_sub(1);
    (0..len)
        .map(|t| {
            let steps_ahead = if t < history_len { 0 } else { t - last_observed };
            noise_std_dev * (1.0 + steps_ahead as f64).sqrt()
        })
        .collect()
}

/// Interval computer whose bands widen with forecast distance
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizonWideningComputer;

impl HorizonWideningComputer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for HorizonWideningComputer {
    fn compute(
        &self,
        forecast: &[f64],
        noise_std_dev: f64,
        history_len: usize,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        if !noise_std_dev.is_finite() || noise_std_dev < 0.0 {
            return Err(ForecastError::invalid_parameter(
                "noise_std_dev",
                format!("must be finite and non-negative, got {}", noise_std_dev),
            ));
        }
        let std_errors = horizon_std_errors(noise_std_dev, forecast.len(), history_len);
        from_standard_errors(forecast, &std_errors, confidence_level)
    }
}
