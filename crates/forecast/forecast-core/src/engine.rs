//! Forecast engine
//!
//! Fits `y(t) = trend(t) + seasonal(t mod period) + noise` to a dense bin
//! series and projects it forward with prediction intervals.

use crate::confidence::HorizonWideningComputer;
use crate::decomposition::AdditiveDecomposer;
use crate::normal::z_score;
use crate::trend::RegressionTrendFitter;
use forecast_spi::{
    ConfidenceIntervalComputer, DecompositionResult, FitMode, ForecastError, ForecastPoint,
    ForecastTable, Result, TrendFitter, TrendKind, TrendModel,
};
use serde::{Deserialize, Serialize};
use series_spi::{bin_values, Bin};
use tracing::{debug, warn};

/// Default seasonal period in bins (one day of hourly bins)
pub const DEFAULT_PERIOD: usize = 24;

/// Default central confidence level of the intervals
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.8;

/// A fitted additive model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    trend: TrendModel,
    effects: Vec<f64>,
    noise_std_dev: f64,
    period: usize,
    mode: FitMode,
    first_bin_start: i64,
    bin_width_seconds: i64,
    values: Vec<f64>,
}

impl Model {
    pub fn trend(&self) -> &TrendModel {
        &self.trend
    }

    /// One effect per phase; empty for a trend-only model
    pub fn effects(&self) -> &[f64] {
        &self.effects
    }

    /// Sample standard deviation of the in-sample residuals
    pub fn noise_std_dev(&self) -> f64 {
        self.noise_std_dev
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn history_len(&self) -> usize {
        self.values.len()
    }

    pub fn first_bin_start(&self) -> i64 {
        self.first_bin_start
    }

    pub fn bin_width_seconds(&self) -> i64 {
        self.bin_width_seconds
    }

    /// Seasonal effect of bin index `t`
    pub fn seasonal_at(&self, t: usize) -> f64 {
        self.effects.get(t % self.period).copied().unwrap_or(0.0)
    }

    /// Point estimate at bin index `t`, inside or beyond the history
    pub fn value_at(&self, t: usize) -> f64 {
        self.trend.value_at(t as f64) + self.seasonal_at(t)
    }

    /// In-sample fitted values
    pub fn fitted(&self) -> Vec<f64> {
        (0..self.history_len()).map(|t| self.value_at(t)).collect()
    }

    /// Observed minus fitted, per history bin
    pub fn residuals(&self) -> Vec<f64> {
        self.values
            .iter()
            .enumerate()
            .map(|(t, y)| y - self.value_at(t))
            .collect()
    }

    /// The history split into trend, seasonal and residual components
    pub fn decompose(&self) -> DecompositionResult {
        let n = self.history_len();
        DecompositionResult {
            trend: (0..n).map(|t| self.trend.value_at(t as f64)).collect(),
            seasonal: (0..n).map(|t| self.seasonal_at(t)).collect(),
            residual: self.residuals(),
        }
    }
}

/// Fits models and turns them into forecast tables.
///
/// # Example
///
/// ```rust
/// use forecast_core::ForecastEngine;
/// use series_spi::Bin;
///
/// let bins: Vec<Bin> = (0..48)
///     .map(|h| Bin::new(h * 3600, if h % 24 == 9 { 40 } else { 10 }))
///     .collect();
///
/// let engine = ForecastEngine::new(24, 0.8).unwrap();
/// let table = engine.forecast(&bins, 24).unwrap();
/// assert_eq!(table.len(), 72);
/// assert_eq!(table.future()[0].bin_start, 48 * 3600);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEngine {
    period: usize,
    confidence_level: f64,
    trend: TrendKind,
    allow_trend_only: bool,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            trend: TrendKind::Linear,
            allow_trend_only: false,
        }
    }
}

impl ForecastEngine {
    /// Create an engine for a seasonal period (in bins) and a confidence
    /// level in (0, 1).
    pub fn new(period: usize, confidence_level: f64) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::invalid_parameter(
                "period",
                format!("must be at least 2 bins, got {}", period),
            ));
        }
        z_score(confidence_level)?;
        Ok(Self {
            period,
            confidence_level,
            ..Self::default()
        })
    }

    pub fn with_trend(mut self, trend: TrendKind) -> Self {
        self.trend = trend;
        self
    }

    /// Fit a trend-only model instead of failing when the history is
    /// shorter than two periods.
    pub fn with_trend_only_fallback(mut self, allow: bool) -> Self {
        self.allow_trend_only = allow;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn trend_kind(&self) -> TrendKind {
        self.trend
    }

    pub fn allows_trend_only(&self) -> bool {
        self.allow_trend_only
    }

    /// Fit trend, seasonal effects and noise level to evenly spaced bins.
    pub fn fit(&self, bins: &[Bin]) -> Result<Model> {
        let n = bins.len();
        if n < 2 {
            return Err(ForecastError::InsufficientHistory {
                required: 2,
                actual: n,
            });
        }
        let bin_width_seconds = uniform_width(bins)?;
        let values = bin_values(bins);

        let required = self.period.saturating_mul(2);
        let (trend, effects, mode) = if n >= required {
            let fit = AdditiveDecomposer::with_trend(self.trend).fit(&values, self.period)?;
            (fit.trend, fit.effects, FitMode::Full)
        } else if self.allow_trend_only {
            warn!(
                bins = n,
                required,
                period = self.period,
                "History shorter than two periods, fitting trend only"
            );
            let trend = RegressionTrendFitter::new(self.trend).fit_trend(&values)?;
            (trend, Vec::new(), FitMode::TrendOnly)
        } else {
            return Err(ForecastError::InsufficientHistory {
                required,
                actual: n,
            });
        };

        let mut model = Model {
            trend,
            effects,
            noise_std_dev: 0.0,
            period: self.period,
            mode,
            first_bin_start: bins[0].bin_start,
            bin_width_seconds,
            values,
        };
        model.noise_std_dev = sample_std_dev(&model.residuals());
        if !model.noise_std_dev.is_finite() {
            return Err(ForecastError::NumericalError(
                "residual standard deviation is not finite".to_string(),
            ));
        }

        debug!(
            bins = n,
            period = self.period,
            trend = %self.trend,
            mode = %mode,
            noise_std_dev = model.noise_std_dev,
            slope = model.trend.slope(),
            "Fitted forecast model"
        );
        Ok(model)
    }

    /// In-sample fit plus `horizon` projected bins.
    pub fn predict(&self, model: &Model, horizon: usize) -> Result<ForecastTable> {
        let history_len = model.history_len();
        let total = history_len.checked_add(horizon).ok_or_else(|| {
            ForecastError::invalid_parameter("horizon", "history plus horizon overflows")
        })?;

        let starts = (0..total)
            .map(|t| bin_start_at(model, t))
            .collect::<Result<Vec<i64>>>()?;
        let yhat: Vec<f64> = (0..total).map(|t| model.value_at(t)).collect();
        let interval = HorizonWideningComputer::new().compute(
            &yhat,
            model.noise_std_dev,
            history_len,
            self.confidence_level,
        )?;

        let points = starts
            .into_iter()
            .zip(interval.forecast)
            .zip(interval.lower.into_iter().zip(interval.upper))
            .map(|((bin_start, yhat), (lower, upper))| {
                ForecastPoint::new(bin_start, yhat, lower, upper)
            })
            .collect();

        Ok(ForecastTable {
            points,
            history_len,
            horizon,
            bin_width_seconds: model.bin_width_seconds,
            period: model.period,
            confidence_level: self.confidence_level,
            mode: model.mode,
        })
    }

    /// Fit then predict.
    pub fn forecast(&self, bins: &[Bin], horizon: usize) -> Result<ForecastTable> {
        let model = self.fit(bins)?;
        self.predict(&model, horizon)
    }
}

fn uniform_width(bins: &[Bin]) -> Result<i64> {
    let spacing = |pair: &[Bin]| pair[1].bin_start.checked_sub(pair[0].bin_start);
    let width = bins.windows(2).next().and_then(spacing).unwrap_or(0);
    if width <= 0 || bins.windows(2).any(|pair| spacing(pair) != Some(width)) {
        return Err(ForecastError::invalid_parameter(
            "bins",
            "must be increasing and evenly spaced",
        ));
    }
    Ok(width)
}

fn bin_start_at(model: &Model, t: usize) -> Result<i64> {
    i64::try_from(t)
        .ok()
        .and_then(|t| t.checked_mul(model.bin_width_seconds))
        .and_then(|offset| model.first_bin_start.checked_add(offset))
        .ok_or_else(|| {
            ForecastError::NumericalError(format!("bin start overflows at index {}", t))
        })
}

/// Sample standard deviation with an `n - 1` denominator
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two peaks per day, at 09:00 and 20:00, on a gently rising base.
    fn double_peak_bins(days: i64) -> Vec<Bin> {
        (0..days * 24)
            .map(|h| {
                let hour = h % 24;
                let peak = match hour {
                    9 => 120,
                    8 | 10 => 60,
                    20 => 90,
                    19 | 21 => 45,
                    _ => 0,
                };
                Bin::new(
                    1_725_000_000 - 1_725_000_000 % 86_400 + h * 3600,
                    (20 + h / 12 + peak) as u64,
                )
            })
            .collect()
    }

    fn argmax(values: impl Iterator<Item = f64>) -> usize {
        values
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    #[test]
    fn test_forecast_keeps_peak_phase() {
        let bins = double_peak_bins(2);
        let table = ForecastEngine::new(24, 0.8)
            .unwrap()
            .forecast(&bins, 24)
            .unwrap();

        assert_eq!(table.len(), 72);
        assert_eq!(table.mode, FitMode::Full);

        let history_peak = argmax(bins[24..].iter().map(|b| b.sum as f64));
        let future_peak = argmax(table.future().iter().map(|p| p.yhat));
        let distance = (history_peak as i64 - future_peak as i64).abs();
        assert!(distance <= 1, "history {} vs future {}", history_peak, future_peak);
    }

    #[test]
    fn test_future_bin_starts_continue_history() {
        let bins = double_peak_bins(2);
        let table = ForecastEngine::default().forecast(&bins, 3).unwrap();
        let last = bins[bins.len() - 1].bin_start;
        let future: Vec<i64> = table.future().iter().map(|p| p.bin_start).collect();
        assert_eq!(future, vec![last + 3600, last + 7200, last + 10800]);
        for (point, bin) in table.history().iter().zip(&bins) {
            assert_eq!(point.bin_start, bin.bin_start);
        }
    }

    #[test]
    fn test_interval_width_monotonic() {
        let table = ForecastEngine::default()
            .forecast(&double_peak_bins(3), 24)
            .unwrap();
        let history_width = table.history()[0].interval_width();
        for point in table.history() {
            assert!((point.interval_width() - history_width).abs() < 1e-9);
        }
        let mut previous = history_width;
        for point in table.future() {
            assert!(point.interval_width() >= previous);
            previous = point.interval_width();
        }
        for point in &table.points {
            assert!(point.yhat_lower <= point.yhat && point.yhat <= point.yhat_upper);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let bins = double_peak_bins(3);
        let engine = ForecastEngine::default().with_trend(TrendKind::Piecewise { changepoints: 3 });
        assert_eq!(engine.fit(&bins).unwrap(), engine.fit(&bins).unwrap());
        assert_eq!(
            engine.forecast(&bins, 12).unwrap(),
            engine.forecast(&bins, 12).unwrap()
        );
    }

    #[test]
    fn test_short_history_strict_mode_fails() {
        let bins = double_peak_bins(1);
        assert_eq!(
            ForecastEngine::default().fit(&bins),
            Err(ForecastError::InsufficientHistory {
                required: 48,
                actual: 24
            })
        );
    }

    #[test]
    fn test_short_history_trend_only_fallback() {
        let bins = double_peak_bins(1);
        let engine = ForecastEngine::default().with_trend_only_fallback(true);
        let model = engine.fit(&bins).unwrap();
        assert_eq!(model.mode(), FitMode::TrendOnly);
        assert!(model.effects().is_empty());
        assert!((0..48).all(|t| model.seasonal_at(t) == 0.0));

        let table = engine.predict(&model, 6).unwrap();
        assert_eq!(table.mode, FitMode::TrendOnly);
        assert_eq!(table.future().len(), 6);
    }

    #[test]
    fn test_trend_only_with_huge_period() {
        let bins: Vec<Bin> = (0..10).map(|i| Bin::new(i * 3600, 5 + i as u64)).collect();
        let engine = ForecastEngine::new(usize::MAX / 4, 0.8)
            .unwrap()
            .with_trend_only_fallback(true);
        let model = engine.fit(&bins).unwrap();
        assert_eq!(model.mode(), FitMode::TrendOnly);
        assert!(model.effects().is_empty());

        let table = engine.predict(&model, 3).unwrap();
        assert_eq!(table.len(), 13);
        assert!((table.points[10].yhat - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_fewer_than_two_bins_always_fails() {
        let engine = ForecastEngine::default().with_trend_only_fallback(true);
        assert_eq!(
            engine.fit(&[Bin::new(0, 1)]),
            Err(ForecastError::InsufficientHistory {
                required: 2,
                actual: 1
            })
        );
        assert!(engine.fit(&[]).is_err());
    }

    #[test]
    fn test_uneven_bins_rejected() {
        let bins = vec![Bin::new(0, 1), Bin::new(3600, 2), Bin::new(9000, 3)];
        let engine = ForecastEngine::new(2, 0.8).unwrap();
        assert!(matches!(
            engine.fit(&bins),
            Err(ForecastError::InvalidParameter { .. })
        ));
        let reversed = vec![Bin::new(3600, 1), Bin::new(0, 2)];
        assert!(engine.fit(&reversed).is_err());
    }

    #[test]
    fn test_invalid_engine_parameters() {
        assert!(ForecastEngine::new(1, 0.8).is_err());
        assert!(ForecastEngine::new(24, 0.0).is_err());
        assert!(ForecastEngine::new(24, 1.0).is_err());
    }

    #[test]
    fn test_model_components() {
        let bins = double_peak_bins(2);
        let model = ForecastEngine::default().fit(&bins).unwrap();
        assert_eq!(model.history_len(), 48);
        assert_eq!(model.effects().len(), 24);
        assert!(model.effects().iter().sum::<f64>().abs() < 1e-9);

        let parts = model.decompose();
        for ((rebuilt, bin), fitted) in parts.reconstruct().iter().zip(&bins).zip(model.fitted()) {
            assert!((rebuilt - bin.sum as f64).abs() < 1e-9);
            assert!(fitted.is_finite());
        }

        let residuals = model.residuals();
        let mean = residuals.iter().sum::<f64>() / 48.0;
        let expected = (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 47.0).sqrt();
        assert!((model.noise_std_dev() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_fit_has_zero_width() {
        let bins: Vec<Bin> = (0..8).map(|i| Bin::new(i * 60, 10 + 2 * i as u64)).collect();
        let table = ForecastEngine::new(2, 0.8)
            .unwrap()
            .forecast(&bins, 2)
            .unwrap();
        for point in &table.points {
            assert!(point.interval_width() < 1e-6);
        }
        assert!((table.future()[1].yhat - 28.0).abs() < 1e-6);
    }

    #[test]
    fn test_bin_start_overflow() {
        let bins = vec![Bin::new(i64::MAX - 10, 1), Bin::new(i64::MAX - 5, 2)];
        let engine = ForecastEngine::new(2, 0.8)
            .unwrap()
            .with_trend_only_fallback(true);
        let model = engine.fit(&bins).unwrap();
        assert!(matches!(
            engine.predict(&model, 5),
            Err(ForecastError::NumericalError(_))
        ));
    }
}
