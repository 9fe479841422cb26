//! Trait for time series decomposition

use crate::error::Result;
use crate::model::DecompositionResult;

/// Trait for time series decomposition
pub trait Decomposer: Send + Sync {
    /// Decompose a time series into trend, seasonal, and residual components
    fn decompose(&self, data: &[f64], period: usize) -> Result<DecompositionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;

    /// Mock implementation: mean as trend, phase means as seasonality
    struct MeanDecomposer;

    impl Decomposer for MeanDecomposer {
        fn decompose(&self, data: &[f64], period: usize) -> Result<DecompositionResult> {
            if data.is_empty() || period == 0 {
                return Err(ForecastError::InsufficientHistory {
                    required: period.max(1),
                    actual: data.len(),
                });
            }
            let mean = data.iter().sum::<f64>() / data.len() as f64;
            let trend = vec![mean; data.len()];
            let seasonal: Vec<f64> = (0..data.len())
                .map(|i| {
                    let phase: Vec<f64> =
                        data.iter().skip(i % period).step_by(period).copied().collect();
                    phase.iter().sum::<f64>() / phase.len() as f64 - mean
                })
                .collect();
            let residual = data
                .iter()
                .zip(&trend)
                .zip(&seasonal)
                .map(|((d, t), s)| d - t - s)
                .collect();
            Ok(DecompositionResult {
                trend,
                seasonal,
                residual,
            })
        }
    }

    #[test]
    fn test_decompose_reconstructs_input() {
        let data = vec![1.0, 5.0, 2.0, 6.0, 3.0, 7.0];
        let result = MeanDecomposer.decompose(&data, 2).unwrap();
        let rebuilt = result.reconstruct();
        for (a, b) in rebuilt.iter().zip(&data) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_decompose_empty_fails() {
        let decomposer: &dyn Decomposer = &MeanDecomposer;
        assert!(decomposer.decompose(&[], 2).is_err());
    }
}
