//! Trait for confidence interval computation

use crate::error::Result;
use crate::model::ConfidenceInterval;

/// Trait for confidence interval computation
pub trait ConfidenceIntervalComputer: Send + Sync {
    /// Compute intervals around `forecast`.
    ///
    /// The first `history_len` values are in-sample fits; the rest are
    /// projections, whose intervals may widen with forecast distance.
    fn compute(
        &self,
        forecast: &[f64],
        noise_std_dev: f64,
        history_len: usize,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock implementation: constant band of one standard deviation
    struct FixedBand;

    impl ConfidenceIntervalComputer for FixedBand {
        fn compute(
            &self,
            forecast: &[f64],
            noise_std_dev: f64,
            _history_len: usize,
            confidence_level: f64,
        ) -> Result<ConfidenceInterval> {
            Ok(ConfidenceInterval {
                forecast: forecast.to_vec(),
                lower: forecast.iter().map(|f| f - noise_std_dev).collect(),
                upper: forecast.iter().map(|f| f + noise_std_dev).collect(),
                confidence_level,
            })
        }
    }

    #[test]
    fn test_trait_object_usage() {
        let computer: Box<dyn ConfidenceIntervalComputer> = Box::new(FixedBand);
        let ci = computer.compute(&[1.0, 2.0], 0.5, 1, 0.8).unwrap();
        assert_eq!(ci.lower, vec![0.5, 1.5]);
        assert_eq!(ci.upper, vec![1.5, 2.5]);
        assert_eq!(ci.confidence_level, 0.8);
    }
}
