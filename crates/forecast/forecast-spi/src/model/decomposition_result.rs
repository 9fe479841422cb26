//! Decomposition result model

use serde::{Deserialize, Serialize};

/// Result of time series decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Trend component
    pub trend: Vec<f64>,
    /// Seasonal component
    pub seasonal: Vec<f64>,
    /// Residual component
    pub residual: Vec<f64>,
}

impl DecompositionResult {
    /// Number of decomposed points
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    /// Whether nothing was decomposed
    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Sum the components back into the original series
    pub fn reconstruct(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.seasonal)
            .zip(&self.residual)
            .map(|((t, s), r)| t + s + r)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_adds_components() {
        let result = DecompositionResult {
            trend: vec![10.0, 11.0, 12.0],
            seasonal: vec![1.0, -1.0, 0.0],
            residual: vec![0.5, 0.0, -0.5],
        };
        assert_eq!(result.len(), 3);
        assert_eq!(result.reconstruct(), vec![11.5, 10.0, 11.5]);
    }

    #[test]
    fn test_empty_decomposition() {
        let result = DecompositionResult {
            trend: vec![],
            seasonal: vec![],
            residual: vec![],
        };
        assert!(result.is_empty());
        assert!(result.reconstruct().is_empty());
    }
}
