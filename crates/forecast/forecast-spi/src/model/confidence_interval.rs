//! Confidence interval model

use serde::{Deserialize, Serialize};

/// Confidence interval result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Point forecast
    pub forecast: Vec<f64>,
    /// Lower bound of confidence interval
    pub lower: Vec<f64>,
    /// Upper bound of confidence interval
    pub upper: Vec<f64>,
    /// Confidence level (e.g., 0.8 for 80%)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Number of points covered
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    /// Whether the interval covers no points
    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }

    /// Width of the interval at each point
    pub fn widths(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(u, l)| u - l)
            .collect()
    }
}
