//! How much of the additive model could be fitted

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which components a fitted model carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Trend plus seasonal effects
    #[default]
    Full,
    /// Trend only; the history was shorter than two seasonal periods
    TrendOnly,
}

impl FitMode {
    /// Get the canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            FitMode::Full => "full",
            FitMode::TrendOnly => "trend_only",
        }
    }

    /// Whether seasonal effects were estimated
    pub fn is_seasonal(&self) -> bool {
        matches!(self, FitMode::Full)
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
