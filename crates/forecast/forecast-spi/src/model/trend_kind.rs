//! Trend shape selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the fitted trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendKind {
    /// Straight line `a + b·t`
    #[default]
    Linear,
    /// Line plus hinge terms at evenly spaced changepoints
    Piecewise { changepoints: usize },
}

impl TrendKind {
    /// Number of regression coefficients
    pub fn parameters(&self) -> usize {
        match self {
            TrendKind::Linear => 2,
            TrendKind::Piecewise { changepoints } => 2 + changepoints,
        }
    }
}

impl fmt::Display for TrendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendKind::Linear => write!(f, "linear"),
            TrendKind::Piecewise { changepoints } => write!(f, "piecewise:{}", changepoints),
        }
    }
}

impl FromStr for TrendKind {
    type Err = String;

    /// Accepts `linear`, `piecewise` (one changepoint) or `piecewise:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.split_once(':') {
            None if lower == "linear" => Ok(TrendKind::Linear),
            None if lower == "piecewise" => Ok(TrendKind::Piecewise { changepoints: 1 }),
            Some(("piecewise", n)) => n
                .trim()
                .parse::<usize>()
                .map(|changepoints| TrendKind::Piecewise { changepoints })
                .map_err(|_| format!("Invalid changepoint count: {}", n)),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_kind_from_str() {
        assert_eq!("linear".parse::<TrendKind>().unwrap(), TrendKind::Linear);
        assert_eq!(
            "Piecewise:3".parse::<TrendKind>().unwrap(),
            TrendKind::Piecewise { changepoints: 3 }
        );
        assert_eq!(
            "piecewise".parse::<TrendKind>().unwrap(),
            TrendKind::Piecewise { changepoints: 1 }
        );
        assert!("piecewise:x".parse::<TrendKind>().is_err());
        assert!("cubic".parse::<TrendKind>().is_err());
    }

    #[test]
    fn test_trend_kind_display_roundtrip() {
        for kind in [TrendKind::Linear, TrendKind::Piecewise { changepoints: 4 }] {
            assert_eq!(kind.to_string().parse::<TrendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_trend_kind_serde() {
        let json = serde_json::to_string(&TrendKind::Piecewise { changepoints: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"piecewise","changepoints":2}"#);
        let kind: TrendKind = serde_json::from_str(r#"{"kind":"linear"}"#).unwrap();
        assert_eq!(kind, TrendKind::Linear);
    }

    #[test]
    fn test_trend_kind_parameters() {
        assert_eq!(TrendKind::Linear.parameters(), 2);
        assert_eq!(TrendKind::Piecewise { changepoints: 3 }.parameters(), 5);
    }
}
