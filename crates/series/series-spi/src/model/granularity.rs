//! Bin width presets.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Common bin widths for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    /// 1 minute bins
    Minute,
    /// 1 hour bins
    Hour,
    /// 1 day bins
    Day,
}

impl Granularity {
    /// Width of one bin in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            Granularity::Minute => 60,
            Granularity::Hour => 3_600,
            Granularity::Day => 86_400,
        }
    }

    /// Short label used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Granularity::Minute => "1 Minute",
            Granularity::Hour => "1 Hour",
            Granularity::Day => "1 Day",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "1m" => Ok(Granularity::Minute),
            "hour" | "hourly" | "1h" => Ok(Granularity::Hour),
            "day" | "daily" | "1d" => Ok(Granularity::Day),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}
