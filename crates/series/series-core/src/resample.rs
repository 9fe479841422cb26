//! Fixed-width resampling
//!
//! Buckets irregular observations into contiguous bins by summation.

use series_spi::{Bin, Observation, Result, SeriesError};

/// Upper bound on the number of bins a single resample may allocate.
pub const DEFAULT_MAX_BINS: usize = 1_000_000;

/// Sums observations into bins of a fixed width.
///
/// # Example
///
/// ```rust
/// use series_core::resample::Resampler;
/// use series_spi::{Bin, Observation};
///
/// let observations = vec![
///     Observation::new(0, 5),
///     Observation::new(3600, 7),
///     Observation::new(7200, 0),
/// ];
/// let bins = Resampler::new(3600).unwrap().resample(&observations).unwrap();
/// assert_eq!(bins, vec![Bin::new(0, 5), Bin::new(3600, 7), Bin::new(7200, 0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    bin_width: i64,
    max_bins: usize,
}

impl Resampler {
    /// Create a resampler with `bin_width_seconds` wide bins.
    pub fn new(bin_width_seconds: i64) -> Result<Self> {
        if bin_width_seconds <= 0 {
            return Err(SeriesError::invalid_parameter(
                "bin_width_seconds",
                format!("must be positive, got {}", bin_width_seconds),
            ));
        }
        Ok(Self {
            bin_width: bin_width_seconds,
            max_bins: DEFAULT_MAX_BINS,
        })
    }

    /// Limit the number of bins a resample may produce.
    pub fn with_max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = max_bins;
        self
    }

    pub fn bin_width(&self) -> i64 {
        self.bin_width
    }

    pub fn max_bins(&self) -> usize {
        self.max_bins
    }

    /// Bin boundary at or before `timestamp`.
    pub fn floor(&self, timestamp: i64) -> i128 {
        let w = i128::from(self.bin_width);
        i128::from(timestamp).div_euclid(w) * w
    }

    /// Bucket `observations` into a dense, gap-filled bin sequence.
    ///
    /// The first bin starts at the boundary at or before the earliest
    /// timestamp; the last bin is the one containing the latest timestamp.
    /// Input order does not matter.
    pub fn resample(&self, observations: &[Observation]) -> Result<Vec<Bin>> {
        let (min_ts, max_ts) = observations
            .iter()
            .map(|o| o.timestamp)
            .fold(None, |acc: Option<(i64, i64)>, ts| match acc {
                None => Some((ts, ts)),
                Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
            })
            .ok_or(SeriesError::EmptySeries)?;

        let width = i128::from(self.bin_width);
        let series_start = self.floor(min_ts);
        let last_start = self.floor(max_ts);
        let count = (last_start - series_start) / width + 1;
        if count > self.max_bins as i128 {
            return Err(SeriesError::TooManyBins {
                bins: count as u128,
                limit: self.max_bins,
            });
        }
        let start = i64::try_from(series_start).map_err(|_| {
            SeriesError::invalid_parameter("timestamp", "first bin boundary is out of range")
        })?;

        let mut sums = vec![0u64; count as usize];
        for obs in observations {
            let index = ((i128::from(obs.timestamp) - series_start) / width) as usize;
            sums[index] = sums[index].saturating_add(obs.value);
        }

        Ok(sums
            .into_iter()
            .enumerate()
            .map(|(i, sum)| Bin::new(start + i as i64 * self.bin_width, sum))
            .collect())
    }
}

/// Resample with the default bin limit.
pub fn resample(observations: &[Observation], bin_width_seconds: i64) -> Result<Vec<Bin>> {
    Resampler::new(bin_width_seconds)?.resample(observations)
}
