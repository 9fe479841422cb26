//! Synthetic traffic generation
//!
//! Draws hosts uniformly from the usable addresses of an IPv4 CIDR block and
//! hit times from a daily profile with a morning and an evening peak, then
//! records each hit through a [`CounterWriter`].

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use series_facade::{CounterStore, CounterWriter, Result, SeriesError};
use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

const SECONDS_PER_HOUR: i64 = 3600;

/// An IPv4 network in CIDR notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: u32,
    prefix: u8,
}

impl Cidr {
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Addresses in the block minus the network and broadcast addresses
    pub fn usable_hosts(&self) -> u64 {
        let size = 1u64 << (32 - u32::from(self.prefix));
        size.saturating_sub(2)
    }

    /// The `index`-th usable host
    pub fn host(&self, index: u64) -> Option<Ipv4Addr> {
        if index >= self.usable_hosts() {
            return None;
        }
        let offset = u32::try_from(index + 1).ok()?;
        self.network.checked_add(offset).map(Ipv4Addr::from)
    }
}

impl FromStr for Cidr {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("Invalid CIDR '{}': missing '/'", s))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|e| format!("Invalid CIDR '{}': {}", s, e))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|e| format!("Invalid CIDR '{}': {}", s, e))?;
        if prefix > 30 {
            return Err(format!(
                "Invalid CIDR '{}': /{} has no usable hosts",
                s, prefix
            ));
        }
        let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
        Ok(Self {
            network: u32::from(addr) & mask,
            prefix,
        })
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

/// Relative traffic for an hour of the day: a base level with peaks around
/// 09:00 and 20:00.
pub fn daily_profile(hour_of_day: i64) -> f64 {
    let bump = |center: f64, height: f64| {
        let d = hour_of_day as f64 - center;
        height * (-d * d / 2.0).exp()
    };
    1.0 + bump(9.0, 4.0) + bump(20.0, 3.0)
}

/// Parameters for one synthetic load run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub cidr: Cidr,
    pub records: u64,
    pub hours: i64,
    /// First second of the simulated window; floored to the hour
    pub start: i64,
}

/// What a simulation wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub records: u64,
    pub hosts: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
}

impl Simulation {
    /// Seconds just past the simulated window
    pub fn end(&self) -> i64 {
        self.window_start() + self.hours * SECONDS_PER_HOUR
    }

    fn window_start(&self) -> i64 {
        self.start.div_euclid(SECONDS_PER_HOUR) * SECONDS_PER_HOUR
    }

    /// Write `records` hits into `store`.
    pub fn run<S: CounterStore, R: Rng>(
        &self,
        store: &mut S,
        rng: &mut R,
    ) -> Result<SimulationReport> {
        if self.hours <= 0 {
            return Err(SeriesError::invalid_parameter("hours", "must be positive"));
        }
        let window_start = self.window_start();
        let first_hour = window_start / SECONDS_PER_HOUR;
        let weights: Vec<f64> = (0..self.hours)
            .map(|h| daily_profile((first_hour + h).rem_euclid(24)))
            .collect();
        let hours = WeightedIndex::new(&weights)
            .map_err(|e| SeriesError::invalid_parameter("hours", e.to_string()))?;
        let usable = self.cidr.usable_hosts();

        let mut writer = CounterWriter::new(store);
        let mut hosts = BTreeSet::new();
        let mut first_timestamp: Option<i64> = None;
        let mut last_timestamp: Option<i64> = None;

        for _ in 0..self.records {
            let index = rng.gen_range(0..usable);
            let host = self.cidr.host(index).ok_or_else(|| {
                SeriesError::invalid_parameter("cidr", format!("host index {} out of range", index))
            })?;
            let hour = hours.sample(rng) as i64;
            let timestamp =
                window_start + hour * SECONDS_PER_HOUR + rng.gen_range(0..SECONDS_PER_HOUR);

            writer.record(&host.to_string(), timestamp)?;
            hosts.insert(host);
            first_timestamp = Some(first_timestamp.map_or(timestamp, |t| t.min(timestamp)));
            last_timestamp = Some(last_timestamp.map_or(timestamp, |t| t.max(timestamp)));
        }

        Ok(SimulationReport {
            records: writer.written(),
            hosts: hosts.len(),
            first_timestamp,
            last_timestamp,
        })
    }
}
