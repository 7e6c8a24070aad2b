//! Configuration Module
//!
//! Loads the benchmark binary's settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};

/// Benchmark and demo configuration parameters.
///
/// Unset variables fall back to defaults; set but unparsable ones are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Eviction policy under test
    pub policy: EvictionPolicy,
    /// Capacity of the walkthrough cache, zero or negative stores nothing
    pub capacity: isize,
    /// Cache capacities timed by the benchmark, in order
    pub bench_sizes: Vec<usize>,
    /// Lookups timed for every size
    pub bench_reads: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `lru` or `lfu` (default: lfu)
    /// - `CACHE_CAPACITY` - Walkthrough cache capacity (default: 3)
    /// - `BENCH_SIZES` - Comma-separated capacities (default: 1000,2000,4000,8000,16000)
    /// - `BENCH_READS` - Lookups per size (default: 100)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = match lookup("CACHE_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.policy,
        };

        let bench_sizes = match lookup("BENCH_SIZES") {
            Some(raw) => parse_sizes(&raw)?,
            None => defaults.bench_sizes,
        };

        Ok(Self {
            policy,
            capacity: parse_var(&lookup, "CACHE_CAPACITY", defaults.capacity)?,
            bench_sizes,
            bench_reads: parse_var(&lookup, "BENCH_READS", defaults.bench_reads)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: EvictionPolicy::Lfu,
            capacity: 3,
            bench_sizes: vec![1000, 2000, 4000, 8000, 16000],
            bench_reads: 100,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CacheError::InvalidConfig(format!("{}={}", name, raw))),
        None => Ok(default),
    }
}

/// Parses a comma-separated list of positive sizes.
fn parse_sizes(raw: &str) -> Result<Vec<usize>> {
    let invalid = || CacheError::InvalidConfig(format!("BENCH_SIZES={}", raw));

    let sizes = raw
        .split(',')
        .map(|part| match part.trim().parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(invalid()),
        })
        .collect::<Result<Vec<_>>>()?;

    if sizes.is_empty() {
        return Err(invalid());
    }
    Ok(sizes)
}
