//! Report DTOs
//!
//! Defines the JSON documents printed by the benchmark binary.

use serde::Serialize;

use crate::cache::{CacheStats, EvictionPolicy};

/// Mean cost of each operation kind for one cache size.
#[derive(Debug, Clone, Serialize)]
pub struct SizeSample {
    /// Capacity of the cache under test
    pub size: usize,
    /// Nanoseconds per insertion while filling an empty cache
    pub put_ns: f64,
    /// Nanoseconds per lookup of a present key
    pub get_ns: f64,
    /// Nanoseconds per insertion into a full cache (one eviction each)
    pub evict_ns: f64,
    /// Cache counters after the run
    pub stats: CacheStats,
}

/// Slowest over fastest per-operation time across all sizes.
///
/// Values near 1.0 mean cost did not grow with cache size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceRatios {
    pub put: f64,
    pub get: f64,
    pub evict: f64,
}

impl VarianceRatios {
    pub fn from_samples(samples: &[SizeSample]) -> Self {
        Self {
            put: variance_ratio(samples.iter().map(|s| s.put_ns)),
            get: variance_ratio(samples.iter().map(|s| s.get_ns)),
            evict: variance_ratio(samples.iter().map(|s| s.evict_ns)),
        }
    }
}

/// Timing run over a series of cache sizes.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub policy: EvictionPolicy,
    pub samples: Vec<SizeSample>,
    pub variance: VarianceRatios,
    /// Report timestamp in ISO 8601 format
    pub generated_at: String,
}

impl BenchReport {
    /// Creates a new BenchReport with current timestamp
    pub fn new(policy: EvictionPolicy, samples: Vec<SizeSample>) -> Self {
        Self {
            policy,
            variance: VarianceRatios::from_samples(&samples),
            samples,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Outcome of the scripted put/get sequence run before the timings.
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughReport {
    pub policy: EvictionPolicy,
    pub capacity: isize,
    /// Keys still present afterwards, in insertion order
    pub survivors: Vec<u64>,
    /// Keys that were inserted but are gone afterwards
    pub evicted: Vec<u64>,
    pub stats: CacheStats,
}

/// Ratio of the largest to the smallest value, 1.0 when undefined.
fn variance_ratio(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, 0.0f64), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if min > 0.0 && min.is_finite() {
        max / min
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(size: usize, put_ns: f64, get_ns: f64, evict_ns: f64) -> SizeSample {
        SizeSample {
            size,
            put_ns,
            get_ns,
            evict_ns,
            stats: CacheStats::new(),
        }
    }

    #[test]
    fn test_variance_ratio() {
        assert_eq!(variance_ratio([2.0, 4.0, 3.0].into_iter()), 2.0);
        assert_eq!(variance_ratio(std::iter::empty()), 1.0);
        assert_eq!(variance_ratio([0.0, 5.0].into_iter()), 1.0);
    }

    #[test]
    fn test_variance_from_samples() {
        let samples = vec![sample(10, 10.0, 5.0, 20.0), sample(20, 15.0, 5.0, 10.0)];

        let variance = VarianceRatios::from_samples(&samples);
        assert_eq!(
            variance,
            VarianceRatios {
                put: 1.5,
                get: 1.0,
                evict: 2.0,
            }
        );
    }

    #[test]
    fn test_bench_report_serialization() {
        let report = BenchReport::new(EvictionPolicy::Lru, vec![sample(10, 1.0, 1.0, 1.0)]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["policy"], "lru");
        assert_eq!(json["samples"][0]["size"], 10);
        assert!(json["generated_at"].as_str().is_some());
        assert!(json["variance"]["evict"].is_number());
    }
}
