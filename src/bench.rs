//! Timing Harness
//!
//! Measures per-operation cost at growing cache sizes to show that `put`,
//! `get` and evicting inserts stay constant time.

use std::hint::black_box;
use std::time::Instant;

use tracing::debug;

use crate::cache::EvictionPolicy;
use crate::config::Config;
use crate::models::{BenchReport, SizeSample, WalkthroughReport};

/// Keys inserted by the walkthrough, in order
const WALKTHROUGH_KEYS: [u64; 4] = [1, 2, 3, 4];

/// Runs the timing harness for every configured size.
pub fn run(config: &Config) -> BenchReport {
    let samples = config
        .bench_sizes
        .iter()
        .map(|&size| sample(config.policy, size, config.bench_reads))
        .collect();

    BenchReport::new(config.policy, samples)
}

/// Times one cache of capacity `size`.
///
/// Fills the cache with `size` keys, performs `reads` lookups over them,
/// then inserts `size` fresh keys so that every insertion evicts.
pub fn sample(policy: EvictionPolicy, size: usize, reads: usize) -> SizeSample {
    let capacity = isize::try_from(size).unwrap_or(isize::MAX);
    let mut cache = policy.build::<u64, u64>(capacity);
    let offset = size as u64;

    let put_ns = time_per_op(size, |i| cache.put(i, i));
    let get_ns = time_per_op(reads, |i| {
        black_box(cache.get(&(i % offset.max(1))));
    });
    let evict_ns = time_per_op(size, |i| cache.put(offset + i, i));

    let stats = cache.stats();
    debug!(
        %policy,
        size,
        put_ns,
        get_ns,
        evict_ns,
        evictions = stats.evictions,
        "timed cache size"
    );

    SizeSample {
        size,
        put_ns,
        get_ns,
        evict_ns,
        stats,
    }
}

/// Replays the reference access pattern on a small cache.
///
/// Inserts keys 1 to 3, reads key 1 twice and key 2 once, then inserts
/// key 4. At capacity 3 both policies give up key 3.
pub fn walkthrough(policy: EvictionPolicy, capacity: isize) -> WalkthroughReport {
    let mut cache = policy.build::<u64, String>(capacity);

    for key in &WALKTHROUGH_KEYS[..3] {
        cache.put(*key, format!("value{}", key));
    }
    cache.get(&1);
    cache.get(&1);
    cache.get(&2);
    cache.put(WALKTHROUGH_KEYS[3], format!("value{}", WALKTHROUGH_KEYS[3]));

    let (survivors, evicted): (Vec<u64>, Vec<u64>) = WALKTHROUGH_KEYS
        .iter()
        .copied()
        .partition(|key| cache.contains_key(key));

    WalkthroughReport {
        policy,
        capacity,
        survivors,
        evicted,
        stats: cache.stats(),
    }
}

/// Mean nanoseconds per call of `op` over `count` calls.
fn time_per_op(count: usize, mut op: impl FnMut(u64)) -> f64 {
    if count == 0 {
        return 0.0;
    }

    let start = Instant::now();
    for i in 0..count as u64 {
        op(i);
    }
    start.elapsed().as_nanos() as f64 / count as f64
}
