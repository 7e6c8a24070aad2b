//! Bounded Cache - capacity-bounded in-memory caches
//!
//! Provides LRU and LFU caches with amortized O(1) `get`, `put` and eviction,
//! plus a small timing harness used by the `bounded_cache` binary.

pub mod bench;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{BoundedCache, CacheStats, EvictionPolicy, LfuCache, LruCache};
pub use config::Config;
pub use error::{CacheError, Result};
