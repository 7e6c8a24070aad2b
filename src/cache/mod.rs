//! Cache Module
//!
//! Capacity-bounded in-memory caches with LRU and LFU eviction.
//!
//! Both caches are single-owner structures: every operation runs to
//! completion on the caller's thread. Wrap a cache in a mutex to share it.

mod entry;
mod lfu;
mod list;
mod lru;
mod policy;
mod stats;
mod traits;


// Re-export public types
pub(crate) use entry::{LfuEntry, LruEntry};
pub use lfu::LfuCache;
pub use list::{NodeId, RecencyList};
pub use lru::LruCache;
pub use policy::EvictionPolicy;
pub use stats::CacheStats;
pub use traits::BoundedCache;

/// Maps a signed capacity onto the number of entries a cache may hold.
///
/// Zero and negative capacities both mean "accept nothing".
pub(crate) fn capacity_from(capacity: isize) -> usize {
    usize::try_from(capacity).unwrap_or(0)
}
