//! Cache Trait Module
//!
//! Common contract shared by every eviction policy.

use crate::cache::{CacheStats, EvictionPolicy};

// == Bounded Cache ==
/// A map holding at most `capacity` keys, evicting one entry per insertion
/// of a new key once full.
///
/// Operations never fail. A cache built with a zero or negative capacity
/// accepts nothing: `put` is a no-op and every `get` misses.
pub trait BoundedCache<K, V> {
    /// Returns the value for `key`, counting the lookup as an access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Stores `value` under `key`, evicting one entry if a new key would
    /// exceed capacity.
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key` without counting an access.
    fn peek(&self, key: &K) -> Option<&V>;

    fn contains_key(&self, key: &K) -> bool;

    /// Removes `key` outright; this is not counted as an eviction.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes and returns the entry the policy would evict next.
    fn evict(&mut self) -> Option<(K, V)>;

    /// Number of distinct keys currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Empties the cache, leaving it as if freshly constructed.
    fn clear(&mut self);

    fn stats(&self) -> CacheStats;

    fn policy(&self) -> EvictionPolicy;
}
