//! LRU Cache Module
//!
//! Capacity-bounded map that evicts the least recently used entry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{
    capacity_from, BoundedCache, CacheStats, EvictionPolicy, LruEntry, RecencyList,
};

// == LRU Cache ==
/// Bounded map with recency-ordered eviction.
///
/// Both `get` and `put` mark a key as most recently used. When a new key
/// arrives at capacity, the key that has gone longest without being read
/// or written is evicted first.
///
/// ```
/// use bounded_cache::cache::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1);
/// cache.put(3, "c");
///
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some(&"a"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, LruEntry<V>>,
    /// Keys from least to most recently used
    order: RecencyList<K>,
    stats: CacheStats,
    /// Maximum number of entries, 0 accepts nothing
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// A zero or negative `capacity` yields a cache that stores nothing.
    pub fn new(capacity: isize) -> Self {
        Self {
            entries: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity: capacity_from(capacity),
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss changes nothing but the miss counter.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(entry) => {
                self.order.move_to_back(entry.node);
                self.stats.record_hit();
                Some(&entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a value, overwriting and refreshing an existing key.
    ///
    /// A new key at capacity first evicts the least recently used entry.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            self.order.move_to_back(entry.node);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict();
        }

        let node = self.order.push_back(key.clone());
        self.entries.insert(key, LruEntry::new(value, node));
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the cache is empty.
    pub fn evict(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let entry = self.entries.remove(&key)?;

        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        trace!(remaining = self.entries.len(), "evicted least recently used entry");

        Some((key, entry.value))
    }

    // == Peek ==
    /// Returns the value for `key` without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Removes a key without counting it as an eviction.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.node);
        self.stats.set_total_entries(self.entries.len());
        Some(entry.value)
    }

    // == Keys ==
    /// Iterates keys in eviction order: the first key is the next victim.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Clear ==
    /// Drops every entry and resets the statistics.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats = CacheStats::new();
        debug!(dropped, "cleared lru cache");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Asserts that the recency list holds exactly the table's keys and
    /// that every entry points at its own node.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.order.len(), self.entries.len());
        assert!(self.capacity == 0 || self.entries.len() <= self.capacity);

        for (key, entry) in &self.entries {
            assert!(
                self.order.get(entry.node) == Some(key),
                "entry does not point at its own node"
            );
        }
    }
}

impl<K, V> BoundedCache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        LruCache::put(self, key, value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        LruCache::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }

    fn evict(&mut self) -> Option<(K, V)> {
        LruCache::evict(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }

    fn stats(&self) -> CacheStats {
        LruCache::stats(self)
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lru
    }
}
