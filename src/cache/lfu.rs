//! LFU Cache Module
//!
//! Capacity-bounded map that evicts the least frequently used entry,
//! breaking ties by recency.
//!
//! ```text
//!   table: key -> { value, frequency, node }
//!
//!   min_freq = 1
//!       │
//!       ▼
//!   freq=1: front ─► [k3] ◄──► [k5] ◄── back    (k3 evicted first)
//!   freq=2: front ─► [k1] ◄── back
//!   freq=4: front ─► [k2] ◄──► [k4] ◄── back
//! ```
//!
//! Every successful `get` or `put` on a present key moves it from bucket
//! `f` to the back of bucket `f + 1`. Empty buckets are dropped.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{
    capacity_from, BoundedCache, CacheStats, EvictionPolicy, LfuEntry, RecencyList,
};

// == LFU Cache ==
/// Bounded map with frequency-ordered eviction and recency tie-break.
///
/// ```
/// use bounded_cache::cache::LfuCache;
///
/// let mut cache = LfuCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
/// cache.put("c", 3);
///
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.frequency(&"a"), Some(2));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    /// Key-value storage with access counts
    entries: HashMap<K, LfuEntry<V>>,
    /// Frequency -> keys at that frequency, least recent first
    buckets: HashMap<u64, RecencyList<K>>,
    /// Lowest frequency with a non-empty bucket, 0 when empty
    min_freq: u64,
    stats: CacheStats,
    /// Maximum number of entries, 0 accepts nothing
    capacity: usize,
    /// Frequencies skipped by `settle_min_freq`
    #[cfg(test)]
    walk_steps: u64,
}

impl<K, V> LfuCache<K, V>
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
            buckets: HashMap::new(),
            min_freq: 0,
            stats: CacheStats::new(),
            capacity: capacity_from(capacity),
            #[cfg(test)]
            walk_steps: 0,
        }
    }

    // == Get ==
    /// Returns the value for `key` and counts one access.
    ///
    /// A miss changes nothing but the miss counter.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        Self::promote(&mut self.buckets, &mut self.min_freq, entry);
        self.stats.record_hit();
        Some(&entry.value)
    }

    // == Put ==
    /// Stores a value.
    ///
    /// Overwriting a present key counts as an access. A new key starts at
    /// frequency 1; at capacity the least frequently used entry is evicted
    /// first.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            Self::promote(&mut self.buckets, &mut self.min_freq, entry);
            return;
        }

        // The new key lands in bucket 1, so min_freq needs no walk afterwards
        if self.entries.len() >= self.capacity {
            self.pop_lowest();
        }

        let node = self.buckets.entry(1).or_default().push_back(key.clone());
        self.entries.insert(key, LfuEntry::new(value, node));
        self.min_freq = 1;
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Removes and returns the least frequently used entry, the least
    /// recently touched one among ties.
    ///
    /// Returns None if the cache is empty.
    pub fn evict(&mut self) -> Option<(K, V)> {
        let evicted = self.pop_lowest()?;

        if self.entries.is_empty() {
            self.min_freq = 0;
        } else {
            self.settle_min_freq();
        }
        Some(evicted)
    }

    // == Peek ==
    /// Returns the value for `key` without counting an access.
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

    // == Frequency ==
    /// Returns the access count of `key`.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| entry.frequency)
    }

    /// Returns the lowest access count held, or None when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    // == Remove ==
    /// Removes a key without counting it as an eviction.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        if let Some(bucket) = self.buckets.get_mut(&entry.frequency) {
            bucket.remove(entry.node);
            if bucket.is_empty() {
                self.buckets.remove(&entry.frequency);
            }
        }

        if self.entries.is_empty() {
            self.min_freq = 0;
        } else {
            self.settle_min_freq();
        }
        self.stats.set_total_entries(self.entries.len());
        Some(entry.value)
    }

    // == Keys ==
    /// Returns keys in eviction order: lowest frequency first, least
    /// recently touched first within a frequency.
    pub fn keys(&self) -> Vec<&K> {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable();
        freqs
            .into_iter()
            .filter_map(|freq| self.buckets.get(&freq))
            .flat_map(|bucket| bucket.iter())
            .collect()
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
    /// Drops every entry and bucket, resets `min_freq` and the statistics.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.buckets.clear();
        self.min_freq = 0;
        self.stats = CacheStats::new();
        debug!(dropped, "cleared lfu cache");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Takes the front of the lowest bucket out of the cache.
    ///
    /// Leaves `min_freq` pointing at the victim's frequency, which may now
    /// be missing. Callers either insert at frequency 1 or settle again.
    fn pop_lowest(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        self.settle_min_freq();

        let freq = self.min_freq;
        let bucket = self.buckets.get_mut(&freq)?;
        let key = bucket.pop_front()?;
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        let entry = self.entries.remove(&key)?;

        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        trace!(
            frequency = freq,
            remaining = self.entries.len(),
            "evicted least frequently used entry"
        );

        Some((key, entry.value))
    }

    /// Moves an entry from its bucket to the back of the next one.
    ///
    /// Takes the fields it needs so callers can keep borrowing `entry`
    /// out of the table.
    fn promote(
        buckets: &mut HashMap<u64, RecencyList<K>>,
        min_freq: &mut u64,
        entry: &mut LfuEntry<V>,
    ) {
        let old = entry.frequency;
        let bucket = buckets
            .get_mut(&old)
            .expect("entry frequency has no bucket");
        let key = bucket
            .remove(entry.node)
            .expect("entry node missing from its bucket");
        if bucket.is_empty() {
            buckets.remove(&old);
            if *min_freq == old {
                *min_freq = old + 1;
            }
        }

        entry.frequency = old + 1;
        entry.node = buckets.entry(entry.frequency).or_default().push_back(key);
    }

    /// Advances `min_freq` past missing buckets.
    ///
    /// `min_freq` never exceeds the true minimum, so while the cache holds
    /// entries this stops at the first populated bucket.
    fn settle_min_freq(&mut self) {
        while !self
            .buckets
            .get(&self.min_freq)
            .is_some_and(|bucket| !bucket.is_empty())
        {
            self.min_freq += 1;
            #[cfg(test)]
            {
                self.walk_steps += 1;
            }
        }
    }

    /// Number of frequencies `settle_min_freq` has stepped over.
    #[cfg(test)]
    pub(crate) fn min_freq_walk_steps(&self) -> u64 {
        self.walk_steps
    }

    /// Asserts the bucket invariants: every key sits in exactly the bucket
    /// named by its frequency, bucket sizes sum to the table size, and
    /// `min_freq` names the lowest populated bucket.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut bucket_total = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(freq >= 1, "bucket at frequency 0");
            assert!(!bucket.is_empty(), "empty bucket kept at {}", freq);
            bucket.debug_validate_invariants();
            bucket_total += bucket.len();
        }
        assert_eq!(bucket_total, self.entries.len());
        assert!(self.capacity == 0 || self.entries.len() <= self.capacity);

        for (key, entry) in &self.entries {
            let bucket = self
                .buckets
                .get(&entry.frequency)
                .expect("entry frequency has no bucket");
            assert!(
                bucket.get(entry.node) == Some(key),
                "entry does not point at its own node"
            );
        }

        if self.entries.is_empty() {
            assert!(self.buckets.is_empty());
        } else {
            let lowest = self.buckets.keys().copied().min();
            assert_eq!(Some(self.min_freq), lowest, "min_freq is not the lowest bucket");
        }
    }
}

impl<K, V> BoundedCache<K, V> for LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        LfuCache::put(self, key, value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        LfuCache::peek(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        LfuCache::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }

    fn evict(&mut self) -> Option<(K, V)> {
        LfuCache::evict(self)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }

    fn stats(&self) -> CacheStats {
        LfuCache::stats(self)
    }

    fn policy(&self) -> EvictionPolicy {
        EvictionPolicy::Lfu
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> LfuCache<u32, &'static str> {
        let mut cache = LfuCache::new(3);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache
    }

    #[test]
    fn test_lfu_new() {
        let cache: LfuCache<u32, u32> = LfuCache::new(3);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.min_frequency(), None);
    }

    #[test]
    fn test_lfu_get_increments_frequency() {
        let mut cache = abc();

        assert_eq!(cache.frequency(&1), Some(1));
        cache.get(&1);
        cache.get(&1);

        assert_eq!(cache.frequency(&1), Some(3));
        assert_eq!(cache.min_frequency(), Some(1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_put_existing_increments_frequency() {
        let mut cache = abc();

        cache.put(2, "B");

        assert_eq!(cache.frequency(&2), Some(2));
        assert_eq!(cache.peek(&2), Some(&"B"));
        assert_eq!(cache.len(), 3);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_min_freq_advances_when_bucket_empties() {
        let mut cache = LfuCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");

        cache.get(&1);
        assert_eq!(cache.min_frequency(), Some(1));

        cache.get(&2);
        assert_eq!(cache.min_frequency(), Some(2));
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_evicts_lowest_frequency() {
        let mut cache = abc();

        cache.get(&1);
        cache.get(&1);
        cache.get(&2);
        cache.put(4, "d");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.get(&4), Some(&"d"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_tie_break_by_recency() {
        let mut cache = abc();

        cache.get(&1);
        cache.get(&2);
        cache.get(&3);
        cache.put(4, "d");

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
        assert_eq!(cache.get(&4), Some(&"d"));
    }

    #[test]
    fn test_lfu_new_key_resets_min_freq() {
        let mut cache = LfuCache::new(2);
        cache.put(1, "a");
        cache.put(2, "b");
        for _ in 0..3 {
            cache.get(&1);
            cache.get(&2);
        }
        assert_eq!(cache.min_frequency(), Some(4));

        cache.put(3, "c");

        assert_eq!(cache.min_frequency(), Some(1));
        assert_eq!(cache.frequency(&3), Some(1));
        // 1 and 2 were tied at 4; 1 was touched first
        assert!(!cache.contains_key(&1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_evicting_put_skips_frequency_gap() {
        let mut cache = LfuCache::new(2);
        cache.put(0u32, 0u32);
        for _ in 0..100_000 {
            cache.get(&0);
        }
        cache.put(1, 1);

        for key in 2..200 {
            cache.put(key, key);
            assert_eq!(cache.min_frequency(), Some(1));
        }

        // each put evicted the lone frequency-1 key without walking up to the hot one
        assert_eq!(cache.min_freq_walk_steps(), 0);
        assert_eq!(cache.frequency(&0), Some(100_001));
        assert_eq!(cache.stats().evictions, 198);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_evict_settles_across_gap() {
        let mut cache = LfuCache::new(2);
        cache.put(0, "hot");
        for _ in 0..9 {
            cache.get(&0);
        }
        cache.put(1, "cold");

        assert_eq!(cache.evict(), Some((1, "cold")));

        assert_eq!(cache.min_frequency(), Some(10));
        assert_eq!(cache.min_freq_walk_steps(), 9);
        cache.debug_validate_invariants();
    }

    #[test]
    #[should_panic(expected = "entry node missing from its bucket")]
    fn test_lfu_get_panics_on_detached_entry() {
        let mut cache = abc();
        let node = cache.entries[&1].node;
        if let Some(bucket) = cache.buckets.get_mut(&1) {
            bucket.remove(node);
        }

        cache.get(&1);
    }

    #[test]
    fn test_lfu_new_key_is_next_victim() {
        let mut cache = abc();
        cache.get(&1);
        cache.get(&2);
        cache.get(&3);

        cache.put(4, "d");
        cache.put(5, "e");

        // 4 was the only key at frequency 1
        assert!(!cache.contains_key(&4));
        assert!(cache.contains_key(&5));
    }

    #[test]
    fn test_lfu_keys_in_eviction_order() {
        let mut cache = abc();
        cache.get(&3);
        cache.get(&3);
        cache.get(&1);

        let keys: Vec<u32> = cache.keys().into_iter().copied().collect();
        assert_eq!(keys, vec![2, 1, 3]);
    }

    #[test]
    fn test_lfu_evict_returns_entry() {
        let mut cache = abc();
        cache.get(&1);

        assert_eq!(cache.evict(), Some((2, "b")));
        assert_eq!(cache.evict(), Some((3, "c")));
        cache.debug_validate_invariants();
        assert_eq!(cache.evict(), Some((1, "a")));
        assert_eq!(cache.evict(), None);
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_lfu_remove_settles_min_freq() {
        let mut cache = abc();
        cache.get(&1);
        cache.get(&2);

        assert_eq!(cache.remove(&3), Some("c"));

        assert_eq!(cache.min_frequency(), Some(2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
        cache.debug_validate_invariants();

        cache.remove(&1);
        cache.remove(&2);
        assert_eq!(cache.min_frequency(), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_peek_does_not_count() {
        let mut cache = abc();

        assert_eq!(cache.peek(&1), Some(&"a"));
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_lfu_zero_capacity() {
        let mut cache = LfuCache::new(0);
        cache.put(1, "a");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.evict(), None);
    }

    #[test]
    fn test_lfu_single_element() {
        let mut cache = LfuCache::new(1);
        cache.put(1, "a");
        assert_eq!(cache.get(&1), Some(&"a"));

        cache.put(2, "b");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        cache.debug_validate_invariants();
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = abc();
        cache.get(&1);

        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.min_frequency(), None);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.stats().misses, 1);
        cache.debug_validate_invariants();

        cache.put(1, "z");
        assert_eq!(cache.frequency(&1), Some(1));
        cache.debug_validate_invariants();
    }
}
