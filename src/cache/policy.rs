//! Eviction Policy Module
//!
//! Names the available eviction disciplines and builds caches for them.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{BoundedCache, LfuCache, LruCache};
use crate::error::CacheError;

// == Eviction Policy ==
/// Which entry a full cache gives up when a new key arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Evict the entry that has gone longest without being read or written
    Lru,
    /// Evict the entry with the fewest accesses, least recent among ties
    Lfu,
}

impl EvictionPolicy {
    // == Build ==
    /// Creates an empty cache of this policy with the given capacity.
    pub fn build<K, V>(self, capacity: isize) -> Box<dyn BoundedCache<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: 'static,
    {
        match self {
            EvictionPolicy::Lru => Box::new(LruCache::new(capacity)),
            EvictionPolicy::Lfu => Box::new(LfuCache::new(capacity)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            other => Err(CacheError::UnknownPolicy(other.to_string())),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lru".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lru));
        assert_eq!(" LFU ".parse::<EvictionPolicy>(), Ok(EvictionPolicy::Lfu));
        assert_eq!(
            "fifo".parse::<EvictionPolicy>(),
            Err(CacheError::UnknownPolicy("fifo".to_string()))
        );
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
            assert_eq!(policy.to_string().parse::<EvictionPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_policy_build() {
        let mut lru = EvictionPolicy::Lru.build::<u32, &str>(2);
        let mut lfu = EvictionPolicy::Lfu.build::<u32, &str>(2);

        assert_eq!(lru.policy(), EvictionPolicy::Lru);
        assert_eq!(lfu.policy(), EvictionPolicy::Lfu);

        for cache in [&mut lru, &mut lfu] {
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");
            assert_eq!(cache.len(), 2);
            assert_eq!(cache.capacity(), 2);
            assert!(!cache.contains_key(&1));
        }
    }

    #[test]
    fn test_policy_serialize() {
        let json = serde_json::to_string(&EvictionPolicy::Lfu).unwrap();
        assert_eq!(json, "\"lfu\"");
    }
}
