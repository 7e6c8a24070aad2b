//! Cache Entry Module
//!
//! Per-key records stored in each cache's primary table.

use crate::cache::NodeId;

// == LRU Entry ==
/// Value slot of an [`LruCache`](crate::cache::LruCache).
#[derive(Debug)]
pub struct LruEntry<V> {
    /// The stored value
    pub value: V,
    /// Position of the key in the recency list
    pub node: NodeId,
}

impl<V> LruEntry<V> {
    pub fn new(value: V, node: NodeId) -> Self {
        Self { value, node }
    }
}

// == LFU Entry ==
/// Value slot of an [`LfuCache`](crate::cache::LfuCache).
///
/// `frequency` names the bucket holding the key and `node` is the key's
/// position inside that bucket.
#[derive(Debug)]
pub struct LfuEntry<V> {
    /// The stored value
    pub value: V,
    /// Number of accesses, starting at 1 on insertion
    pub frequency: u64,
    /// Position of the key in its frequency bucket
    pub node: NodeId,
}

impl<V> LfuEntry<V> {
    // == Constructor ==
    /// Creates an entry for a freshly inserted key (frequency 1).
    pub fn new(value: V, node: NodeId) -> Self {
        Self {
            value,
            frequency: 1,
            node,
        }
    }
}
