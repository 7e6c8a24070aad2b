//! Recency List Module
//!
//! Arena-backed doubly linked list of keys used to track access order.
//!
//! Nodes live in a growable `Vec` and link to each other by index, so
//! unlinking from the middle, appending at the back and popping from the
//! front are all O(1) without shared pointers.
//!
//! ```text
//!   front (least recent)                       back (most recent)
//!   head ─► [id_2] ◄──► [id_0] ◄──► [id_3] ◄── tail
//! ```

// == Node Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// A handle stays valid until its node is removed; afterwards the slot
/// may be reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == Recency List ==
/// Keys ordered from least recently used (front) to most recently used (back).
#[derive(Debug)]
pub struct RecencyList<K> {
    /// Node storage, `None` marks a free slot
    slots: Vec<Option<Node<K>>>,
    /// Indices of free slots available for reuse
    free: Vec<usize>,
    /// Least recently used node
    head: Option<NodeId>,
    /// Most recently used node
    tail: Option<NodeId>,
    len: usize,
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Length ==
    /// Returns the number of keys in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Push Back ==
    /// Appends a key at the most recently used end and returns its handle.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };
        self.len += 1;
        self.link_back(id);
        id
    }

    // == Move To Back ==
    /// Marks a node as most recently used.
    ///
    /// Returns false if the handle does not refer to a live node.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.tail != Some(id) {
            self.unlink(id);
            self.link_back(id);
        }
        true
    }

    // == Pop Front ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        let id = self.head?;
        self.remove(id)
    }

    // == Remove ==
    /// Removes a node from anywhere in the list and returns its key.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.unlink(id)?;
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Peek ==
    /// Returns the least recently used key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the most recently used key.
    pub fn back(&self) -> Option<&K> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the key stored at `id`, if the node is live.
    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.node(id).map(|node| &node.key)
    }

    // == Iteration ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    // == Clear ==
    /// Drops every node and releases the arena slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn unlink(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.node_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        let node = self.node_mut(id)?;
        node.prev = None;
        node.next = None;
        Some(())
    }

    fn link_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(id) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Checks link symmetry, head/tail consistency and the live node count.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut current = self.head;
        let mut last = None;
        let mut count = 0usize;
        while let Some(id) = current {
            let node = self.node(id).expect("linked node missing");
            assert_eq!(node.prev, last, "broken prev link");
            last = Some(id);
            current = node.next;
            count += 1;
        }
        assert_eq!(self.tail, last, "tail does not match last node");
        assert_eq!(count, self.len, "linked node count mismatch");
        assert_eq!(
            self.slots.iter().filter(|slot| slot.is_some()).count(),
            self.len,
            "live slot count mismatch"
        );
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over the keys of a [`RecencyList`].
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    current: Option<NodeId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(&node.key)
    }
}
