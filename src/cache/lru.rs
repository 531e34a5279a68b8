//! LRU List Module
//!
//! Implements the recency ordering used for cache eviction.

// == Node Handle ==
/// Opaque handle to a node in an [`LruList`].
///
/// Handles are only meaningful for the list that issued them and become
/// stale once their node is removed. A stale handle never resolves, even
/// after its slot has been reused for another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Arena slot; `generation` is bumped every time the slot is vacated.
#[derive(Debug)]
struct Slot<K> {
    generation: u64,
    node: Option<Node<K>>,
}

// == LRU List ==
/// Doubly linked list of keys ordered by access time.
///
/// Nodes live in an arena of slots and link to each other by [`NodeId`], so
/// no node owns its neighbours:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Push-front, detach, move-to-front and pop-back are all O(1).
#[derive(Debug)]
pub struct LruList<K> {
    slots: Vec<Slot<K>>,
    /// Indices of vacated slots, reused before the arena grows
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<K> Default for LruList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruList<K> {
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

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Allocates a node for `key` and links it as the new head.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.len += 1;
        self.attach_front(id);
        id
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    // == Remove ==
    /// Unlinks a node, frees its slot and returns its key.
    ///
    /// Returns None for a stale handle.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.node(id)?;
        self.detach(id);
        let slot = self.slots.get_mut(id.index)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Accessors ==
    /// Handle of the most recently used node.
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Handle of the least recently used node.
    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Key stored at `id`.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).map(|node| &node.key)
    }

    /// Least recently used key, without removing it.
    pub fn peek_back(&self) -> Option<&K> {
        self.tail.and_then(|id| self.key(id))
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    /// Returns true if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node. Slots are kept for reuse, so handles issued before
    /// the clear stay stale.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iterate ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Keys<'_, K> {
        Keys {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Unlinks a node from its neighbours, leaving its slot allocated.
    fn detach(&mut self, id: NodeId) {
        let is_head = self.head == Some(id);
        let Some(node) = self.node_mut(id) else {
            return;
        };
        // A node without prev that is not the head is already unlinked
        if node.prev.is_none() && !is_head {
            return;
        }
        let prev = node.prev.take();
        let next = node.next.take();

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Links an unlinked node in front of the current head.
    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.prev = None;
        node.next = old_head;

        match old_head {
            Some(head_id) => {
                if let Some(head_node) = self.node_mut(head_id) {
                    head_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

// == Keys Iterator ==
/// Iterator over an [`LruList`] from head to tail.
#[derive(Debug)]
pub struct Keys<'a, K> {
    list: &'a LruList<K>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}
