//! Recency List Module
//!
//! Doubly-linked list of cache entries for O(1) LRU bookkeeping.

use crate::cache::Entry;

// == Recency List ==
/// Orders entries by access time.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Nodes live in a slab (`Vec<Option<Entry>>`); freed slots are recycled
/// through `free`. A slot index stays valid until the entry is removed.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    nodes: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry as most recently used and returns its slot.
    pub fn push_front(&mut self, key: K, value: V) -> usize {
        let mut entry = Entry::new(key, value);
        entry.next = self.head;

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(entry);
                idx
            }
            None => {
                self.nodes.push(Some(entry));
                self.nodes.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            if let Some(node) = self.nodes[old_head].as_mut() {
                node.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry in `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.get(idx).is_none() {
            return;
        }

        self.unlink(idx);

        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(node) = self.nodes[old_head].as_mut() {
                node.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    // == Remove ==
    /// Unlinks and returns the entry in `idx`, freeing the slot.
    pub fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        self.get(idx)?;
        self.unlink(idx);

        let mut entry = self.nodes[idx].take()?;
        entry.prev = None;
        entry.next = None;
        self.free.push(idx);
        self.len -= 1;
        Some(entry)
    }

    // == Back ==
    /// Returns the slot of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Returns the slot of the most recently used entry.
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    pub fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.get(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(node) = self.nodes[prev_idx].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(node) = self.nodes[next_idx].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry)
    }
}
