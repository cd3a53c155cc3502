//! Cache Store Module
//!
//! Unsynchronized LRU engine: a hash index from key to list slot plus the
//! recency list. Callers provide locking (see `Cache`).

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::cache::RecencyList;

// == Set Outcome ==
/// What a `set` call did to the store.
#[derive(Debug, PartialEq, Eq)]
pub enum SetOutcome<K, V> {
    /// The key was new; `evicted` holds entries dropped to make room, oldest first
    Inserted { evicted: Vec<(K, V)> },
    /// The key existed; its value was replaced
    Updated,
}

// == LRU Store ==
/// Index plus recency list with a fixed entry limit.
///
/// Invariant: every key in `index` maps to a live slot in `list` holding
/// that key, and `index.len() == list.len()`.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Key -> slot in `list`
    index: HashMap<K, usize, RandomState>,
    /// Entries ordered by recency
    list: RecencyList<K, V>,
    /// Maximum number of entries, 0 = unbounded
    limit: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store. A `limit` of 0 disables eviction.
    pub fn new(limit: usize) -> Self {
        Self {
            index: HashMap::with_hasher(RandomState::new()),
            list: RecencyList::new(),
            limit,
        }
    }

    // == Get ==
    /// Returns a copy of the value and marks the entry most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let idx = *self.index.get(key)?;
        self.list.move_to_front(idx);
        self.list.get(idx).map(|entry| entry.value.clone())
    }

    // == Peek ==
    /// Returns a copy of the value without touching recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        let idx = *self.index.get(key)?;
        self.list.get(idx).map(|entry| entry.value.clone())
    }

    // == Touch ==
    /// Marks `key` most recently used. Returns false if it is gone.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&idx) => {
                self.list.move_to_front(idx);
                true
            }
            None => false,
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// An existing key has its value replaced and becomes most recently used.
    /// A new key first evicts from the back of the list until it fits.
    pub fn set(&mut self, key: K, value: V) -> SetOutcome<K, V> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(idx) {
                entry.replace(value);
            }
            self.list.move_to_front(idx);
            return SetOutcome::Updated;
        }

        let mut evicted = Vec::new();
        if self.limit > 0 {
            while self.index.len() + 1 > self.limit {
                match self.pop_back() {
                    Some(pair) => evicted.push(pair),
                    None => break,
                }
            }
        }

        let idx = self.list.push_front(key.clone(), value);
        self.index.insert(key, idx);
        SetOutcome::Inserted { evicted }
    }

    // == Delete ==
    /// Removes an entry by key, returning its value if it was present.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.list.remove(idx).map(|entry| entry.value)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.list.back()?;
        let entry = self.list.remove(idx)?;
        self.index.remove(&entry.key);
        Some(entry.into_pair())
    }

    // == Snapshot ==
    /// Copies every key-value pair, most recently used first.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.list
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
