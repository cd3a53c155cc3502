//! Cache Entry Module
//!
//! Defines the node stored in the recency list for every cached key.

// == Cache Entry ==
/// A single cache entry: the key/value pair plus its links in the recency list.
///
/// Links are slot indices into the list's node storage rather than pointers.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The cached key
    pub key: K,
    /// The stored value
    pub value: V,
    /// Neighbour closer to the front (more recently used)
    pub(crate) prev: Option<usize>,
    /// Neighbour closer to the back (less recently used)
    pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Replace ==
    /// Swaps in a new value, returning the previous one.
    pub fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, yielding the key/value pair.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
