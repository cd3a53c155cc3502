//! Eviction Notification Module
//!
//! Records of entries leaving the cache and the bounded channel that carries
//! them to an external consumer.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, warn};

// == Eviction Cause ==
/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvictionCause {
    /// Dropped as least recently used to make room for a new key
    Capacity,
    /// Removed by an explicit `delete`
    Removed,
}

// == Eviction Record ==
/// A key-value pair removed from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction<K, V> {
    pub key: K,
    pub value: V,
    pub cause: EvictionCause,
}

impl<K, V> Eviction<K, V> {
    pub fn new(key: K, value: V, cause: EvictionCause) -> Self {
        Self { key, value, cause }
    }

    /// Drops the cause, yielding the key/value pair.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

// == Eviction Channel ==
/// Bounded queue of eviction records.
///
/// Keeps its own receiver so the channel never disconnects and every
/// `subscribe` call hands out a handle to the same queue. Publishing into a
/// full queue blocks until a consumer makes room.
#[derive(Debug)]
pub struct EvictionChannel<K, V> {
    tx: Sender<Eviction<K, V>>,
    rx: Receiver<Eviction<K, V>>,
}

impl<K, V> EvictionChannel<K, V> {
    // == Constructor ==
    /// Allocates a channel holding up to `backlog` undelivered records.
    pub fn new(backlog: usize) -> Self {
        let (tx, rx) = bounded(backlog);
        debug!("Eviction channel allocated with backlog of {}", backlog);
        Self { tx, rx }
    }

    // == Subscribe ==
    /// Returns a receiving handle on this channel.
    pub fn subscribe(&self) -> Receiver<Eviction<K, V>> {
        self.rx.clone()
    }

    // == Publish ==
    /// Enqueues a record, blocking while the queue is full.
    pub fn publish(&self, record: Eviction<K, V>) {
        let record = match self.tx.try_send(record) {
            Ok(()) => return,
            Err(TrySendError::Full(record)) => {
                warn!(
                    "Eviction channel full ({} queued), blocking writer until a consumer drains it",
                    self.tx.len()
                );
                record
            }
            // Unreachable while `self.rx` is alive
            Err(TrySendError::Disconnected(_)) => return,
        };

        // Cannot fail: `self.rx` keeps the channel connected.
        let _ = self.tx.send(record);
    }

    /// Number of records waiting to be received.
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.tx.capacity()
    }
}
