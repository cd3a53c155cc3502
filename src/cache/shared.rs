//! Thread-safe Cache Module
//!
//! Wraps [`LruStore`] in a single reader/writer lock, adds statistics and the
//! eviction notification stream.

use std::fmt;
use std::hash::Hash;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use tracing::trace;

use crate::cache::stats::StatsCounters;
use crate::cache::{
    CacheStats, Eviction, EvictionCause, EvictionChannel, LruStore, SetOutcome,
    DEFAULT_EVICTION_BACKLOG,
};
use crate::config::CacheConfig;

/// State guarded by the cache lock. The store and the channel change together.
struct Inner<K, V> {
    store: LruStore<K, V>,
    evicted: Option<EvictionChannel<K, V>>,
}

// == Cache ==
/// A bounded, thread-safe LRU cache.
///
/// All state sits behind one `RwLock`: lookups take the shared side, every
/// mutation (including recency reordering) takes the exclusive side. Share it
/// between threads with `Arc<Cache<K, V>>`.
///
/// # Backpressure
///
/// Once [`Cache::eviction_stream`] has been called, every capacity eviction
/// and every successful [`Cache::delete`] publishes a record while the write
/// lock is held. If the stream is full, the writer blocks until a consumer
/// receives, and all other cache callers wait behind it. Drain the stream from
/// a thread that does not itself write to the cache.
pub struct Cache<K, V> {
    inner: RwLock<Inner<K, V>>,
    stats: StatsCounters,
    eviction_backlog: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates an empty cache holding at most `limit` entries.
    ///
    /// A `limit` of 0 means unbounded: nothing is ever evicted.
    pub fn new(limit: usize) -> Self {
        Self::with_backlog(limit, DEFAULT_EVICTION_BACKLOG)
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_backlog(config.limit, config.eviction_backlog)
    }

    fn with_backlog(limit: usize, eviction_backlog: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                store: LruStore::new(limit),
                evicted: None,
            }),
            stats: StatsCounters::default(),
            eviction_backlog: eviction_backlog.max(1),
        }
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// The lookup runs under the read lock; the reorder then takes the write
    /// lock separately and is skipped if the key was deleted in between.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.inner.read().store.peek(key);

        match found {
            Some(value) => {
                self.stats.record_hit();
                if !self.inner.write().store.touch(key) {
                    trace!("Entry removed before its recency could be refreshed");
                }
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a key-value pair, evicting least recently used entries if the
    /// new key would exceed the limit.
    ///
    /// May block while the eviction stream is full (see the type docs).
    pub fn set(&self, key: K, value: V) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let dropped = match inner.store.set(key, value) {
            SetOutcome::Updated => {
                self.stats.record_update();
                return;
            }
            SetOutcome::Inserted { evicted } => evicted,
        };
        self.stats.record_insert();
        if dropped.is_empty() {
            return;
        }

        self.stats.record_evictions(dropped.len() as u64);
        trace!(
            "Evicted {} least recently used entries (limit {})",
            dropped.len(),
            inner.store.limit()
        );
        if let Some(channel) = &inner.evicted {
            for (key, value) in dropped {
                channel.publish(Eviction::new(key, value, EvictionCause::Capacity));
            }
        }
    }

    // == Delete ==
    /// Removes `key` if present. Absent keys are a no-op.
    ///
    /// May block while the eviction stream is full (see the type docs).
    pub fn delete(&self, key: &K) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let Some(value) = inner.store.delete(key) else {
            return;
        };
        self.stats.record_deletion();
        trace!("Deleted entry, {} remaining", inner.store.len());

        if let Some(channel) = &inner.evicted {
            channel.publish(Eviction::new(key.clone(), value, EvictionCause::Removed));
        }
    }

    // == Count ==
    /// Returns the current number of entries.
    pub fn count(&self) -> usize {
        self.inner.read().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().store.is_empty()
    }

    /// Returns the configured entry limit, 0 = unbounded.
    pub fn limit(&self) -> usize {
        self.inner.read().store.limit()
    }

    // == Iterate ==
    /// Calls `visitor` for every entry present when the call started.
    ///
    /// The entries are copied under the read lock and visited after it is
    /// released, so the visitor may call back into the cache. The first
    /// `Err` stops the walk and is returned. Visiting order is unspecified.
    pub fn iterate<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&K, &V) -> Result<(), E>,
    {
        let snapshot = self.inner.read().store.snapshot();

        for (key, value) in &snapshot {
            visitor(key, value)?;
        }
        Ok(())
    }

    // == Eviction Stream ==
    /// Returns the receiving end of the eviction stream, allocating it on the
    /// first call.
    ///
    /// Every call returns a handle to the same bounded queue. Records are
    /// delivered in the order entries left the cache. Nothing is recorded
    /// before the first call.
    pub fn eviction_stream(&self) -> Receiver<Eviction<K, V>> {
        let mut inner = self.inner.write();
        let backlog = self.eviction_backlog;

        inner
            .evicted
            .get_or_insert_with(|| EvictionChannel::new(backlog))
            .subscribe()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.count())
    }

    /// Zeroes all counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

struct RecencyOrder<'a, K, V>(&'a LruStore<K, V>);

impl<K, V> fmt::Debug for RecencyOrder<'_, K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

/// Renders entries most recently used first.
impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Cache")
            .field("limit", &inner.store.limit())
            .field("count", &inner.store.len())
            .field("entries", &RecencyOrder(&inner.store))
            .finish()
    }
}
