//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::VecDeque;

use crate::cache::{Cache, Eviction, EvictionCause, LruStore};

// == Reference Model ==
/// Keys ordered most recently used first, kept in a plain deque.
#[derive(Debug, Default)]
struct ModelLru {
    order: VecDeque<(u8, u32)>,
    limit: usize,
}

impl ModelLru {
    fn new(limit: usize) -> Self {
        Self {
            order: VecDeque::new(),
            limit,
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.order.iter().position(|(k, _)| *k == key)
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        let pair = self.order.remove(pos)?;
        self.order.push_front(pair);
        Some(pair.1)
    }

    fn set(&mut self, key: u8, value: u32) -> Vec<(u8, u32)> {
        if let Some(pos) = self.position(key) {
            self.order.remove(pos);
            self.order.push_front((key, value));
            return Vec::new();
        }
        let mut evicted = Vec::new();
        while self.limit > 0 && self.order.len() + 1 > self.limit {
            if let Some(pair) = self.order.pop_back() {
                evicted.push(pair);
            }
        }
        self.order.push_front((key, value));
        evicted
    }

    fn delete(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        self.order.remove(pos).map(|(_, v)| v)
    }
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: u8, value: u32 },
    Get { key: u8 },
    Delete { key: u8 },
}

/// Small key space so operations collide often.
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (0u8..16, any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => (0u8..16).prop_map(|key| CacheOp::Get { key }),
        1 => (0u8..16).prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The store agrees with the model on every lookup and on final order.
    #[test]
    fn prop_store_matches_model(
        limit in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut store = LruStore::new(limit);
        let mut model = ModelLru::new(limit);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key, value);
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.delete(key));
                }
            }
            if limit > 0 {
                prop_assert!(store.len() <= limit, "len {} exceeds limit {}", store.len(), limit);
            }
        }

        let expected: Vec<(u8, u32)> = model.order.iter().copied().collect();
        prop_assert_eq!(store.snapshot(), expected);
    }

    // Every entry that leaves the cache shows up on the stream, in order.
    #[test]
    fn prop_eviction_stream_matches_model(
        limit in 1usize..5,
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let cache = Cache::new(limit);
        let rx = cache.eviction_stream();
        let mut model = ModelLru::new(limit);
        let mut expected = Vec::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value);
                    for (k, v) in model.set(key, value) {
                        expected.push(Eviction::new(k, v, EvictionCause::Capacity));
                    }
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(key));
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key);
                    if let Some(v) = model.delete(key) {
                        expected.push(Eviction::new(key, v, EvictionCause::Removed));
                    }
                }
            }
            // Keep the bounded stream from filling up
            while let Ok(record) = rx.try_recv() {
                let next = if expected.is_empty() { None } else { Some(expected.remove(0)) };
                prop_assert_eq!(Some(record), next);
            }
        }

        prop_assert!(expected.is_empty(), "records never published: {:?}", expected);
        prop_assert_eq!(cache.count(), model.order.len());
    }

    // Storing a value and reading it back returns that value.
    #[test]
    fn prop_get_after_set(
        limit in 1usize..8,
        prefix in prop::collection::vec((0u8..16, any::<u32>()), 0..20),
        key in 0u8..16,
        value in any::<u32>()
    ) {
        let cache = Cache::new(limit);
        for (k, v) in prefix {
            cache.set(k, v);
        }

        cache.set(key, value);
        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // After filling to capacity and touching the oldest key, the second
    // oldest is the one evicted.
    #[test]
    fn prop_touch_protects_from_eviction(capacity in 2u8..10) {
        let cache = Cache::new(capacity as usize);
        for key in 0..capacity {
            cache.set(key, key as u32);
        }

        cache.get(&0);
        cache.set(capacity, 0);

        prop_assert!(cache.get(&0).is_some());
        prop_assert_eq!(cache.get(&1), None);
        prop_assert_eq!(cache.count(), capacity as usize);
    }
}
