//! Cache Module
//!
//! Provides a bounded in-memory LRU cache with O(1) lookups and updates and an
//! optional stream of eviction records.

mod entry;
mod eviction;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use eviction::{Eviction, EvictionCause, EvictionChannel};
pub use lru::RecencyList;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::{LruStore, SetOutcome};

// == Public Constants ==
/// Capacity of the eviction stream unless configured otherwise
pub const DEFAULT_EVICTION_BACKLOG: usize = 64;
