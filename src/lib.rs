//! Mini LRU - A bounded, thread-safe in-memory cache
//!
//! Evicts the least recently used entry when a new key would exceed the
//! configured limit, and can report every eviction or deletion on a bounded
//! channel.
//!
//! ```
//! use mini_lru::Cache;
//!
//! let cache = Cache::new(2);
//! let evictions = cache.eviction_stream();
//!
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");
//! cache.set("c", 3);
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(evictions.recv().unwrap().into_pair(), ("b", 2));
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, Eviction, EvictionCause};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
