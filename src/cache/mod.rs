//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::{CacheStats, StatsReport};
pub use store::CacheStore;

// == Public Constants ==
/// Default maximum number of cached entries
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cache handle shared between request handlers and the purge task.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a store for sharing.
pub fn shared<V: Clone>(store: CacheStore<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(store))
}
