//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key-value store with LRU eviction and a single TTL for all entries.
///
/// The store itself is not synchronized; share it as [`SharedCache`] so every
/// operation runs under one lock.
///
/// [`SharedCache`]: crate::cache::SharedCache
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of every entry
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any previous one and restarting its TTL.
    ///
    /// When the insert pushes the store over capacity, the single least
    /// recently used entry is evicted.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value));

        if self.entries.len() > self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Evicted least recently used key '{}'", evicted);
            }
        }
    }

    // == Get ==
    /// Returns a live value and marks it most recently used.
    ///
    /// Missing and expired keys both yield `None` and count as misses; an
    /// expired entry is dropped on the spot.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
        }
        self.stats.record_miss();
        None
    }

    /// Checks for a live entry without touching recency or counters.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current size filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_current_size(self.entries.len());
        stats
    }

    /// Adds one end-to-end lookup latency to the response-time accumulator.
    pub fn record_response_time(&mut self, elapsed: Duration) {
        self.stats.record_response_time(elapsed);
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        let lru = &mut self.lru;

        self.entries.retain(|key, entry| {
            let keep = !entry.is_expired(ttl);
            if !keep {
                lru.remove(key);
            }
            keep
        });

        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The key that the next overflowing insert would evict.
    pub fn eviction_candidate(&self) -> Option<&str> {
        self.lru.peek_oldest()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn store(max_entries: usize) -> CacheStore<i32> {
        CacheStore::new(max_entries, Duration::from_secs(60))
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_get_unset_key_is_absent() {
        let mut store = store(100);
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut store = store(100);
        store.set("a", 1);

        assert_eq!(store.get("a"), Some(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite() {
        let mut store = store(100);
        store.set("a", 1);
        store.set("a", 2);

        assert_eq!(store.get("a"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_two_evicts_first() {
        let mut store = store(2);
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(2));
        assert_eq!(store.get("c"), Some(3));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut store = store(3);
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);

        store.get("a");
        assert_eq!(store.eviction_candidate(), Some("b"));

        store.set("d", 4);
        assert_eq!(store.get("a"), Some(1));
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_overwrite_refreshes_recency_without_eviction() {
        let mut store = store(2);
        store.set("a", 1);
        store.set("b", 2);
        store.set("a", 10);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.eviction_candidate(), Some("b"));
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut store = store(0);
        store.set("a", 1);

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_ttl_expiration() {
        let mut store = CacheStore::new(100, Duration::from_millis(50));
        store.set("a", 1);
        assert_eq!(store.get("a"), Some(1));

        sleep(Duration::from_millis(80));

        assert_eq!(store.get("a"), None);
        assert!(store.is_empty(), "expired entry should be dropped on access");
    }

    #[test]
    fn test_overwrite_resets_ttl() {
        let mut store = CacheStore::new(100, Duration::from_millis(150));
        store.set("a", 1);
        sleep(Duration::from_millis(100));
        store.set("a", 2);
        sleep(Duration::from_millis(100));

        assert_eq!(store.get("a"), Some(2));
    }

    #[test]
    fn test_stats_counts() {
        let mut store = store(100);
        store.set("a", 1);
        store.get("a");
        store.get("a");
        store.get("missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.current_size, 1);
    }

    #[test]
    fn test_stats_does_not_mutate() {
        let mut store = store(100);
        store.set("a", 1);
        let first = store.stats();
        let second = store.stats();

        assert_eq!(first, second);
        assert_eq!(first.total_requests, 0);
    }

    #[test]
    fn test_contains_leaves_counters_alone() {
        let mut store = store(100);
        store.set("a", 1);

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.stats().total_requests, 0);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut store = store(100);
        store.set("a", 1);
        store.get("a");
        store.get("b");
        store.record_response_time(Duration::from_millis(10));

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.total_response_time, Duration::from_millis(10));
    }

    #[test]
    fn test_purge_expired() {
        let mut store = CacheStore::new(100, Duration::from_millis(100));
        store.set("old", 1);
        sleep(Duration::from_millis(120));
        store.set("fresh", 2);

        let removed = store.purge_expired();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.eviction_candidate(), Some("fresh"));
        assert_eq!(store.get("fresh"), Some(2));
    }

    #[test]
    fn test_purge_expired_nothing_to_do() {
        let mut store = store(100);
        store.set("a", 1);

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 1);
    }
}
