//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a plain recency-list model.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so sequences revisit keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => Just(CacheOp::Clear),
    ]
}

// == Reference Model ==
/// Most-recent-first list of (key, value); the obvious LRU.
#[derive(Default)]
struct Model {
    order: Vec<(String, u32)>,
    capacity: usize,
}

impl Model {
    fn set(&mut self, key: &str, value: u32) -> Option<String> {
        self.order.retain(|(k, _)| k != key);
        self.order.insert(0, (key.to_string(), value));
        if self.order.len() > self.capacity {
            self.order.pop().map(|(k, _)| k)
        } else {
            None
        }
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let idx = self.order.iter().position(|(k, _)| k == key)?;
        let item = self.order.remove(idx);
        let value = item.1;
        self.order.insert(0, item);
        Some(value)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits, misses and total requests match what callers observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(4, TEST_TTL);
        let mut hits = 0u64;
        let mut misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
                CacheOp::Clear => store.clear(),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_requests, hits + misses);
        prop_assert_eq!(stats.current_size, store.len());
    }

    // Size never exceeds capacity and the victim is always the model's LRU key.
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(capacity, TEST_TTL);
        let mut model = Model { capacity, ..Model::default() };

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    let expected_victim = model.set(&key, value);
                    let evictions_before = store.stats().evictions;
                    let candidate = store.eviction_candidate().map(str::to_string);
                    store.set(key.clone(), value);

                    if let Some(victim) = expected_victim {
                        prop_assert_eq!(store.stats().evictions, evictions_before + 1);
                        prop_assert!(!store.contains(&victim));
                        prop_assert_eq!(candidate, Some(victim));
                    } else {
                        prop_assert_eq!(store.stats().evictions, evictions_before);
                    }
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key));
                }
                CacheOp::Clear => {
                    store.clear();
                    model.order.clear();
                }
            }
            prop_assert!(store.len() <= capacity);
            prop_assert_eq!(store.len(), model.order.len());
        }
    }

    // A set value is readable until something else displaces it.
    #[test]
    fn prop_set_then_get(key in "[a-z]{1,16}", value in any::<u32>()) {
        let mut store = CacheStore::new(10, TEST_TTL);
        store.set(key.clone(), value);
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Keys never written are absent.
    #[test]
    fn prop_unset_keys_absent(
        written in prop::collection::hash_set("[a-m]", 0..10),
        absent_key in "[n-z]"
    ) {
        let mut store = CacheStore::new(100, TEST_TTL);
        for key in written {
            store.set(key, 1u32);
        }
        prop_assert_eq!(store.get(&absent_key), None);
    }
}

// Separate block with few cases for the sleeping TTL check
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    #[test]
    fn prop_ttl_expiration(key in key_strategy(), value in any::<u32>()) {
        let mut store = CacheStore::new(10, Duration::from_millis(30));
        store.set(key.clone(), value);
        prop_assert_eq!(store.get(&key), Some(value));

        std::thread::sleep(Duration::from_millis(50));

        prop_assert_eq!(store.get(&key), None);
    }
}
