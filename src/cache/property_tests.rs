//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the in-process store against a simple model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheBackend, MemoryCache, MemoryStore};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 8;
const HOUR: Duration = Duration::from_secs(3600);

// == Strategies ==
/// Cache keys shaped like the client's request URLs
fn url_key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_map(|term| format!("http://api.urbandictionary.com/v0/define?term={}", term))
}

/// JSON-ish response bodies
fn body_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| format!(r#"{{"list":["{}"]}}"#, s))
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (url_key_strategy(), body_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        url_key_strategy().prop_map(|key| CacheOp::Get { key }),
        url_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hit/miss counters match the outcome of every lookup.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = MemoryStore::new(TEST_MAX_ENTRIES);
        let mut hits = 0u64;
        let mut misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value, HOUR).unwrap(),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // The store never grows past its capacity.
    #[test]
    fn prop_capacity_enforced(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = MemoryStore::new(TEST_MAX_ENTRIES);
        for op in ops {
            if let CacheOp::Set { key, value } = op {
                store.set(key, value, HOUR).unwrap();
            }
            prop_assert!(store.len() <= TEST_MAX_ENTRIES);
        }
    }

    // Without evictions, the store behaves like a plain map.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = MemoryStore::new(1024);
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), HOUR).unwrap();
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key).cloned());
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
            }
        }
    }

    // A value written through the async handle reads back unchanged.
    #[test]
    fn prop_memory_cache_read_your_write(key in url_key_strategy(), body in body_strategy()) {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let read = tokio_test::block_on(async {
            cache.set(&key, body.clone(), HOUR).await.unwrap();
            cache.get(&key).await.unwrap()
        });
        prop_assert_eq!(read, Some(body));
    }
}
