//! Cache Module
//!
//! The key-value contract the client caches responses in, plus the backends
//! shipped with the crate: an in-process TTL/LRU store and a Redis adapter.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

mod entry;
mod lru;
mod memory;
#[cfg(feature = "redis")]
mod redis_cache;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
pub use stats::CacheStats;
pub use store::MemoryStore;

// == Public Constants ==
/// Maximum allowed key length in bytes for the in-process store
pub const MAX_KEY_LENGTH: usize = 4096;

/// Maximum allowed value size in bytes for the in-process store
pub const MAX_VALUE_SIZE: usize = 4 * 1024 * 1024; // 4 MB

// == Cache Backend ==
/// Minimal key-value store with per-entry expiry.
///
/// Any store with millisecond-granularity expiry can back the client.
/// Implementations are shared handles; the client never closes them.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the stored value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, valid for `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
