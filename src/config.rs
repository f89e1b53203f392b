//! Configuration Module
//!
//! Loads client and in-memory cache settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Upstream root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://api.urbandictionary.com/v0";

/// Default response lifetime in milliseconds (one hour).
pub const DEFAULT_TTL_MS: u64 = 1000 * 60 * 60;

/// Client configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// How long a cached response stays valid
    pub ttl: Duration,
    /// Namespace prefix for cache keys
    pub instance_id: String,
    /// Upstream API root, without trailing slash
    pub base_url: String,
    /// Serialize concurrent misses for the same key
    pub coalesce_misses: bool,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `URBAN_DICTIONARY_TTL_MS` - Cache ttl in milliseconds (default: 3600000)
    /// - `URBAN_DICTIONARY_INSTANCE_ID` - Cache key namespace (default: empty)
    /// - `URBAN_DICTIONARY_BASE_URL` - Upstream root (default: the public API)
    /// - `URBAN_DICTIONARY_COALESCE` - `true`/`1` to coalesce misses (default: false)
    ///
    /// Unparseable values fall back to the default; an explicit ttl of zero or
    /// below is rejected.
    pub fn from_env() -> Result<Self> {
        let ttl_ms = env::var("URBAN_DICTIONARY_TTL_MS")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok());

        let ttl = match ttl_ms {
            Some(ms) => ttl_from_millis(ms)?,
            None => Duration::from_millis(DEFAULT_TTL_MS),
        };

        Ok(Self {
            ttl,
            instance_id: env::var("URBAN_DICTIONARY_INSTANCE_ID").unwrap_or_default(),
            base_url: env::var("URBAN_DICTIONARY_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            coalesce_misses: env::var("URBAN_DICTIONARY_COALESCE")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
            instance_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            coalesce_misses: false,
        }
    }
}

/// Converts a signed millisecond count into a ttl, rejecting non-positive values.
pub fn ttl_from_millis(ms: i64) -> Result<Duration> {
    if ms <= 0 {
        return Err(ClientError::Configuration(format!(
            "ttl must be positive, got {}ms",
            ms
        )));
    }
    Ok(Duration::from_millis(ms as u64))
}

/// Settings for the in-process cache backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background sweep interval
    pub cleanup_interval: Duration,
}

impl MemoryCacheConfig {
    /// Creates a new MemoryCacheConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(1)),
        }
    }
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            cleanup_interval: Duration::from_secs(1),
        }
    }
}
