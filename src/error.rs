//! Error types for the definition client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Client Error Enum ==
/// Unified error type for the client and its cache backends.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid construction options
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The HTTP call itself failed (connect, timeout, TLS, ...)
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// The upstream body was not valid JSON
    #[error("Upstream body could not be decoded: {0}")]
    UpstreamBody(String),

    /// The cache store could not be reached
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A cached value exists but is not valid JSON
    #[error("Corrupt cache entry for {key}: {reason}")]
    CorruptCacheEntry { key: String, reason: String },

    /// The cache store refused the write
    #[error("Cache rejected write: {0}")]
    CacheRejected(String),
}

impl ClientError {
    /// True for failures that originate at the upstream service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClientError::UpstreamTransport(_)
                | ClientError::UpstreamStatus { .. }
                | ClientError::UpstreamBody(_)
        )
    }

    /// True for failures that originate at the cache store.
    pub fn is_cache(&self) -> bool {
        matches!(
            self,
            ClientError::CacheUnavailable(_)
                | ClientError::CorruptCacheEntry { .. }
                | ClientError::CacheRejected(_)
        )
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for ClientError {
    fn from(err: redis::RedisError) -> Self {
        ClientError::CacheUnavailable(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, ClientError>;
