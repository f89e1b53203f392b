//! Urban Dictionary client with cache-aside response caching
//!
//! Fetches random definitions, definitions for a term and autocomplete
//! suggestions, keeping each upstream response in a pluggable key-value
//! store for a configurable ttl.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{CacheBackend, MemoryCache};
#[cfg(feature = "redis")]
pub use cache::RedisCache;
pub use client::{DefinitionClient, DefinitionClientBuilder, ParamValue, QueryParam};
pub use config::{ClientConfig, MemoryCacheConfig};
pub use error::{ClientError, Result};
pub use models::{AutocompleteSuggestion, DefinitionRecord};
pub use tasks::spawn_cleanup_task;
