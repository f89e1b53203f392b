//! Definition Client
//!
//! Cache-aside access to the Urban Dictionary API. Every query goes through
//! [`DefinitionClient::request`]: look the request URL up in the cache, and on
//! a miss fetch it upstream and write the body back with the configured ttl.

mod flight;
mod query;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::cache::CacheBackend;
use crate::config::{ttl_from_millis, ClientConfig};
use crate::error::{ClientError, Result};
use crate::models::{AutocompleteList, AutocompleteSuggestion, DefinitionList, DefinitionRecord};

use flight::KeyedLocks;
pub use query::{build_url, encode_query, ParamValue, QueryParam};

// == Endpoints ==
pub const RANDOM_ENDPOINT: &str = "random";
pub const DEFINE_ENDPOINT: &str = "define";
pub const AUTOCOMPLETE_ENDPOINT: &str = "autocomplete-extra";

// == Definition Client ==
/// Client for the definition API with response caching.
///
/// Immutable once built. The cache backend and the HTTP client are shared
/// handles owned by the caller.
pub struct DefinitionClient {
    cache: Arc<dyn CacheBackend>,
    http: reqwest::Client,
    ttl: Duration,
    instance_id: String,
    base_url: String,
    in_flight: Option<KeyedLocks>,
}

impl fmt::Debug for DefinitionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionClient")
            .field("ttl", &self.ttl)
            .field("instance_id", &self.instance_id)
            .field("base_url", &self.base_url)
            .field("coalesce_misses", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl DefinitionClient {
    pub fn builder() -> DefinitionClientBuilder {
        DefinitionClientBuilder::default()
    }

    /// Creates a client over `cache` with the given settings.
    pub fn new(cache: Arc<dyn CacheBackend>, config: ClientConfig) -> Result<Self> {
        Self::builder().shared_cache(cache).config(config).build()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The key a request for `endpoint`/`params` is cached under.
    ///
    /// The instance id is a plain prefix, applied to both reads and writes.
    pub fn cache_key(&self, endpoint: &str, params: &[QueryParam]) -> Result<String> {
        let url = build_url(&self.base_url, endpoint, params)?;
        Ok(self.key_for(&url))
    }

    fn key_for(&self, url: &str) -> String {
        format!("{}{}", self.instance_id, url)
    }

    // == Request ==
    /// Raw cache-aside request. Returns the upstream JSON, or its cached copy.
    ///
    /// A hit costs one cache read. A miss adds one upstream GET and one
    /// cache write of the body, which then lives for the client ttl.
    #[instrument(skip(self, params), fields(instance = %self.instance_id))]
    pub async fn request(&self, endpoint: &str, params: &[QueryParam]) -> Result<Value> {
        let url = build_url(&self.base_url, endpoint, params)?;
        let key = self.key_for(&url);

        if let Some(value) = self.lookup(&key).await? {
            return Ok(value);
        }

        match &self.in_flight {
            None => self.fetch_and_store(&url, &key).await,
            Some(locks) => {
                let _guard = locks.lock(&key).await;
                // whoever held the lock before us may have filled the entry
                if let Some(value) = self.lookup(&key).await? {
                    return Ok(value);
                }
                self.fetch_and_store(&url, &key).await
            }
        }
    }

    async fn lookup(&self, key: &str) -> Result<Option<Value>> {
        let Some(cached) = self.cache.get(key).await? else {
            debug!(key, "Cache miss");
            return Ok(None);
        };

        debug!(key, "Cache hit");
        serde_json::from_str(&cached)
            .map(Some)
            .map_err(|e| ClientError::CorruptCacheEntry {
                key: key.to_owned(),
                reason: e.to_string(),
            })
    }

    async fn fetch_and_store(&self, url: &str, key: &str) -> Result<Value> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ClientError::UpstreamBody(e.to_string()))?;

        self.cache.set(key, body, self.ttl).await?;
        debug!(key, ttl_ms = self.ttl.as_millis() as u64, "Cached upstream response");

        Ok(value)
    }

    // == Queries ==
    /// Random definitions.
    pub async fn random(&self) -> Result<Vec<DefinitionRecord>> {
        let raw = self.request(RANDOM_ENDPOINT, &[]).await?;
        decode::<DefinitionList>(raw).map(DefinitionList::into_records)
    }

    /// Definitions for `term`. A missing or empty term returns random ones.
    pub async fn define(&self, term: Option<&str>) -> Result<Vec<DefinitionRecord>> {
        let Some(term) = term.filter(|t| !t.is_empty()) else {
            return self.random().await;
        };

        let raw = self
            .request(DEFINE_ENDPOINT, &[QueryParam::new("term", term)])
            .await?;
        decode::<DefinitionList>(raw).map(DefinitionList::into_records)
    }

    /// Autocomplete suggestions for a (partial) term. The term is sent as-is,
    /// including when empty.
    pub async fn autocomplete(&self, term: &str) -> Result<Vec<AutocompleteSuggestion>> {
        let raw = self
            .request(AUTOCOMPLETE_ENDPOINT, &[QueryParam::new("term", term)])
            .await?;
        decode::<AutocompleteList>(raw).map(AutocompleteList::into_suggestions)
    }
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T> {
    serde_json::from_value(raw).map_err(|e| ClientError::UpstreamBody(e.to_string()))
}

// == Builder ==
/// Collects client options; `build` validates them.
#[derive(Default)]
pub struct DefinitionClientBuilder {
    cache: Option<Arc<dyn CacheBackend>>,
    http: Option<reqwest::Client>,
    config: ClientConfig,
    ttl_ms: Option<i64>,
}

impl DefinitionClientBuilder {
    /// Cache backend to use. Required.
    pub fn cache<C: CacheBackend + 'static>(self, cache: C) -> Self {
        self.shared_cache(Arc::new(cache))
    }

    pub fn shared_cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// HTTP client for upstream calls; a default one is created otherwise.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Replaces every setting with `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self.ttl_ms = None;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self.ttl_ms = None;
        self
    }

    /// Ttl as a signed millisecond count; non-positive values fail `build`.
    pub fn ttl_ms(mut self, ms: i64) -> Self {
        self.ttl_ms = Some(ms);
        self
    }

    pub fn instance_id(mut self, id: impl Into<String>) -> Self {
        self.config.instance_id = id.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Let concurrent misses for one key share a single upstream fetch.
    pub fn coalesce_misses(mut self, enabled: bool) -> Self {
        self.config.coalesce_misses = enabled;
        self
    }

    pub fn build(self) -> Result<DefinitionClient> {
        let cache = self.cache.ok_or_else(|| {
            ClientError::Configuration("a cache backend is required".to_string())
        })?;

        let ttl = match self.ttl_ms {
            Some(ms) => ttl_from_millis(ms)?,
            None => self.config.ttl,
        };
        // backends expire at millisecond granularity
        if ttl.as_millis() == 0 {
            return Err(ClientError::Configuration(format!(
                "ttl must be at least 1ms, got {:?}",
                ttl
            )));
        }

        let base_url = self.config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration(
                "base url must not be empty".to_string(),
            ));
        }

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder().build()?,
        };

        Ok(DefinitionClient {
            cache,
            http,
            ttl,
            instance_id: self.config.instance_id,
            base_url,
            in_flight: self.config.coalesce_misses.then(KeyedLocks::default),
        })
    }
}
