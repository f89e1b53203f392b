//! Redis cache backend.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use crate::cache::CacheBackend;
use crate::error::Result;

/// Cache backend over a Redis connection manager.
///
/// Entries are written with `SET key value PX <ttl>`, so Redis owns expiry.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        debug!(url, "Connected to redis");
        Ok(Self { conn })
    }

    /// Wraps a connection the caller already manages.
    pub fn from_connection(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(px_millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

/// `PX` argument for `ttl`: whole milliseconds, at least 1 since redis
/// rejects `PX 0`, saturating at `u64::MAX`.
pub(crate) fn px_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_millis_whole_milliseconds() {
        assert_eq!(px_millis(Duration::from_secs(3600)), 3_600_000);
        assert_eq!(px_millis(Duration::from_micros(1500)), 1);
    }

    #[test]
    fn test_px_millis_never_zero() {
        assert_eq!(px_millis(Duration::ZERO), 1);
        assert_eq!(px_millis(Duration::from_micros(500)), 1);
    }

    #[test]
    fn test_px_millis_saturates() {
        assert_eq!(px_millis(Duration::MAX), u64::MAX);
    }

    // Needs a live server: REDIS_URL=redis://127.0.0.1:6379 cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_redis_round_trip_and_expiry() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let cache = RedisCache::connect(&url).await.unwrap();
        let key = format!("urban_dictionary:test:{}", std::process::id());

        cache
            .set(&key, r#"{"list":[]}"#.to_string(), Duration::from_millis(200))
            .await
            .unwrap();
        assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some(r#"{"list":[]}"#));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }
}
