//! TTL Cleanup Task
//!
//! Background sweep that purges expired responses from a `MemoryCache`.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that calls `cleanup_expired` on `cache` every `interval`.
///
/// Expired entries are already ignored on read; the sweep only reclaims
/// memory held by keys nobody asks for again. The returned handle is the
/// only way to stop the task.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new(1000);
/// let sweep = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // later
/// sweep.abort();
/// ```
pub fn spawn_cleanup_task(cache: MemoryCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache sweep task");

        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!(removed, "Cache sweep removed expired entries");
            } else {
                debug!("Cache sweep found no expired entries");
            }
        }
    })
}
