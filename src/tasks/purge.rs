//! TTL Purge Task
//!
//! Background task that periodically removes expired cache entries, so
//! entries that are never read again do not linger until evicted.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that purges expired entries every `interval`.
///
/// Each cycle takes the cache's write lock, the same one lookups and inserts
/// use. The returned handle belongs to whoever owns the cache; abort it on
/// shutdown.
///
/// # Example
/// ```ignore
/// let cache = cache::shared(CacheStore::new(100, Duration::from_secs(60)));
/// let purge_handle = spawn_purge_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<V>(cache: SharedCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL purge task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.purge_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "TTL purge: removed {} expired entries, {} remain",
                    removed, remaining
                );
            } else {
                debug!("TTL purge: no expired entries found");
            }
        }
    })
}
