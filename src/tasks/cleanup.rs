//! Expiry Sweep Task
//!
//! Background task that periodically drops expired entries from every cache
//! in a registry and logs per-cache hit rates. It never calls a loader:
//! stale keys are simply forgotten and reloaded on their next request.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::CacheRegistry;

/// Spawns the sweep loop. Abort the returned handle on shutdown.
///
/// ```ignore
/// let registry = CacheRegistry::new(&config, backends);
/// let sweeper = spawn_cleanup_task(registry.clone(), config.cleanup_interval);
/// // ...
/// sweeper.abort();
/// ```
pub fn spawn_cleanup_task(registry: CacheRegistry, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            "Starting cache expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = registry.cleanup_expired().await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }

            for (cache, stats) in registry.stats().await.caches {
                debug!(
                    cache,
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    evictions = stats.evictions,
                    "cache stats"
                );
            }
        }
    })
}
