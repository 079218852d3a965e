//! Loading Cache Module
//!
//! Async read-through cache: a miss invokes the loader, stores the result and
//! returns it. There is no background refresh and no single-flight; two
//! concurrent misses on one key may both load, the later write wins.

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, ExpiringStore};

/// Boxed future produced by a [`Loader`].
pub type LoadFuture<V, E> = Pin<Box<dyn Future<Output = Result<V, E>> + Send>>;

/// Computes the authoritative value for a key on a cache miss.
pub type Loader<K, V, E> = Arc<dyn Fn(K) -> LoadFuture<V, E> + Send + Sync>;

// == Loading Cache ==
/// A named, bounded, TTL-expiring cache populated on demand by its loader.
///
/// Cloning is cheap and every clone shares the same entries.
pub struct LoadingCache<K, V, E> {
    name: &'static str,
    ttl: Duration,
    max_size: usize,
    store: Arc<Mutex<ExpiringStore<K, V>>>,
    loader: Loader<K, V, E>,
}

impl<K, V, E> Clone for LoadingCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ttl: self.ttl,
            max_size: self.max_size,
            store: Arc::clone(&self.store),
            loader: Arc::clone(&self.loader),
        }
    }
}

impl<K, V, E> fmt::Debug for LoadingCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

impl<K, V, E> LoadingCache<K, V, E>
where
    K: Hash + Eq + Clone + fmt::Debug + Send + 'static,
    V: Clone + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    // == Build ==
    /// Creates a cache with a fixed TTL, a size bound and its loader.
    ///
    /// `ttl` is resolved by the caller once, at construction. A `max_size` of
    /// zero is raised to one.
    pub fn build<F, Fut>(name: &'static str, ttl: Duration, max_size: usize, loader: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let store = ExpiringStore::new(max_size, ttl);
        let max_size = store.max_entries();
        let loader: Loader<K, V, E> =
            Arc::new(move |key: K| -> LoadFuture<V, E> { Box::pin(loader(key)) });

        Self {
            name,
            ttl,
            max_size,
            store: Arc::new(Mutex::new(store)),
            loader,
        }
    }

    // == Get ==
    /// Returns the cached value for `key`, loading it on a miss.
    ///
    /// The store lock is released while the loader runs, so a slow load only
    /// delays callers of that one key. Loader errors are returned unchanged
    /// and nothing is stored for the key.
    pub async fn get(&self, key: K) -> Result<V, E> {
        let cached = self.store.lock().await.get_fresh(&key);
        if let Some(value) = cached {
            return Ok(value);
        }

        debug!(cache = self.name, ?key, "cache miss, invoking loader");

        match (self.loader)(key.clone()).await {
            Ok(value) => {
                self.store.lock().await.insert(key, value.clone());
                Ok(value)
            }
            Err(err) => {
                self.store.lock().await.record_load_failure();
                warn!(cache = self.name, ?key, error = %err, "cache loader failed");
                Err(err)
            }
        }
    }

    // == Cleanup Expired ==
    /// Drops stale entries without loading anything.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.lock().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Number of stored entries, stale ones included until touched or swept.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn counting_cache(
        ttl: Duration,
        max_size: usize,
    ) -> (LoadingCache<u32, u32, Infallible>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = LoadingCache::build("test", ttl, max_size, move |key: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(key * 10) }
        });
        (cache, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_get_within_ttl_is_a_hit() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), 10);

        assert_eq!(cache.get(1).await.unwrap(), 10);
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(1).await.unwrap(), 10);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.loads, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_after_ttl_reloads() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), 10);

        cache.get(1).await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        cache.get(1).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_always_loads() {
        let (cache, calls) = counting_cache(Duration::ZERO, 10);

        cache.get(3).await.unwrap();
        cache.get(3).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_distinct_keys_load_independently() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), 10);

        assert_eq!(cache.get(1).await.unwrap(), 10);
        assert_eq!(cache.get(2).await.unwrap(), 20);
        assert_eq!(cache.get(1).await.unwrap(), 10);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_size_bound_enforced() {
        let (cache, _) = counting_cache(Duration::from_secs(60), 5);

        for key in 0..50 {
            cache.get(key).await.unwrap();
            assert!(cache.len().await <= 5);
        }

        assert_eq!(cache.stats().await.evictions, 45);
    }

    #[tokio::test]
    async fn test_loader_error_propagates_and_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = LoadingCache::build("failing", Duration::from_secs(60), 10, move |key: u8| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(format!("backend down for {key}"))
                } else {
                    Ok(key)
                }
            }
        });

        let err = cache.get(7).await.unwrap_err();
        assert_eq!(err, "backend down for 7");
        assert!(cache.is_empty().await);

        assert_eq!(cache.get(7).await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().await.load_failures, 1);
    }

    #[tokio::test]
    async fn test_slow_load_does_not_block_other_keys() {
        let gate = Arc::new(Notify::new());
        let loader_gate = Arc::clone(&gate);
        let cache = LoadingCache::build(
            "gated",
            Duration::from_secs(60),
            10,
            move |key: &'static str| {
                let gate = Arc::clone(&loader_gate);
                async move {
                    if key == "slow" {
                        gate.notified().await;
                    }
                    Ok::<_, Infallible>(key.len())
                }
            },
        );

        let slow = tokio::spawn({
            let cache = cache.clone();
            async move { cache.get("slow").await }
        });
        tokio::task::yield_now().await;

        assert_eq!(cache.get("fast").await.unwrap(), 4);
        assert!(!slow.is_finished());

        gate.notify_one();
        assert_eq!(slow.await.unwrap().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let (cache, calls) = counting_cache(Duration::from_secs(60), 10);
        let other = cache.clone();

        cache.get(4).await.unwrap();
        other.get(4).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(other.name(), "test");
        assert_eq!(other.max_size(), 10);
    }
}
