//! Expiring store
//!
//! Bounded map combining HashMap storage with LRU tracking and TTL expiry.
//! The store is synchronous and unsynchronized; [`LoadingCache`] owns the lock.
//!
//! [`LoadingCache`]: crate::cache::LoadingCache

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Expiring Store ==
/// Storage for one cache instance: a shared TTL and a hard size bound.
#[derive(Debug)]
pub struct ExpiringStore<K, V> {
    /// Entries keyed by cache key
    entries: HashMap<K, CacheEntry<V>>,
    /// Eviction order
    lru: LruTracker<K>,
    stats: CacheStats,
    /// Maximum number of entries allowed, at least 1
    max_entries: usize,
    /// Lifetime of every entry
    ttl: Duration,
}

impl<K, V> ExpiringStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store. A `max_entries` of zero is raised to one.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: HashMap::with_capacity(max_entries.min(64)),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Get Fresh ==
    /// Returns a clone of the value if the key has a live entry.
    ///
    /// A stale entry is dropped on the spot and counted as a miss.
    pub fn get_fresh(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.record_access(key);
                Some(value)
            }
            Some(_) => {
                self.entries.remove(key);
                self.lru.forget(key);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a freshly loaded value stamped with the current time.
    ///
    /// Overwrites an existing entry for the key. A new key inserted into a
    /// full store evicts the least recently used entry first.
    pub fn insert(&mut self, key: K, value: V) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.lru.pop_least_recent() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        self.lru.record_access(&key);
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.record_load();
        self.stats.set_total_entries(self.entries.len());
    }

    pub fn record_load_failure(&mut self) {
        self.stats.record_load_failure();
    }

    // == Cleanup Expired ==
    /// Removes all stale entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.lru.forget(key);
        }

        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Number of stored entries, stale ones included until touched or swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
