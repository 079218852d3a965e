//! Cache Entry Module
//!
//! Defines a single loaded value together with the instant it was written.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A loaded value and its write timestamp.
///
/// The entry carries no TTL of its own: every entry of a cache shares the
/// cache's TTL, so validity is decided by the owner.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the loader result was stored
    pub written_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self {
            value,
            written_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the value was written.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.written_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still valid under `ttl`.
    ///
    /// Boundary condition: an entry is valid iff `now - written_at < ttl`, so
    /// it turns stale the moment the full TTL has elapsed. A zero TTL means
    /// nothing is ever served from cache.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}
