//! Cache Module
//!
//! Generic in-memory loading cache with TTL expiry and LRU-bounded size.

mod entry;
mod loading;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use loading::{LoadFuture, Loader, LoadingCache};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ExpiringStore;
