//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the caches.
//!
//! # Tasks
//! - Expiry sweep: drops expired cache entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
