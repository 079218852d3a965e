//! VacMe Cache - TTL-based loading caches for the registration backend
//!
//! Read-through caches for hot lookups: feature flags, per-disease slot
//! availability, the next free appointment slot and the global settings
//! snapshot. Each cache loads on a miss, expires entries after a fixed TTL
//! and holds a bounded number of entries.
//!
//! Build a [`CacheRegistry`] once at startup and pass it to the code that
//! needs the caches.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;

pub use config::Config;
pub use error::{CacheError, Result};
pub use services::{Backends, CacheRegistry};
pub use tasks::spawn_cleanup_task;
