//! Configuration Module
//!
//! Loads cache TTLs and bounds from environment variables. Configuration is
//! read once, when the cache registry is built; a bad value never fails
//! startup, it falls back to the documented default with a warning.

use std::env;
use std::time::Duration;

use tracing::warn;

// == Environment Variables ==
pub const APPLICATION_PROPERTY_TTL_VAR: &str = "VACME_CACHE_APPLICATION_PROPERTY_TTL_SECONDS";
pub const KRANKHEIT_PROPERTY_TTL_VAR: &str = "VACME_CACHE_KRANKHEIT_PROPERTY_TTL_SECONDS";
pub const NEXT_FREE_SLOT_TTL_VAR: &str = "VACME_CACHE_NEXT_FREE_SLOT_TTL_SECONDS";
pub const NEXT_FREE_SLOT_MAX_SIZE_VAR: &str = "VACME_CACHE_NEXT_FREE_SLOT_MAX_SIZE";
pub const CLEANUP_INTERVAL_VAR: &str = "VACME_CACHE_CLEANUP_INTERVAL_SECONDS";

// == Defaults ==
pub const DEFAULT_APPLICATION_PROPERTY_TTL_SECS: u64 = 60;
pub const DEFAULT_KRANKHEIT_PROPERTY_TTL_SECS: u64 = 60;
pub const DEFAULT_NEXT_FREE_SLOT_TTL_SECS: u64 = 30;
pub const DEFAULT_NEXT_FREE_SLOT_MAX_SIZE: usize = 1000;
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Upper bound of each next-free-slot cache. Larger values are capped.
pub const MAX_NEXT_FREE_SLOT_MAX_SIZE: usize = 1000;

/// TTL of the settings snapshot. Not configurable.
pub const SETTINGS_TTL: Duration = Duration::from_secs(60);

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lifetime of cached feature flags
    pub application_property_ttl: Duration,
    /// Lifetime of cached per-disease flags
    pub krankheit_property_ttl: Duration,
    /// Lifetime of cached next-free-slot answers
    pub next_free_slot_ttl: Duration,
    /// Bound of each next-free-slot cache
    pub next_free_slot_max_size: usize,
    /// Interval of the expired-entry sweep
    pub cleanup_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `VACME_CACHE_APPLICATION_PROPERTY_TTL_SECONDS` (default: 60)
    /// - `VACME_CACHE_KRANKHEIT_PROPERTY_TTL_SECONDS` (default: 60)
    /// - `VACME_CACHE_NEXT_FREE_SLOT_TTL_SECONDS` (default: 30)
    /// - `VACME_CACHE_NEXT_FREE_SLOT_MAX_SIZE` (default and cap: 1000)
    /// - `VACME_CACHE_CLEANUP_INTERVAL_SECONDS` (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from an arbitrary name -> value lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl = |var: &str, default_secs: u64| {
            resolve_ttl(var, lookup(var).as_deref(), default_secs)
        };

        Self {
            application_property_ttl: ttl(
                APPLICATION_PROPERTY_TTL_VAR,
                DEFAULT_APPLICATION_PROPERTY_TTL_SECS,
            ),
            krankheit_property_ttl: ttl(
                KRANKHEIT_PROPERTY_TTL_VAR,
                DEFAULT_KRANKHEIT_PROPERTY_TTL_SECS,
            ),
            next_free_slot_ttl: ttl(NEXT_FREE_SLOT_TTL_VAR, DEFAULT_NEXT_FREE_SLOT_TTL_SECS),
            next_free_slot_max_size: resolve_max_size(
                NEXT_FREE_SLOT_MAX_SIZE_VAR,
                lookup(NEXT_FREE_SLOT_MAX_SIZE_VAR).as_deref(),
            ),
            cleanup_interval: resolve_interval(
                CLEANUP_INTERVAL_VAR,
                lookup(CLEANUP_INTERVAL_VAR).as_deref(),
                DEFAULT_CLEANUP_INTERVAL_SECS,
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_property_ttl: Duration::from_secs(DEFAULT_APPLICATION_PROPERTY_TTL_SECS),
            krankheit_property_ttl: Duration::from_secs(DEFAULT_KRANKHEIT_PROPERTY_TTL_SECS),
            next_free_slot_ttl: Duration::from_secs(DEFAULT_NEXT_FREE_SLOT_TTL_SECS),
            next_free_slot_max_size: DEFAULT_NEXT_FREE_SLOT_MAX_SIZE,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
        }
    }
}

// == Resolve TTL ==
/// Parses a TTL given as a whole number of seconds.
///
/// An absent, non-numeric or negative value falls back to `default_secs` and
/// logs a warning naming the setting.
pub fn resolve_ttl(name: &str, raw: Option<&str>, default_secs: u64) -> Duration {
    match raw.map(str::trim) {
        Some(value) => match value.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(err) => {
                warn!(
                    setting = name,
                    value,
                    default_secs,
                    error = %err,
                    "invalid cache TTL, using default"
                );
                Duration::from_secs(default_secs)
            }
        },
        None => {
            warn!(setting = name, default_secs, "cache TTL not configured, using default");
            Duration::from_secs(default_secs)
        }
    }
}

// == Resolve Max Size ==
/// Parses the next-free-slot cache bound.
///
/// Absent means the default. Zero or non-numeric values fall back to the
/// default, values above [`MAX_NEXT_FREE_SLOT_MAX_SIZE`] are capped; both log
/// a warning.
pub fn resolve_max_size(name: &str, raw: Option<&str>) -> usize {
    let Some(value) = raw.map(str::trim) else {
        return DEFAULT_NEXT_FREE_SLOT_MAX_SIZE;
    };

    match value.parse::<usize>() {
        Ok(size) if size > MAX_NEXT_FREE_SLOT_MAX_SIZE => {
            warn!(
                setting = name,
                size,
                max = MAX_NEXT_FREE_SLOT_MAX_SIZE,
                "cache size above limit, capping"
            );
            MAX_NEXT_FREE_SLOT_MAX_SIZE
        }
        Ok(size) if size > 0 => size,
        _ => {
            warn!(
                setting = name,
                value,
                default_size = DEFAULT_NEXT_FREE_SLOT_MAX_SIZE,
                "invalid cache size, using default"
            );
            DEFAULT_NEXT_FREE_SLOT_MAX_SIZE
        }
    }
}

// == Resolve Interval ==
/// Parses the sweep interval in whole seconds. Absent means the default;
/// zero or non-numeric values fall back to it with a warning.
pub fn resolve_interval(name: &str, raw: Option<&str>, default_secs: u64) -> Duration {
    let Some(value) = raw.map(str::trim) else {
        return Duration::from_secs(default_secs);
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            warn!(setting = name, value, default_secs, "invalid sweep interval, using default");
            Duration::from_secs(default_secs)
        }
    }
}
