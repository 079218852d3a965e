//! Cache registry
//!
//! Builds every cache once, after configuration is loaded, and hands them out
//! by reference. There is no global instance: callers own the registry and
//! pass it (or clones of it) to whatever needs a cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::backend::{DiseaseDirectory, PropertySource, SlotFinder};
use crate::cache::CacheStats;
use crate::config::Config;
use crate::services::{DiseaseFlagCache, FeatureFlagCache, NextSlotCache, SettingsCache};

/// Collaborators the cache loaders read from.
#[derive(Clone)]
pub struct Backends {
    pub properties: Arc<dyn PropertySource>,
    pub diseases: Arc<dyn DiseaseDirectory>,
    pub slots: Arc<dyn SlotFinder>,
}

/// Statistics of every registered cache, keyed by cache name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistryStats {
    pub caches: BTreeMap<&'static str, CacheStats>,
}

impl RegistryStats {
    pub fn get(&self, name: &str) -> Option<&CacheStats> {
        self.caches.get(name)
    }
}

// == Cache Registry ==
#[derive(Debug, Clone)]
pub struct CacheRegistry {
    feature_flags: FeatureFlagCache,
    disease_flags: DiseaseFlagCache,
    next_slots: NextSlotCache,
    settings: SettingsCache,
}

impl CacheRegistry {
    /// Builds all caches. TTLs are taken from `config` here and never re-read.
    pub fn new(config: &Config, backends: Backends) -> Self {
        let registry = Self {
            feature_flags: FeatureFlagCache::new(
                Arc::clone(&backends.properties),
                config.application_property_ttl,
            ),
            disease_flags: DiseaseFlagCache::new(backends.diseases, config.krankheit_property_ttl),
            next_slots: NextSlotCache::new(
                backends.slots,
                config.next_free_slot_ttl,
                config.next_free_slot_max_size,
            ),
            settings: SettingsCache::new(backends.properties),
        };
        registry.log_layout();
        registry
    }

    fn log_layout(&self) {
        let flags = self.feature_flags.cache();
        let diseases = self.disease_flags.cache();
        let first = self.next_slots.first_dose_cache();
        let second = self.next_slots.second_dose_cache();
        let booster = self.next_slots.booster_cache();
        let settings = self.settings.cache();

        for (name, ttl, max_size) in [
            (flags.name(), flags.ttl(), flags.max_size()),
            (diseases.name(), diseases.ttl(), diseases.max_size()),
            (first.name(), first.ttl(), first.max_size()),
            (second.name(), second.ttl(), second.max_size()),
            (booster.name(), booster.ttl(), booster.max_size()),
            (settings.name(), settings.ttl(), settings.max_size()),
        ] {
            info!(cache = name, ttl_secs = ttl.as_secs(), max_size, "cache initialized");
        }
    }

    pub fn feature_flags(&self) -> &FeatureFlagCache {
        &self.feature_flags
    }

    pub fn disease_flags(&self) -> &DiseaseFlagCache {
        &self.disease_flags
    }

    pub fn next_slots(&self) -> &NextSlotCache {
        &self.next_slots
    }

    pub fn settings(&self) -> &SettingsCache {
        &self.settings
    }

    // == Stats ==
    /// Snapshot of every cache's counters.
    pub async fn stats(&self) -> RegistryStats {
        let flags = self.feature_flags.cache();
        let diseases = self.disease_flags.cache();
        let first = self.next_slots.first_dose_cache();
        let second = self.next_slots.second_dose_cache();
        let booster = self.next_slots.booster_cache();
        let settings = self.settings.cache();

        let mut caches = BTreeMap::new();
        caches.insert(flags.name(), flags.stats().await);
        caches.insert(diseases.name(), diseases.stats().await);
        caches.insert(first.name(), first.stats().await);
        caches.insert(second.name(), second.stats().await);
        caches.insert(booster.name(), booster.stats().await);
        caches.insert(settings.name(), settings.stats().await);

        RegistryStats { caches }
    }

    // == Cleanup Expired ==
    /// Drops stale entries from every cache; returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.feature_flags.cache().cleanup_expired().await
            + self.disease_flags.cache().cleanup_expired().await
            + self.next_slots.first_dose_cache().cleanup_expired().await
            + self.next_slots.second_dose_cache().cleanup_expired().await
            + self.next_slots.booster_cache().cleanup_expired().await
            + self.settings.cache().cleanup_expired().await
    }
}
