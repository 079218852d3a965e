//! Settings snapshot cache
//!
//! A single-entry cache holding the whole [`Settings`] aggregate. The snapshot
//! is rebuilt from its properties as one unit: if any read fails, nothing is
//! cached and the caller gets [`CacheError::SettingsUnavailable`].

use std::sync::Arc;

use crate::backend::{require_bool, require_string, require_u32, PropertySource, SourceError};
use crate::cache::LoadingCache;
use crate::config::SETTINGS_TTL;
use crate::error::{CacheError, Result};
use crate::models::settings::property;
use crate::models::Settings;

pub const SETTINGS_CACHE: &str = "settings";

/// The only key of the settings cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsKey;

#[derive(Debug, Clone)]
pub struct SettingsCache {
    cache: LoadingCache<SettingsKey, Arc<Settings>, CacheError>,
}

impl SettingsCache {
    pub fn new(properties: Arc<dyn PropertySource>) -> Self {
        let cache = LoadingCache::build(SETTINGS_CACHE, SETTINGS_TTL, 1, move |_: SettingsKey| {
            let properties = Arc::clone(&properties);
            async move {
                assemble_settings(properties.as_ref())
                    .await
                    .map(Arc::new)
                    .map_err(CacheError::SettingsUnavailable)
            }
        });
        Self { cache }
    }

    /// Current settings snapshot.
    pub async fn get_settings(&self) -> Result<Arc<Settings>> {
        self.cache.get(SettingsKey).await
    }

    pub fn cache(&self) -> &LoadingCache<SettingsKey, Arc<Settings>, CacheError> {
        &self.cache
    }
}

// == Assemble Settings ==
/// Reads every settings property; the first failing read aborts the snapshot.
pub async fn assemble_settings(
    source: &dyn PropertySource,
) -> std::result::Result<Settings, SourceError> {
    Ok(Settings {
        dose_distance_desired_days: require_u32(source, property::DOSE_DISTANCE_DESIRED_DAYS)
            .await?,
        dose_distance_tolerance_before_days: require_u32(
            source,
            property::DOSE_DISTANCE_TOLERANCE_BEFORE_DAYS,
        )
        .await?,
        dose_distance_tolerance_after_days: require_u32(
            source,
            property::DOSE_DISTANCE_TOLERANCE_AFTER_DAYS,
        )
        .await?,
        booster_min_days_after_basic: require_u32(source, property::BOOSTER_MIN_DAYS_AFTER_BASIC)
            .await?,
        booster_min_days_after_infection: require_u32(
            source,
            property::BOOSTER_MIN_DAYS_AFTER_INFECTION,
        )
        .await?,
        max_future_booking_days: require_u32(source, property::MAX_FUTURE_BOOKING_DAYS).await?,
        slot_duration_minutes: require_u32(source, property::SLOT_DURATION_MINUTES).await?,
        min_age_years: require_u32(source, property::MIN_AGE_YEARS).await?,
        self_registration_enabled: require_bool(source, property::SELF_REGISTRATION_ENABLED)
            .await?,
        booster_booking_enabled: require_bool(source, property::BOOSTER_BOOKING_ENABLED).await?,
        mobile_vaccination_enabled: require_bool(source, property::MOBILE_VACCINATION_ENABLED)
            .await?,
        waitlist_visible: require_bool(source, property::WAITLIST_VISIBLE).await?,
        mandant: require_string(source, property::MANDANT).await?,
        hotline_phone: require_string(source, property::HOTLINE_PHONE).await?,
        support_email: require_string(source, property::SUPPORT_EMAIL).await?,
    })
}
