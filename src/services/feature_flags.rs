//! Feature-flag cache
//!
//! Caches boolean application properties. Only the keys in [`FeatureFlag`]
//! are served; any other [`ApplicationPropertyKey`] is rejected before the
//! cache or its loader is touched.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{read_flag, PropertySource};
use crate::cache::LoadingCache;
use crate::error::{CacheError, Result};
use crate::models::{ApplicationPropertyKey, FeatureFlag};

pub const FEATURE_FLAG_CACHE: &str = "application-property";

/// One entry per supported flag.
const MAX_SIZE: usize = 1;

#[derive(Debug, Clone)]
pub struct FeatureFlagCache {
    cache: LoadingCache<FeatureFlag, bool, CacheError>,
}

impl FeatureFlagCache {
    pub fn new(properties: Arc<dyn PropertySource>, ttl: Duration) -> Self {
        let cache = LoadingCache::build(
            FEATURE_FLAG_CACHE,
            ttl,
            MAX_SIZE,
            move |flag: FeatureFlag| {
                let properties = Arc::clone(&properties);
                async move { load_flag(properties.as_ref(), flag).await }
            },
        );
        Self { cache }
    }

    /// Value of an application property flag.
    ///
    /// Fails with [`CacheError::UnsupportedKey`] for keys this cache does not
    /// serve.
    pub async fn get(&self, key: ApplicationPropertyKey) -> Result<bool> {
        let flag = FeatureFlag::try_from(key)?;
        self.cache.get(flag).await
    }

    pub async fn is_appointment_booking_enabled(&self) -> Result<bool> {
        self.cache.get(FeatureFlag::AppointmentBookingEnabled).await
    }

    pub fn cache(&self) -> &LoadingCache<FeatureFlag, bool, CacheError> {
        &self.cache
    }
}

async fn load_flag(properties: &dyn PropertySource, flag: FeatureFlag) -> Result<bool> {
    match flag {
        FeatureFlag::AppointmentBookingEnabled => {
            Ok(read_flag(properties, flag.property_name()).await?)
        }
    }
}
