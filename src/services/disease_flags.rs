//! Per-disease flag cache
//!
//! Caches whether a disease currently has no free appointment slots at all.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::DiseaseDirectory;
use crate::cache::LoadingCache;
use crate::error::{CacheError, Result};
use crate::models::Disease;

pub const DISEASE_FLAG_CACHE: &str = "krankheit-property";

#[derive(Debug, Clone)]
pub struct DiseaseFlagCache {
    cache: LoadingCache<Disease, bool, CacheError>,
}

impl DiseaseFlagCache {
    pub fn new(directory: Arc<dyn DiseaseDirectory>, ttl: Duration) -> Self {
        let cache = LoadingCache::build(
            DISEASE_FLAG_CACHE,
            ttl,
            Disease::ALL.len(),
            move |disease: Disease| {
                let directory = Arc::clone(&directory);
                async move { Ok::<_, CacheError>(directory.no_free_slots(disease).await?) }
            },
        );
        Self { cache }
    }

    /// True when `disease` currently has no free slots anywhere.
    pub async fn no_free_slots(&self, disease: Disease) -> Result<bool> {
        self.cache.get(disease).await
    }

    pub fn cache(&self) -> &LoadingCache<Disease, bool, CacheError> {
        &self.cache
    }
}
