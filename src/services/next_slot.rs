//! Next-free-slot cache
//!
//! Three caches accelerate the unconstrained "what is the very next open slot"
//! query: first dose and second dose keyed by location, booster keyed by
//! location and disease. Requests with a comparison date or a future-date cap
//! always go to the live computation.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::backend::SlotFinder;
use crate::cache::LoadingCache;
use crate::error::{CacheError, Result};
use crate::models::{Disease, LocationId, SlotRequest, SlotRoute};

pub const FIRST_DOSE_CACHE: &str = "next-free-slot-first-dose";
pub const SECOND_DOSE_CACHE: &str = "next-free-slot-second-dose";
pub const BOOSTER_CACHE: &str = "next-free-slot-booster";

type Slot = Option<NaiveDateTime>;

#[derive(Clone)]
pub struct NextSlotCache {
    finder: Arc<dyn SlotFinder>,
    first_dose: LoadingCache<LocationId, Slot, CacheError>,
    second_dose: LoadingCache<LocationId, Slot, CacheError>,
    booster: LoadingCache<(LocationId, Disease), Slot, CacheError>,
}

impl NextSlotCache {
    pub fn new(finder: Arc<dyn SlotFinder>, ttl: Duration, max_size: usize) -> Self {
        let first_dose =
            location_cache(FIRST_DOSE_CACHE, &finder, ttl, max_size, SlotRequest::first_dose);
        let second_dose =
            location_cache(SECOND_DOSE_CACHE, &finder, ttl, max_size, SlotRequest::second_dose);

        let booster_finder = Arc::clone(&finder);
        let booster = LoadingCache::build(
            BOOSTER_CACHE,
            ttl,
            max_size,
            move |(location, disease): (LocationId, Disease)| {
                let finder = Arc::clone(&booster_finder);
                async move {
                    let request = SlotRequest::booster(location, disease);
                    Ok::<_, CacheError>(finder.next_free_slot(&request).await?)
                }
            },
        );

        Self {
            finder,
            first_dose,
            second_dose,
            booster,
        }
    }

    // == Next Free Slot ==
    /// Next open slot for `request`, from cache when the request allows it.
    pub async fn next_free_slot(&self, request: &SlotRequest) -> Result<Slot> {
        match request.route() {
            SlotRoute::FirstDose(location) => self.first_dose.get(location).await,
            SlotRoute::SecondDose(location) => self.second_dose.get(location).await,
            SlotRoute::Booster(location, disease) => self.booster.get((location, disease)).await,
            SlotRoute::Live => {
                debug!(
                    location = %request.location(),
                    dose = ?request.dose(),
                    disease = %request.disease(),
                    "constrained slot query, bypassing cache"
                );
                Ok(self.finder.next_free_slot(request).await?)
            }
        }
    }

    pub fn first_dose_cache(&self) -> &LoadingCache<LocationId, Slot, CacheError> {
        &self.first_dose
    }

    pub fn second_dose_cache(&self) -> &LoadingCache<LocationId, Slot, CacheError> {
        &self.second_dose
    }

    pub fn booster_cache(&self) -> &LoadingCache<(LocationId, Disease), Slot, CacheError> {
        &self.booster
    }
}

impl std::fmt::Debug for NextSlotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextSlotCache")
            .field("first_dose", &self.first_dose)
            .field("second_dose", &self.second_dose)
            .field("booster", &self.booster)
            .finish_non_exhaustive()
    }
}

fn location_cache(
    name: &'static str,
    finder: &Arc<dyn SlotFinder>,
    ttl: Duration,
    max_size: usize,
    request_for: fn(LocationId) -> SlotRequest,
) -> LoadingCache<LocationId, Slot, CacheError> {
    let finder = Arc::clone(finder);
    LoadingCache::build(name, ttl, max_size, move |location: LocationId| {
        let finder = Arc::clone(&finder);
        async move {
            let request = request_for(location);
            Ok::<_, CacheError>(finder.next_free_slot(&request).await?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SourceError;
    use crate::models::DoseSequence;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Records every live query and answers with a fixed slot.
    #[derive(Default)]
    struct RecordingFinder {
        queries: Mutex<Vec<SlotRequest>>,
    }

    impl RecordingFinder {
        fn count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        fn queries(&self) -> Vec<SlotRequest> {
            self.queries.lock().unwrap().clone()
        }
    }

    fn slot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, 12)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[async_trait]
    impl SlotFinder for RecordingFinder {
        async fn next_free_slot(
            &self,
            request: &SlotRequest,
        ) -> std::result::Result<Option<NaiveDateTime>, SourceError> {
            self.queries.lock().unwrap().push(*request);
            Ok(match request.dose() {
                DoseSequence::Second => None,
                DoseSequence::First | DoseSequence::Booster => Some(slot()),
            })
        }
    }

    fn cache_with_finder() -> (NextSlotCache, Arc<RecordingFinder>) {
        let finder = Arc::new(RecordingFinder::default());
        let cache = NextSlotCache::new(finder.clone(), Duration::from_secs(30), 100);
        (cache, finder)
    }

    #[tokio::test]
    async fn test_first_dose_served_from_cache() {
        let (cache, finder) = cache_with_finder();
        let request = SlotRequest::first_dose(LocationId::new_random());

        for _ in 0..5 {
            assert_eq!(cache.next_free_slot(&request).await.unwrap(), Some(slot()));
        }

        assert_eq!(finder.count(), 1);
        assert_eq!(finder.queries()[0], request);
    }

    #[tokio::test]
    async fn test_comparison_date_always_goes_live() {
        let (cache, finder) = cache_with_finder();
        let request = SlotRequest::first_dose(LocationId::new_random()).compared_to(slot());

        for _ in 0..5 {
            cache.next_free_slot(&request).await.unwrap();
        }

        assert_eq!(finder.count(), 5);
        assert!(cache.first_dose_cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_future_date_cap_always_goes_live() {
        let (cache, finder) = cache_with_finder();
        let request = SlotRequest::booster(LocationId::new_random(), Disease::Covid)
            .limited_to_max_future_date();

        cache.next_free_slot(&request).await.unwrap();
        cache.next_free_slot(&request).await.unwrap();

        assert_eq!(finder.count(), 2);
        assert!(cache.booster_cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_dose_caches_are_independent() {
        let (cache, finder) = cache_with_finder();
        let location = LocationId::new_random();

        assert_eq!(
            cache.next_free_slot(&SlotRequest::first_dose(location)).await.unwrap(),
            Some(slot())
        );
        assert_eq!(
            cache.next_free_slot(&SlotRequest::second_dose(location)).await.unwrap(),
            None
        );
        cache
            .next_free_slot(&SlotRequest::second_dose(location))
            .await
            .unwrap();

        assert_eq!(finder.count(), 2);
        assert_eq!(cache.first_dose_cache().len().await, 1);
        assert_eq!(cache.second_dose_cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_booster_keyed_by_location_and_disease() {
        let (cache, finder) = cache_with_finder();
        let location = LocationId::new_random();

        for disease in Disease::ALL {
            cache
                .next_free_slot(&SlotRequest::booster(location, disease))
                .await
                .unwrap();
        }
        cache
            .next_free_slot(&SlotRequest::booster(location, Disease::Mpox))
            .await
            .unwrap();

        assert_eq!(finder.count(), Disease::ALL.len());
        assert_eq!(cache.booster_cache().len().await, Disease::ALL.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_slot_expires() {
        let (cache, finder) = cache_with_finder();
        let request = SlotRequest::second_dose(LocationId::new_random());

        cache.next_free_slot(&request).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        cache.next_free_slot(&request).await.unwrap();

        assert_eq!(finder.count(), 2);
    }
}
