//! Appointment slot queries
//!
//! A [`SlotRequest`] describes a "next free slot" lookup and decides whether
//! the cached path may answer it.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Disease;

// == Location Id ==
/// Identifier of a vaccination location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub Uuid);

impl LocationId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// == Dose Sequence ==
/// Position of the dose within a vaccination series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseSequence {
    First,
    Second,
    Booster,
}

// == Slot Route ==
/// Where a [`SlotRequest`] is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRoute {
    /// First-dose cache, keyed by location
    FirstDose(LocationId),
    /// Second-dose cache, keyed by location
    SecondDose(LocationId),
    /// Booster cache, keyed by location and disease
    Booster(LocationId, Disease),
    /// Constrained query, computed live on every call
    Live,
}

// == Slot Request ==
/// A lookup of the next free appointment slot.
///
/// First and second doses only exist for the basic COVID series, so their
/// constructors fix the disease; boosters name it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    location: LocationId,
    dose: DoseSequence,
    disease: Disease,
    comparison_date: Option<NaiveDateTime>,
    limit_max_future_date: bool,
}

impl SlotRequest {
    pub fn first_dose(location: LocationId) -> Self {
        Self::unconstrained(location, DoseSequence::First, Disease::Covid)
    }

    pub fn second_dose(location: LocationId) -> Self {
        Self::unconstrained(location, DoseSequence::Second, Disease::Covid)
    }

    pub fn booster(location: LocationId, disease: Disease) -> Self {
        Self::unconstrained(location, DoseSequence::Booster, disease)
    }

    fn unconstrained(location: LocationId, dose: DoseSequence, disease: Disease) -> Self {
        Self {
            location,
            dose,
            disease,
            comparison_date: None,
            limit_max_future_date: false,
        }
    }

    /// Only slots relative to `date` (e.g. the other dose's appointment).
    pub fn compared_to(mut self, date: NaiveDateTime) -> Self {
        self.comparison_date = Some(date);
        self
    }

    /// Only slots within the maximum booking horizon.
    pub fn limited_to_max_future_date(mut self) -> Self {
        self.limit_max_future_date = true;
        self
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn dose(&self) -> DoseSequence {
        self.dose
    }

    pub fn disease(&self) -> Disease {
        self.disease
    }

    pub fn comparison_date(&self) -> Option<NaiveDateTime> {
        self.comparison_date
    }

    pub fn limit_max_future_date(&self) -> bool {
        self.limit_max_future_date
    }

    // == Route ==
    /// Decides whether a cache may answer this request.
    ///
    /// Cacheable iff the dose is first or second with no comparison date and
    /// no future-date cap, or the dose is a booster under the same condition.
    /// Everything else goes to the live computation.
    pub fn route(&self) -> SlotRoute {
        match (self.dose, self.comparison_date, self.limit_max_future_date) {
            (DoseSequence::First, None, false) => SlotRoute::FirstDose(self.location),
            (DoseSequence::Second, None, false) => SlotRoute::SecondDose(self.location),
            (DoseSequence::Booster, None, false) => SlotRoute::Booster(self.location, self.disease),
            (DoseSequence::First | DoseSequence::Second | DoseSequence::Booster, _, _) => {
                SlotRoute::Live
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_unconstrained_requests_are_cacheable() {
        let location = LocationId::new_random();

        assert_eq!(
            SlotRequest::first_dose(location).route(),
            SlotRoute::FirstDose(location)
        );
        assert_eq!(
            SlotRequest::second_dose(location).route(),
            SlotRoute::SecondDose(location)
        );
        assert_eq!(
            SlotRequest::booster(location, Disease::Fsme).route(),
            SlotRoute::Booster(location, Disease::Fsme)
        );
    }

    #[test]
    fn test_comparison_date_bypasses_cache() {
        let location = LocationId::new_random();

        for request in [
            SlotRequest::first_dose(location),
            SlotRequest::second_dose(location),
            SlotRequest::booster(location, Disease::Covid),
        ] {
            assert_eq!(request.compared_to(date()).route(), SlotRoute::Live);
        }
    }

    #[test]
    fn test_future_date_cap_bypasses_cache() {
        let location = LocationId::new_random();

        for request in [
            SlotRequest::first_dose(location),
            SlotRequest::second_dose(location),
            SlotRequest::booster(location, Disease::Mpox),
        ] {
            assert_eq!(request.limited_to_max_future_date().route(), SlotRoute::Live);
            assert_eq!(
                request
                    .compared_to(date())
                    .limited_to_max_future_date()
                    .route(),
                SlotRoute::Live
            );
        }
    }

    #[test]
    fn test_basic_series_is_covid() {
        let location = LocationId::new_random();
        assert_eq!(SlotRequest::first_dose(location).disease(), Disease::Covid);
        assert_eq!(SlotRequest::second_dose(location).dose(), DoseSequence::Second);
    }
}
