//! Settings snapshot
//!
//! Immutable aggregate of process-wide configuration values, always cached
//! and handed out as a whole.

use serde::Serialize;

/// Property names read to assemble a [`Settings`] snapshot.
pub mod property {
    pub const DOSE_DISTANCE_DESIRED_DAYS: &str = "vacme.dose.distance.desired.days";
    pub const DOSE_DISTANCE_TOLERANCE_BEFORE_DAYS: &str = "vacme.dose.distance.tolerance.before.days";
    pub const DOSE_DISTANCE_TOLERANCE_AFTER_DAYS: &str = "vacme.dose.distance.tolerance.after.days";
    pub const BOOSTER_MIN_DAYS_AFTER_BASIC: &str = "vacme.booster.min.days.after.basic";
    pub const BOOSTER_MIN_DAYS_AFTER_INFECTION: &str = "vacme.booster.min.days.after.infection";
    pub const MAX_FUTURE_BOOKING_DAYS: &str = "vacme.booking.max.future.days";
    pub const SLOT_DURATION_MINUTES: &str = "vacme.slot.duration.minutes";
    pub const MIN_AGE_YEARS: &str = "vacme.registration.min.age.years";
    pub const SELF_REGISTRATION_ENABLED: &str = "vacme.self.registration.enabled";
    pub const BOOSTER_BOOKING_ENABLED: &str = "vacme.booster.booking.enabled";
    pub const MOBILE_VACCINATION_ENABLED: &str = "vacme.mobile.vaccination.enabled";
    pub const WAITLIST_VISIBLE: &str = "vacme.waitlist.visible";
    pub const MANDANT: &str = "vacme.mandant";
    pub const HOTLINE_PHONE: &str = "vacme.hotline.phone";
    pub const SUPPORT_EMAIL: &str = "vacme.support.email";

    /// Every property the snapshot depends on.
    pub const ALL: [&str; 15] = [
        DOSE_DISTANCE_DESIRED_DAYS,
        DOSE_DISTANCE_TOLERANCE_BEFORE_DAYS,
        DOSE_DISTANCE_TOLERANCE_AFTER_DAYS,
        BOOSTER_MIN_DAYS_AFTER_BASIC,
        BOOSTER_MIN_DAYS_AFTER_INFECTION,
        MAX_FUTURE_BOOKING_DAYS,
        SLOT_DURATION_MINUTES,
        MIN_AGE_YEARS,
        SELF_REGISTRATION_ENABLED,
        BOOSTER_BOOKING_ENABLED,
        MOBILE_VACCINATION_ENABLED,
        WAITLIST_VISIBLE,
        MANDANT,
        HOTLINE_PHONE,
        SUPPORT_EMAIL,
    ];
}

// == Settings ==
/// Global settings shared by the registration frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Desired distance between first and second dose
    pub dose_distance_desired_days: u32,
    pub dose_distance_tolerance_before_days: u32,
    pub dose_distance_tolerance_after_days: u32,
    pub booster_min_days_after_basic: u32,
    pub booster_min_days_after_infection: u32,
    /// Booking horizon used when a query is limited to the max future date
    pub max_future_booking_days: u32,
    pub slot_duration_minutes: u32,
    pub min_age_years: u32,
    pub self_registration_enabled: bool,
    pub booster_booking_enabled: bool,
    pub mobile_vaccination_enabled: bool,
    pub waitlist_visible: bool,
    /// Canton operating this installation
    pub mandant: String,
    pub hotline_phone: String,
    pub support_email: String,
}
