//! Cache key types
//!
//! Closed key sets for the property caches. Keeping them as enums means an
//! unsupported key is rejected by an exhaustive match instead of a lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Application Property Key ==
/// Keys of the global application properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationPropertyKey {
    /// Whether appointments may be booked at all
    AppointmentBookingEnabled,
    BoosterBookingEnabled,
    SelfRegistrationEnabled,
    MailNotificationsEnabled,
}

impl ApplicationPropertyKey {
    /// Name of the backing property.
    pub fn property_name(self) -> &'static str {
        match self {
            Self::AppointmentBookingEnabled => "vacme.appointment.booking.enabled",
            Self::BoosterBookingEnabled => "vacme.booster.booking.enabled",
            Self::SelfRegistrationEnabled => "vacme.self.registration.enabled",
            Self::MailNotificationsEnabled => "vacme.mail.notifications.enabled",
        }
    }
}

impl fmt::Display for ApplicationPropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}

// == Feature Flag ==
/// The application properties the feature-flag cache serves.
///
/// Narrower than [`ApplicationPropertyKey`] on purpose: every other key is an
/// unsupported-operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    AppointmentBookingEnabled,
}

impl FeatureFlag {
    pub fn property_name(self) -> &'static str {
        ApplicationPropertyKey::from(self).property_name()
    }
}

impl From<FeatureFlag> for ApplicationPropertyKey {
    fn from(flag: FeatureFlag) -> Self {
        match flag {
            FeatureFlag::AppointmentBookingEnabled => Self::AppointmentBookingEnabled,
        }
    }
}

impl TryFrom<ApplicationPropertyKey> for FeatureFlag {
    type Error = CacheError;

    fn try_from(key: ApplicationPropertyKey) -> Result<Self, Self::Error> {
        match key {
            ApplicationPropertyKey::AppointmentBookingEnabled => {
                Ok(Self::AppointmentBookingEnabled)
            }
            ApplicationPropertyKey::BoosterBookingEnabled
            | ApplicationPropertyKey::SelfRegistrationEnabled
            | ApplicationPropertyKey::MailNotificationsEnabled => {
                Err(CacheError::UnsupportedKey(key.to_string()))
            }
        }
    }
}

// == Disease ==
/// Diseases a vaccination can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disease {
    Covid,
    Mpox,
    Fsme,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Covid, Disease::Mpox, Disease::Fsme];

    pub fn code(self) -> &'static str {
        match self {
            Self::Covid => "COVID",
            Self::Mpox => "MPOX",
            Self::Fsme => "FSME",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
