//! Services Module
//!
//! The four call-site caches and the registry that owns them.
//!
//! | Cache | Key | Value |
//! |---|---|---|
//! | [`FeatureFlagCache`] | [`FeatureFlag`](crate::models::FeatureFlag) | `bool` |
//! | [`DiseaseFlagCache`] | [`Disease`](crate::models::Disease) | `bool` |
//! | [`NextSlotCache`] | location, or location and disease | next free slot |
//! | [`SettingsCache`] | singleton | [`Settings`](crate::models::Settings) |

mod disease_flags;
mod feature_flags;
mod next_slot;
mod registry;
mod settings;

pub use disease_flags::{DiseaseFlagCache, DISEASE_FLAG_CACHE};
pub use feature_flags::{FeatureFlagCache, FEATURE_FLAG_CACHE};
pub use next_slot::{NextSlotCache, BOOSTER_CACHE, FIRST_DOSE_CACHE, SECOND_DOSE_CACHE};
pub use registry::{Backends, CacheRegistry, RegistryStats};
pub use settings::{assemble_settings, SettingsCache, SettingsKey, SETTINGS_CACHE};
