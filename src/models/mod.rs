//! Domain models for the caches
//!
//! Key types, slot queries and the settings snapshot.

pub mod keys;
pub mod settings;
pub mod slots;

// Re-export commonly used types
pub use keys::{ApplicationPropertyKey, Disease, FeatureFlag};
pub use settings::Settings;
pub use slots::{DoseSequence, LocationId, SlotRequest, SlotRoute};
