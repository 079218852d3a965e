//! Scheduling collaborators
//!
//! Disease availability and the live next-free-slot computation.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::backend::SourceError;
use crate::models::{Disease, SlotRequest};

/// Per-disease attributes.
#[async_trait]
pub trait DiseaseDirectory: Send + Sync {
    /// True when no location currently offers a free slot for `disease`.
    async fn no_free_slots(&self, disease: Disease) -> Result<bool, SourceError>;
}

/// Live computation of the next open appointment slot.
#[async_trait]
pub trait SlotFinder: Send + Sync {
    /// Earliest free slot matching `request`, `None` if there is none.
    async fn next_free_slot(
        &self,
        request: &SlotRequest,
    ) -> Result<Option<NaiveDateTime>, SourceError>;
}
