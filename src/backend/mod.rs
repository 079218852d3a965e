//! Backend Module
//!
//! Seams to the data-access collaborators the cache loaders call. Nothing in
//! here caches; implementations own their own I/O and timeouts.

mod properties;
mod scheduling;

use thiserror::Error;

pub use properties::{
    read_flag, require_bool, require_string, require_u32, EnvPropertySource, MemoryPropertySource,
    PropertySource,
};
pub use scheduling::{DiseaseDirectory, SlotFinder};

// == Source Error ==
/// Failure of a backing read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backing store could not be reached or the query failed
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// A required property has no value
    #[error("Missing property: {0}")]
    MissingProperty(String),

    /// A property value could not be parsed
    #[error("Invalid value '{value}' for property {name}")]
    InvalidProperty { name: String, value: String },
}
