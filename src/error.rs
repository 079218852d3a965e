//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::backend::SourceError;

// == Cache Error Enum ==
/// Failures surfaced by the cache adapters.
///
/// `UnsupportedKey` means the cache does not know the key; it never comes
/// from a backing read. `Backend` carries the loader's failure as produced.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key outside the closed key set of a cache
    #[error("Unsupported cache key: {0}")]
    UnsupportedKey(String),

    /// The loader's backing read failed
    #[error("Backend lookup failed: {0}")]
    Backend(#[from] SourceError),

    /// One of the settings reads failed, no snapshot was produced
    #[error("Settings unavailable: {0}")]
    SettingsUnavailable(#[source] SourceError),
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_backend_error_from_source() {
        let err: CacheError = SourceError::Unavailable("db timeout".to_string()).into();
        assert!(matches!(err, CacheError::Backend(SourceError::Unavailable(_))));
        assert_eq!(err.to_string(), "Backend lookup failed: Backend unavailable: db timeout");
    }

    #[test]
    fn test_settings_unavailable_keeps_source() {
        let err = CacheError::SettingsUnavailable(SourceError::MissingProperty(
            "vacme.mandant".to_string(),
        ));
        assert!(err.to_string().starts_with("Settings unavailable"));
        assert!(err.source().is_some());
    }
}
