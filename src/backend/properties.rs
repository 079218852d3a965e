//! Property sources
//!
//! String-valued configuration properties and the typed reads built on them.

use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::SourceError;

// == Property Source ==
/// Reads a named property. `Ok(None)` means the property is not set.
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn read(&self, name: &str) -> Result<Option<String>, SourceError>;
}

// == Typed Reads ==
/// Reads a boolean feature property.
///
/// `"true"` in any case (surrounding whitespace ignored) is true; any other
/// value and an absent property are false.
pub async fn read_flag(source: &dyn PropertySource, name: &str) -> Result<bool, SourceError> {
    Ok(source
        .read(name)
        .await?
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true")))
}

/// Reads a required, non-empty string property.
pub async fn require_string(
    source: &dyn PropertySource,
    name: &str,
) -> Result<String, SourceError> {
    match source.read(name).await? {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(SourceError::MissingProperty(name.to_string())),
    }
}

/// Reads a required unsigned integer property.
pub async fn require_u32(source: &dyn PropertySource, name: &str) -> Result<u32, SourceError> {
    let value = require_string(source, name).await?;
    value.parse().map_err(|_| SourceError::InvalidProperty {
        name: name.to_string(),
        value,
    })
}

/// Reads a required boolean property; only `true`/`false` are accepted.
pub async fn require_bool(source: &dyn PropertySource, name: &str) -> Result<bool, SourceError> {
    let value = require_string(source, name).await?;
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SourceError::InvalidProperty {
            name: name.to_string(),
            value,
        })
    }
}

// == Memory Property Source ==
/// In-memory properties, mutable at runtime.
#[derive(Debug, Default)]
pub struct MemoryPropertySource {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    pub async fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.write().await.insert(name.into(), value.into());
    }

    pub async fn remove(&self, name: &str) {
        self.values.write().await.remove(name);
    }
}

#[async_trait]
impl PropertySource for MemoryPropertySource {
    async fn read(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(self.values.read().await.get(name).cloned())
    }
}

// == Env Property Source ==
/// Properties taken from the process environment.
///
/// `vacme.booking.max.future.days` is looked up as
/// `VACME_BOOKING_MAX_FUTURE_DAYS`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvPropertySource;

impl EnvPropertySource {
    pub fn env_var_name(name: &str) -> String {
        name.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

#[async_trait]
impl PropertySource for EnvPropertySource {
    async fn read(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(env::var(Self::env_var_name(name)).ok())
    }
}
