//! Durable per-table sort preference.
//!
//! A [`SettingsBackend`] stores raw bytes, [`SettingsProvider`] adds typed
//! access, and [`SortPersistence`] stores each table's sort as an ordered
//! array of signed tokens (`"+name"`, `"-age"`) under
//! `"{prefix}{table_id}"`.

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SettingsError;
use crate::model::SortSpec;

/// Typed settings access.
///
/// Wraps a [`SettingsBackend`] with typed serialization via bincode.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Creates a provider over a backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Gets a typed value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.read(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Sets a typed value.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.write(key, bytes).await
    }

    /// Deletes a key.
    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}

/// Reads and writes the sort chosen for each table.
#[derive(Clone)]
pub struct SortPersistence {
    settings: SettingsProvider,
    prefix: String,
}

impl SortPersistence {
    /// Creates a store using `prefix` in front of every table id.
    pub fn new(settings: SettingsProvider, prefix: impl Into<String>) -> Self {
        Self {
            settings,
            prefix: prefix.into(),
        }
    }

    /// Creates a store backed by a [`MemoryBackend`].
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::new(SettingsProvider::new(MemoryBackend::new()), prefix)
    }

    fn key(&self, table_id: &str) -> String {
        format!("{}{}", self.prefix, table_id)
    }

    /// Loads the stored specification.
    ///
    /// Returns `None` when nothing is stored. Malformed and repeated tokens
    /// are dropped; callers still need to drop columns the table no longer
    /// has.
    pub async fn load(&self, table_id: &str) -> Result<Option<SortSpec>, SettingsError> {
        let tokens: Option<Vec<String>> = self.settings.get(&self.key(table_id)).await?;
        Ok(tokens.map(SortSpec::from_tokens))
    }

    /// Stores a specification, replacing any previous one.
    pub async fn save(&self, table_id: &str, spec: &SortSpec) -> Result<(), SettingsError> {
        log::debug!("Persisting sort {} for table {}", spec, table_id);
        self.settings.set(&self.key(table_id), &spec.to_tokens()).await
    }

    /// Forgets the stored specification.
    pub async fn clear(&self, table_id: &str) -> Result<(), SettingsError> {
        self.settings.delete(&self.key(table_id)).await
    }
}
