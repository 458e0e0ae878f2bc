//! Storage seam for persisted sorts.

use async_trait::async_trait;

use crate::error::SettingsError;

/// Byte store keyed by string.
///
/// [`SettingsProvider`](super::SettingsProvider) encodes values on top of it.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Bytes stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Stores `value` under `key`, replacing what was there.
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
