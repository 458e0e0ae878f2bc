//! Error types

use crate::model::RowId;

/// Errors raised by the settings storage behind sort persistence.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The SQLite backend failed.
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    /// A stored value could not be decoded.
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    /// Filesystem error while preparing the database location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by a remote row removal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote side refused the removal.
    #[error("removal rejected: {0}")]
    Rejected(String),
    /// The request never reached the remote side or got no answer.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

/// Errors surfaced by [`Table`](crate::Table) operations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table definition is not usable.
    #[error("invalid table definition: {0}")]
    Definition(String),

    /// A column name is not part of the column order.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A row id does not belong to this table.
    #[error("unknown row: {0}")]
    UnknownRow(RowId),

    /// The operation needs live elements but the table was never mounted.
    #[error("table is not mounted")]
    NotMounted,

    /// A previous panic left the table state unusable.
    #[error("table state lock poisoned")]
    Poisoned,

    /// Settings storage failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl TableError {
    /// Creates a definition error.
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition(message.into())
    }
}
