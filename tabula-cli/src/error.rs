//! CLI errors

use std::path::PathBuf;

use tabula_lib::SettingsError;
use tabula_lib::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid table definition: {0}")]
    Definition(#[from] serde_json::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Table(#[from] TableError),
}
