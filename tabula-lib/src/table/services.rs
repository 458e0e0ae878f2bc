//! Collaborators injected into a table.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::error::RemoteError;
use crate::model::RowId;
use crate::persist::SettingsBackend;
use crate::persist::SettingsProvider;
use crate::persist::SortPersistence;
use crate::render::ColumnNames;
use crate::render::Labels;
use crate::sort::SortService;

/// Asks the user to confirm a destructive row action.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Returns `true` if the user agreed.
    async fn confirm(&self, table_id: &str, row: RowId) -> bool;
}

/// Row data sent to the remote side when a row is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    /// Table the row belongs to.
    pub table_id: String,
    /// Row being removed.
    pub row: RowId,
    /// The row's attributes, which carry the remote record identity.
    pub attributes: BTreeMap<String, String>,
}

/// Performs the remote removal of a row.
#[async_trait]
pub trait RowRemover: Send + Sync {
    async fn remove(&self, request: &RemovalRequest) -> Result<(), RemoteError>;
}

/// Non-blocking user notification.
pub trait Notifier: Send + Sync {
    /// Reports a failed remote action.
    fn notify_error(&self, table_id: &str, message: &str);
}

/// Notifier writing to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, table_id: &str, message: &str) {
        log::warn!("Table {}: {}", table_id, message);
    }
}

/// Everything a [`Table`](crate::Table) uses but does not own.
///
/// Cloning is cheap; tables built from clones share the sort worker and the
/// settings storage.
#[derive(Clone)]
pub struct TableServices {
    /// Engine configuration.
    pub config: EngineConfig,
    /// Sort worker handle.
    pub sort: SortService,
    /// Sort persistence, used by tables with `remember_sort`.
    pub persistence: Option<SortPersistence>,
    /// Header labels.
    pub labels: Arc<dyn Labels>,
    /// Confirmation prompt for the delete action. Without one, deletes
    /// proceed unconfirmed.
    pub confirm: Option<Arc<dyn Confirm>>,
    /// Remote removal. Without one, the delete action is ignored.
    pub remover: Option<Arc<dyn RowRemover>>,
    /// Failure notifications.
    pub notifier: Arc<dyn Notifier>,
}

impl Default for TableServices {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TableServices {
    /// Creates services for a configuration.
    ///
    /// The process-wide [`SortService`] for the configured worker is used
    /// unless the worker is disabled, in which case sorts run in-process.
    pub fn new(config: EngineConfig) -> Self {
        let sort = if config.worker.enabled {
            SortService::shared_with(&config.worker)
        } else {
            SortService::inline()
        };
        Self {
            config,
            sort,
            persistence: None,
            labels: Arc::new(ColumnNames),
            confirm: None,
            remover: None,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Uses a dedicated sort service.
    pub fn with_sort_service(mut self, sort: SortService) -> Self {
        self.sort = sort;
        self
    }

    /// Persists sorts in `backend` under the configured key prefix.
    pub fn with_settings(self, backend: impl SettingsBackend + 'static) -> Self {
        let prefix = self.config.settings_prefix.clone();
        self.with_persistence(SortPersistence::new(SettingsProvider::new(backend), prefix))
    }

    /// Uses an existing persistence store.
    pub fn with_persistence(mut self, persistence: SortPersistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Sets the label lookup.
    pub fn with_labels(mut self, labels: impl Labels + 'static) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    /// Sets the confirmation prompt.
    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Some(Arc::new(confirm));
        self
    }

    /// Sets the remote removal.
    pub fn with_remover(mut self, remover: impl RowRemover + 'static) -> Self {
        self.remover = Some(Arc::new(remover));
        self
    }

    /// Sets the notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }
}
