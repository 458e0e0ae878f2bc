//! Engine configuration

/// Settings for the background sort worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Run sorts on a worker thread. When `false` every sort runs in-process.
    ///
    /// Default: `true`
    pub enabled: bool,

    /// Name given to the worker thread.
    ///
    /// Default: `"tabula-sort"`
    pub thread_name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thread_name: "tabula-sort".to_string(),
        }
    }
}

/// Configuration shared by the tables of one process.
///
/// # Example
///
/// ```
/// use tabula_lib::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_settings_prefix("app.tables.")
///     .with_worker(false);
/// assert_eq!(config.settings_prefix, "app.tables.");
/// assert!(!config.worker.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Prefix of the settings key a table's sort is persisted under; the
    /// table id is appended.
    ///
    /// Default: `"tabula.sort."`
    pub settings_prefix: String,

    /// Worker settings.
    pub worker: WorkerConfig,

    /// Capacity of each table's event channel.
    ///
    /// Default: 64
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings_prefix: "tabula.sort.".to_string(),
            worker: WorkerConfig::default(),
            event_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the settings key prefix.
    pub fn with_settings_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings_prefix = prefix.into();
        self
    }

    /// Enables or disables the worker thread.
    pub fn with_worker(mut self, enabled: bool) -> Self {
        self.worker.enabled = enabled;
        self
    }

    /// Sets the worker thread name.
    pub fn with_worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker.thread_name = name.into();
        self
    }

    /// Sets the event channel capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}
