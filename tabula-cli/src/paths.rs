//! Files the command keeps between runs: the settings database and its logs.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "tabula-";

/// Archived logs kept after rotation.
pub const KEEP_LOGS: usize = 10;

/// Data and cache locations of the command.
#[derive(Debug, Clone)]
pub struct CliPaths {
    data: PathBuf,
    cache: PathBuf,
}

impl CliPaths {
    /// Platform locations (XDG on Linux), or `None` without a home directory.
    pub fn discover() -> Option<Self> {
        ProjectDirs::from("dev", "tabula", "tabula").map(|dirs| Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Persisted sorts.
    pub fn settings_db(&self) -> PathBuf {
        self.data.join("settings.db")
    }

    /// Log of the current run.
    pub fn log_file(&self) -> PathBuf {
        self.cache.join(LATEST_LOG)
    }

    /// Archives the previous run's log and prunes all but the newest `keep`
    /// archives.
    pub fn rotate_logs(&self, keep: usize) -> io::Result<()> {
        let latest = self.log_file();
        if latest.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            fs::rename(
                &latest,
                self.cache.join(format!("{ARCHIVE_PREFIX}{stamp}.log")),
            )?;
        }
        prune_archives(&self.cache, keep)
    }
}

/// Archive names embed a sortable timestamp, so name order is age order.
fn prune_archives(dir: &Path, keep: usize) -> io::Result<()> {
    let mut archives: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
            })
            .collect(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(())
}
