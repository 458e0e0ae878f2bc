//! Sort worker thread and its message protocol.
//!
//! The worker owns nothing but its inbox. Each job carries the request and a
//! reply channel; jobs are handled one at a time in arrival order, so replies
//! leave in submission order.

use std::io;
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

use super::SortKey;
use super::sort_rows;
use crate::config::WorkerConfig;
use crate::model::RowId;
use crate::model::SortEntry;

/// One body row in a sort request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRow {
    /// Row id.
    pub row: RowId,
    /// Keys in precedence order.
    pub keys: Vec<SortKey>,
}

/// Work posted to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRequest {
    /// Sort keys in precedence order.
    pub spec: Vec<SortEntry>,
    /// Body rows in their current order.
    pub rows: Vec<SortRow>,
}

/// The worker's answer: row ids in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortResponse {
    pub order: Vec<RowId>,
}

pub(crate) struct Job {
    pub request: Arc<SortRequest>,
    pub reply: oneshot::Sender<SortResponse>,
}

/// Sending half of a running worker.
#[derive(Debug, Clone)]
pub(crate) struct WorkerHandle {
    inbox: mpsc::UnboundedSender<Job>,
}

impl WorkerHandle {
    /// Spawns the worker thread.
    pub fn spawn(config: &WorkerConfig) -> io::Result<Self> {
        let (inbox, mut jobs) = mpsc::unbounded_channel::<Job>();

        thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                log::debug!("Sort worker started");
                while let Some(job) = jobs.blocking_recv() {
                    let response = sort_rows(&job.request);
                    // The caller may have stopped waiting.
                    let _ = job.reply.send(response);
                }
                log::debug!("Sort worker stopped");
            })?;

        Ok(Self { inbox })
    }

    /// Posts a job. Gives the job back if the worker is gone.
    pub fn post(&self, job: Job) -> Result<(), Job> {
        self.inbox.send(job).map_err(|e| e.0)
    }
}
