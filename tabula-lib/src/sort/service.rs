//! Handle to the sort worker.

use std::future::IntoFuture;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use dashmap::DashMap;
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::oneshot;

use super::SortRequest;
use super::SortResponse;
use super::sort_rows;
use super::worker::Job;
use super::worker::WorkerHandle;
use crate::config::WorkerConfig;

#[derive(Debug)]
struct ServiceInner {
    config: WorkerConfig,
    worker: OnceLock<Option<WorkerHandle>>,
    spawned: AtomicUsize,
}

/// Cloneable handle to one sort worker.
///
/// The worker thread is created on the first [`submit`](Self::submit) and
/// reused for every later request from any table holding a clone. When the
/// thread cannot be created, or the worker is disabled, requests are sorted
/// in-process with the same comparator.
///
/// # Example
///
/// ```ignore
/// let service = SortService::shared();
/// let response = service.submit(request).await;
/// ```
#[derive(Debug, Clone)]
pub struct SortService {
    inner: Arc<ServiceInner>,
}

impl SortService {
    /// Creates a service with its own worker.
    pub fn new(config: WorkerConfig) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                worker: OnceLock::new(),
                spawned: AtomicUsize::new(0),
            }),
        }
    }

    /// Creates a service that always sorts in-process.
    pub fn inline() -> Self {
        Self::new(WorkerConfig {
            enabled: false,
            ..Default::default()
        })
    }

    /// The process-wide service for the default worker settings.
    pub fn shared() -> Self {
        Self::shared_with(&WorkerConfig::default())
    }

    /// The process-wide service for `config`.
    ///
    /// Every call naming the same worker thread gets the same service, so
    /// tables configured alike share one worker.
    pub fn shared_with(config: &WorkerConfig) -> Self {
        static SHARED: OnceLock<DashMap<String, SortService>> = OnceLock::new();
        SHARED
            .get_or_init(DashMap::new)
            .entry(config.thread_name.clone())
            .or_insert_with(|| SortService::new(config.clone()))
            .clone()
    }

    /// Worker settings of this service.
    pub fn config(&self) -> &WorkerConfig {
        &self.inner.config
    }

    /// Returns `true` if both handles use the same worker.
    pub fn shares_worker_with(&self, other: &SortService) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns `true` once a worker thread is running.
    pub fn is_started(&self) -> bool {
        matches!(self.inner.worker.get(), Some(Some(_)))
    }

    /// Number of worker threads this service has created (0 or 1).
    pub fn spawn_count(&self) -> usize {
        self.inner.spawned.load(Ordering::SeqCst)
    }

    fn worker(&self) -> Option<&WorkerHandle> {
        self.inner
            .worker
            .get_or_init(|| {
                if !self.inner.config.enabled {
                    log::debug!("Sort worker disabled, sorting in-process");
                    return None;
                }
                match WorkerHandle::spawn(&self.inner.config) {
                    Ok(handle) => {
                        self.inner.spawned.fetch_add(1, Ordering::SeqCst);
                        Some(handle)
                    }
                    Err(e) => {
                        log::warn!("Failed to start sort worker, sorting in-process: {}", e);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Posts a request.
    ///
    /// Requests are answered in submission order. The returned
    /// [`PendingSort`] resolves to the sorted row order.
    pub fn submit(&self, request: SortRequest) -> PendingSort {
        let Some(worker) = self.worker() else {
            return PendingSort::ready(sort_rows(&request));
        };

        let request = Arc::new(request);
        let (reply, receiver) = oneshot::channel();
        let job = Job {
            request: Arc::clone(&request),
            reply,
        };

        match worker.post(job) {
            Ok(()) => PendingSort {
                state: PendingState::Waiting { request, receiver },
            },
            Err(_) => {
                log::warn!("Sort worker is gone, sorting in-process");
                PendingSort::ready(sort_rows(&request))
            }
        }
    }
}

impl Default for SortService {
    fn default() -> Self {
        Self::shared()
    }
}

enum PendingState {
    Ready(SortResponse),
    Waiting {
        request: Arc<SortRequest>,
        receiver: oneshot::Receiver<SortResponse>,
    },
}

/// A submitted sort that has not been awaited yet.
pub struct PendingSort {
    state: PendingState,
}

impl PendingSort {
    fn ready(response: SortResponse) -> Self {
        Self {
            state: PendingState::Ready(response),
        }
    }

    /// Returns `true` if the result was computed in-process.
    pub fn is_inline(&self) -> bool {
        matches!(self.state, PendingState::Ready(_))
    }

    /// Waits for the sorted order.
    pub async fn wait(self) -> SortResponse {
        match self.state {
            PendingState::Ready(response) => response,
            PendingState::Waiting { request, receiver } => match receiver.await {
                Ok(response) => response,
                Err(_) => {
                    log::warn!("Sort worker dropped a request, sorting in-process");
                    sort_rows(&request)
                }
            },
        }
    }
}

impl IntoFuture for PendingSort {
    type Output = SortResponse;
    type IntoFuture = BoxFuture<'static, SortResponse>;

    fn into_future(self) -> Self::IntoFuture {
        self.wait().boxed()
    }
}
