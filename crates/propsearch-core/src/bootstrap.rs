//! Startup orchestration of every dataset store.
//!
//! The coordinator fires all `init()` calls at once, waits for every one of
//! them to settle, and publishes the outcome on a `watch` channel that the
//! shell uses to drive its loading indicator. A failed store never blocks
//! completion and is never retried automatically.

use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{BootstrapError, StoreError};
use crate::store::{DatasetId, DatasetStore, LoadState, Record};

/// Object-safe handle on a dataset store, as seen by the coordinator.
pub trait Initialize: Send + Sync {
    fn dataset(&self) -> DatasetId;

    fn initialize(&self) -> BoxFuture<'_, Result<(), StoreError>>;

    fn current_state(&self) -> LoadState;
}

impl<R: Record> Initialize for DatasetStore<R> {
    fn dataset(&self) -> DatasetId {
        self.id()
    }

    fn initialize(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        self.init().boxed()
    }

    fn current_state(&self) -> LoadState {
        self.load_state()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Idle,
    Initializing,
    /// Every store initialized
    Ready,
    /// At least one store failed; the others hold their data
    PartiallyFailed,
}

impl BootstrapState {
    pub fn is_complete(&self) -> bool {
        matches!(self, BootstrapState::Ready | BootstrapState::PartiallyFailed)
    }
}

/// Outcome of one bootstrap run, in registration order.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub succeeded: Vec<DatasetId>,
    pub failed: Vec<(DatasetId, StoreError)>,
}

impl BootstrapReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_datasets(&self) -> Vec<DatasetId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    pub fn into_result(self) -> Result<(), BootstrapError> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(BootstrapError::PartialFailure {
                failed: self.failed_datasets(),
            })
        }
    }
}

pub struct BootstrapCoordinator {
    stores: Vec<Arc<dyn Initialize>>,
    state: watch::Sender<BootstrapState>,
}

impl BootstrapCoordinator {
    pub fn new(stores: Vec<Arc<dyn Initialize>>) -> Self {
        let (state, _) = watch::channel(BootstrapState::Idle);
        Self { stores, state }
    }

    pub fn datasets(&self) -> Vec<DatasetId> {
        self.stores.iter().map(|s| s.dataset()).collect()
    }

    pub fn state(&self) -> BootstrapState {
        *self.state.borrow()
    }

    /// Completion/failure hook: observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.state.subscribe()
    }

    /// Initialize every store concurrently and wait for all of them to settle.
    pub async fn run(&self) -> BootstrapReport {
        self.state.send_replace(BootstrapState::Initializing);
        info!(count = self.stores.len(), "Bootstrap started");

        let results = join_all(self.stores.iter().map(|store| async move {
            (store.dataset(), store.initialize().await)
        }))
        .await;

        let mut report = BootstrapReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => report.succeeded.push(id),
                Err(e) => report.failed.push((id, e)),
            }
        }

        let next = if report.is_complete_success() {
            info!("Bootstrap complete");
            BootstrapState::Ready
        } else {
            let failed = report
                .failed_datasets()
                .iter()
                .map(|id| id.key())
                .collect::<Vec<_>>()
                .join(", ");
            warn!(failed = %failed, "Bootstrap complete with failures");
            BootstrapState::PartiallyFailed
        };
        self.state.send_replace(next);

        report
    }

    /// Re-run one store's init on explicit request from the shell.
    ///
    /// A success that leaves every store `Ready` promotes a partially failed
    /// bootstrap to `Ready`.
    pub async fn reinit(&self, id: DatasetId) -> Result<(), BootstrapError> {
        let store = self
            .stores
            .iter()
            .find(|s| s.dataset() == id)
            .ok_or(BootstrapError::UnknownDataset(id))?;

        store.initialize().await?;

        let all_ready = self
            .stores
            .iter()
            .all(|s| s.current_state() == LoadState::Ready);
        if all_ready && self.state() == BootstrapState::PartiallyFailed {
            info!(dataset = %id, "Recovered; all datasets ready");
            self.state.send_replace(BootstrapState::Ready);
        }
        Ok(())
    }
}
