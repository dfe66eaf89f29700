use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{DatasetId, LoadState};
use crate::api::Fetch;
use crate::cache::{CachedData, Persistence};
use crate::error::{Result, StoreError};

/// Anything a dataset store can hold: cloneable, serializable for the
/// cache, and shareable across tasks.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Record for T where T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

struct Snapshot<R> {
    records: Arc<Vec<R>>,
    state: LoadState,
    refreshed_at: Option<DateTime<Utc>>,
    // Bumped by every successful fetch, under the write lock
    generation: u64,
}

/// Owner of one dataset's raw collection.
///
/// The collection starts empty, may be hydrated from persistence, and is
/// replaced wholesale by each successful `init()`. Concurrent `init()` calls
/// are not serialized: whichever resolves last wins, both in memory and in
/// the persisted snapshot.
pub struct DatasetStore<R> {
    id: DatasetId,
    fetcher: Box<dyn Fetch<R>>,
    persistence: Option<Arc<dyn Persistence>>,
    snapshot: RwLock<Snapshot<R>>,
    /// Generation of the newest snapshot handed to persistence
    persisted: Mutex<u64>,
}

impl<R: Record> DatasetStore<R> {
    pub fn new(id: DatasetId, fetcher: impl Fetch<R> + 'static) -> Self {
        Self {
            id,
            fetcher: Box::new(fetcher),
            persistence: None,
            snapshot: RwLock::new(Snapshot {
                records: Arc::new(Vec::new()),
                state: LoadState::Empty,
                refreshed_at: None,
                generation: 0,
            }),
            persisted: Mutex::new(0),
        }
    }

    /// Enable write-through persistence and hydration for this store
    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.persistence.is_some()
    }

    // A poisoned lock still holds a whole snapshot; swaps never panic midway.
    fn read(&self) -> RwLockReadGuard<'_, Snapshot<R>> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot<R>> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current raw collection, whatever the load state
    pub fn get_all(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.read().records)
    }

    pub fn load_state(&self) -> LoadState {
        self.read().state
    }

    /// When the collection in use was fetched (from the envelope if hydrated)
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.read().refreshed_at
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Load the persisted snapshot, if any, into an untouched store.
    ///
    /// Returns `true` if the collection was replaced. Missing, unreadable and
    /// undecodable snapshots all leave the store empty.
    pub fn hydrate(&self) -> bool {
        let Some(persistence) = &self.persistence else {
            return false;
        };

        let contents = match persistence.load(self.id) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                debug!(dataset = %self.id, "No cached snapshot");
                return false;
            }
            Err(e) => {
                warn!(dataset = %self.id, error = %e, "Failed to read cached snapshot");
                return false;
            }
        };

        let cached: CachedData<Vec<R>> = match serde_json::from_str(&contents) {
            Ok(cached) => cached,
            Err(source) => {
                let err = StoreError::Serialization {
                    dataset: self.id,
                    source,
                };
                warn!(error = %err, "Ignoring cached snapshot");
                return false;
            }
        };

        let mut snapshot = self.write();
        if snapshot.state != LoadState::Empty || !snapshot.records.is_empty() {
            debug!(dataset = %self.id, "Store already populated, skipping hydration");
            return false;
        }

        debug!(
            dataset = %self.id,
            count = cached.data.len(),
            age = %cached.age_display(),
            "Hydrated from cache"
        );
        snapshot.records = Arc::new(cached.data);
        snapshot.refreshed_at = Some(cached.cached_at);
        true
    }

    /// Fetch the dataset once and replace the collection.
    ///
    /// On failure the previous collection is kept, the state becomes
    /// `Failed` and the error is returned to the caller. Nothing is retried.
    pub async fn init(&self) -> Result<()> {
        self.write().state = LoadState::Loading;
        debug!(dataset = %self.id, "Fetching dataset");

        match self.fetcher.fetch().await {
            Ok(records) => {
                let records = Arc::new(records);
                let refreshed_at = Utc::now();
                let generation = {
                    let mut snapshot = self.write();
                    snapshot.records = Arc::clone(&records);
                    snapshot.state = LoadState::Ready;
                    snapshot.refreshed_at = Some(refreshed_at);
                    snapshot.generation += 1;
                    snapshot.generation
                };
                info!(dataset = %self.id, count = records.len(), "Dataset ready");

                self.persist(records, refreshed_at, generation).await;
                Ok(())
            }
            Err(source) => {
                self.write().state = LoadState::Failed;
                warn!(dataset = %self.id, error = %source, "Dataset fetch failed");
                Err(StoreError::Fetch {
                    dataset: self.id,
                    source,
                })
            }
        }
    }

    /// Write the snapshot on the blocking pool. Failures are logged only.
    ///
    /// Saves run one at a time per store. A save whose generation is older
    /// than one already handed to persistence is dropped, so the file always
    /// ends up holding the collection that won in memory.
    async fn persist(&self, records: Arc<Vec<R>>, cached_at: DateTime<Utc>, generation: u64) {
        let Some(persistence) = self.persistence.clone() else {
            return;
        };
        let id = self.id;

        let mut persisted = self.persisted.lock().await;
        if generation <= *persisted {
            debug!(dataset = %id, generation, "Skipping superseded snapshot");
            return;
        }
        *persisted = generation;

        let result = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            let cached = CachedData {
                data: records.as_slice(),
                cached_at,
            };
            let contents = serde_json::to_string_pretty(&cached)?;
            persistence.save(id, &contents)
        })
        .await;

        match result {
            Ok(Ok(())) => debug!(dataset = %id, "Snapshot persisted"),
            Ok(Err(e)) => warn!(dataset = %id, error = %e, "Failed to persist snapshot"),
            Err(e) => warn!(dataset = %id, error = %e, "Persistence task failed"),
        }
    }
}
