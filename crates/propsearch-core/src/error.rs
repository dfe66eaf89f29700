//! Error types for `propsearch-core`.

use thiserror::Error;

use crate::api::ApiError;
use crate::store::DatasetId;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote fetch rejected; the store kept its previous collection.
    #[error("{dataset} fetch failed: {source}")]
    Fetch {
        dataset: DatasetId,
        #[source]
        source: ApiError,
    },

    /// A persisted snapshot could not be decoded. Hydration treats this as
    /// an absent snapshot.
    #[error("{dataset} snapshot could not be decoded: {source}")]
    Serialization {
        dataset: DatasetId,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn dataset(&self) -> DatasetId {
        match self {
            StoreError::Fetch { dataset, .. } | StoreError::Serialization { dataset, .. } => {
                *dataset
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("bootstrap finished with failed datasets: {}", join_ids(.failed))]
    PartialFailure { failed: Vec<DatasetId> },

    #[error("no store registered for dataset {0}")]
    UnknownDataset(DatasetId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_ids(ids: &[DatasetId]) -> String {
    ids.iter().map(|id| id.key()).collect::<Vec<_>>().join(", ")
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
