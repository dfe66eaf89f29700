//! Local caching module for cross-session data access.
//!
//! This module provides the `Persistence` trait consumed by the dataset
//! stores, plus two adapters:
//!
//! - `CacheManager`: one JSON file per dataset under the cache directory
//! - `MemoryCache`: an in-process map, for tests and throwaway sessions
//!
//! Snapshots are written inside a `CachedData` envelope that records when
//! they were taken.

pub mod manager;
pub mod memory;

pub use manager::{age_display, CacheManager, CachedData};
pub use memory::MemoryCache;

use anyhow::Result;

use crate::store::DatasetId;

/// Durable key-value storage keyed by dataset.
///
/// Values are opaque serialized snapshots; the adapter never inspects them.
pub trait Persistence: Send + Sync {
    /// Read the snapshot for `id`, or `None` if nothing was ever saved.
    fn load(&self, id: DatasetId) -> Result<Option<String>>;

    /// Replace the snapshot for `id`.
    fn save(&self, id: DatasetId, contents: &str) -> Result<()>;
}
