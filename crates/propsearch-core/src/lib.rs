//! Core library for propsearch.
//!
//! Client-side synchronization of the UK property search reference
//! datasets: property summaries, schools, tube stations and the "last
//! updated" timestamps. Each dataset lives in its own [`DatasetStore`],
//! populated once per session from the API, optionally cached on disk
//! between sessions, and read through derived views computed on demand.
//!
//! [`BootstrapCoordinator`] initializes every store concurrently at startup
//! and reports which, if any, failed.

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError, Endpoint, Fetch};
pub use bootstrap::{BootstrapCoordinator, BootstrapReport, BootstrapState, Initialize};
pub use cache::{CacheManager, CachedData, MemoryCache, Persistence};
pub use config::{Config, PersistSettings};
pub use error::{BootstrapError, StoreError};
pub use store::{DatasetId, DatasetStore, LoadState, Record, Stores};
