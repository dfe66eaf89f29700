//! Dataset stores and the derived views computed over them.
//!
//! Each store owns exactly one raw collection. Readers get an `Arc` snapshot
//! that is swapped atomically when a fetch completes, so no reader ever sees
//! a partially replaced collection. Derived views are rebuilt from a fresh
//! snapshot on every call and are never cached.

pub mod dataset;
pub mod dataset_store;
pub mod datasets;
pub mod registry;
pub mod views;

pub use dataset::{DatasetId, LoadState};
pub use dataset_store::{DatasetStore, Record};
pub use datasets::{MetadataStore, PropertyStore, SchoolStore, TransitStore};
pub use registry::Stores;
