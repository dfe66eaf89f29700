//! REST API client module for the property search server.
//!
//! This module provides the `ApiClient` for fetching the reference datasets
//! and the `Fetch` trait through which each dataset store pulls its records.
//!
//! Every dataset is served as plain JSON under a fixed resource path; no
//! authentication is required.

pub mod client;
pub mod error;
pub mod source;

pub use client::ApiClient;
pub use error::ApiError;
pub use source::{Endpoint, Fetch, Payload};
