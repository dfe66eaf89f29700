//! Record shapes for the reference datasets served by the property search API.
//!
//! This module contains:
//!
//! - `PropertySummary`: aggregate price and listing-age statistics per postcode
//! - `School`: school identity, location and inspection rating
//! - `TubeStation`: transit stations and the lines serving them
//! - `LastUpdated`: the "data last refreshed" timestamps
//!
//! All records serialize to the camelCase JSON the API returns and round-trip
//! without loss, so the same shapes are used for the on-disk cache.

pub mod metadata;
pub mod property;
pub mod school;
pub mod transit;

pub use metadata::LastUpdated;
pub use property::{PropertyAction, PropertyStats, PropertySummary, Stats};
pub use school::{Rating, School};
pub use transit::TubeStation;

/// Error returned when a numeric code does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code: {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}
