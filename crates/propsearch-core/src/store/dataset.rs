use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Names one dataset store. The key doubles as the persistence namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetId {
    Property,
    School,
    Transit,
    Metadata,
}

impl DatasetId {
    pub const ALL: [DatasetId; 4] = [
        DatasetId::Property,
        DatasetId::School,
        DatasetId::Transit,
        DatasetId::Metadata,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DatasetId::Property => "property",
            DatasetId::School => "school",
            DatasetId::Transit => "transit",
            DatasetId::Metadata => "metadata",
        }
    }

    /// Resource path on the API server
    pub fn resource_path(&self) -> &'static str {
        match self {
            DatasetId::Property => "/property",
            DatasetId::School => "/schools",
            DatasetId::Transit => "/tube-stations",
            DatasetId::Metadata => "/last-updated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetId::Property => "Property",
            DatasetId::School => "Schools",
            DatasetId::Transit => "Tube stations",
            DatasetId::Metadata => "Last updated",
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DatasetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetId::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dataset: {}", s))
    }
}

/// Fetch lifecycle of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Never fetched
    #[default]
    Empty,
    /// Fetch in flight
    Loading,
    /// Last fetch succeeded
    Ready,
    /// Last fetch rejected; the previous collection is retained
    Failed,
}

impl LoadState {
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadState::Empty => "empty",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        }
    }
}
