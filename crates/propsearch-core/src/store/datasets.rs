//! The four concrete stores and their named derived views.

use std::collections::HashMap;

use super::views::{index_by, unique_sorted};
use super::DatasetStore;
use crate::models::{LastUpdated, PropertyAction, PropertySummary, School, TubeStation};

pub type PropertyStore = DatasetStore<PropertySummary>;
pub type SchoolStore = DatasetStore<School>;
pub type TransitStore = DatasetStore<TubeStation>;
pub type MetadataStore = DatasetStore<LastUpdated>;

// ===== Property =====

impl DatasetStore<PropertySummary> {
    /// Every postcode with at least one summary, ascending
    pub fn property_postcodes(&self) -> Vec<String> {
        let records = self.get_all();
        unique_sorted(records.as_slice(), |p| std::iter::once(p.postcode.clone()))
    }

    /// Summaries for one postcode, optionally narrowed to buy or rent
    pub fn summaries_for(
        &self,
        postcode: &str,
        action: Option<PropertyAction>,
    ) -> Vec<PropertySummary> {
        self.get_all()
            .iter()
            .filter(|p| p.postcode == postcode)
            .filter(|p| action.map_or(true, |a| p.action == a))
            .cloned()
            .collect()
    }
}

// ===== Schools =====

impl DatasetStore<School> {
    pub fn schools_by_id(&self) -> HashMap<i64, School> {
        let records = self.get_all();
        index_by(records.as_slice(), |s| s.id)
            .into_iter()
            .map(|(id, school)| (id, school.clone()))
            .collect()
    }

    /// Postcodes of schools that have one, ascending
    pub fn school_postcodes(&self) -> Vec<String> {
        let records = self.get_all();
        unique_sorted(records.as_slice(), |s| s.postcode.clone())
    }
}

// ===== Tube stations =====

impl DatasetStore<TubeStation> {
    /// Postcode to station; the last station listed for a postcode wins
    pub fn postcode_to_stations(&self) -> HashMap<String, TubeStation> {
        let records = self.get_all();
        index_by(records.as_slice(), |s| s.postcode.as_str())
            .into_iter()
            .map(|(postcode, station)| (postcode.to_string(), station.clone()))
            .collect()
    }

    /// Every line serving any station, deduplicated and ascending
    pub fn all_lines(&self) -> Vec<String> {
        let records = self.get_all();
        unique_sorted(records.as_slice(), |s| s.lines.iter().cloned())
    }
}

// ===== Last updated =====

impl DatasetStore<LastUpdated> {
    pub fn last_updated(&self) -> Option<LastUpdated> {
        self.get_all().last().cloned()
    }
}
