use serde::{Deserialize, Serialize};

use super::UnknownCode;

/// Whether a summary describes properties for sale or for rent.
/// Encoded on the wire as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PropertyAction {
    Buy = 1,
    Rent = 2,
}

impl PropertyAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyAction::Buy => "Buy",
            PropertyAction::Rent => "Rent",
        }
    }
}

impl TryFrom<u8> for PropertyAction {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PropertyAction::Buy),
            2 => Ok(PropertyAction::Rent),
            _ => Err(UnknownCode { kind: "property action", code }),
        }
    }
}

impl From<PropertyAction> for u8 {
    fn from(action: PropertyAction) -> Self {
        action as u8
    }
}

/// Five-number summary plus sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Stats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl Stats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PropertyStats {
    pub price: Stats,
    /// Days since listing
    pub days: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export, rename_all = "camelCase"))]
pub struct PropertySummary {
    pub postcode: String,
    /// (longitude, latitude)
    pub coordinates: (f64, f64),
    #[cfg_attr(feature = "ts", ts(as = "u8"))]
    pub action: PropertyAction,
    pub num_beds: u32,
    pub stats: PropertyStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(median: f64, count: usize) -> Stats {
        Stats {
            min: median - 10.0,
            q1: median - 5.0,
            median,
            q3: median + 5.0,
            max: median + 10.0,
            count,
        }
    }

    #[test]
    fn test_summary_json_shape() {
        let json = r#"{
            "postcode": "SW1A 1AA",
            "coordinates": [-0.1416, 51.501],
            "action": 2,
            "numBeds": 3,
            "stats": {
                "price": {"min": 1500, "q1": 2000, "median": 2500, "q3": 3000, "max": 4000, "count": 12},
                "days": {"min": 0, "q1": 3, "median": 7, "q3": 14, "max": 60, "count": 12}
            }
        }"#;

        let summary: PropertySummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.postcode, "SW1A 1AA");
        assert_eq!(summary.coordinates, (-0.1416, 51.501));
        assert_eq!(summary.action, PropertyAction::Rent);
        assert_eq!(summary.num_beds, 3);
        assert_eq!(summary.stats.price.median, 2500.0);
        assert_eq!(summary.stats.days.count, 12);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["action"], 2);
        assert_eq!(value["numBeds"], 3);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = PropertyAction::try_from(7).unwrap_err();
        assert_eq!(err.code, 7);
        assert!(serde_json::from_str::<PropertyAction>("0").is_err());
    }

    #[test]
    fn test_stats_empty() {
        assert!(!stats(100.0, 4).is_empty());
        assert!(stats(0.0, 0).is_empty());
    }
}
