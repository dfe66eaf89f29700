use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When each upstream dataset was last rebuilt on the server.
/// All timestamps are unix milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LastUpdated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub property: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub schools: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub tube: Option<i64>,
}

impl LastUpdated {
    /// The most recent of the per-dataset timestamps
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        [self.property, self.schools, self.tube]
            .into_iter()
            .flatten()
            .max()
            .and_then(DateTime::from_timestamp_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_picks_max() {
        let updated = LastUpdated {
            property: Some(1_700_000_000_000),
            schools: None,
            tube: Some(1_700_000_500_000),
        };
        assert_eq!(
            updated.latest().map(|d| d.timestamp_millis()),
            Some(1_700_000_500_000)
        );
    }

    #[test]
    fn test_latest_empty() {
        assert_eq!(LastUpdated::default().latest(), None);
        let parsed: LastUpdated = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, LastUpdated::default());
    }
}
