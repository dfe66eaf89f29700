use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::UnknownCode;

/// Inspection outcome, encoded on the wire as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Outstanding = 1,
    Good = 2,
    RequiresImprovement = 3,
    Inadequate = 4,
}

impl Rating {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::Outstanding => "Outstanding",
            Rating::Good => "Good",
            Rating::RequiresImprovement => "Requires improvement",
            Rating::Inadequate => "Inadequate",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Rating::Outstanding),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::RequiresImprovement),
            4 => Ok(Rating::Inadequate),
            _ => Err(UnknownCode { kind: "rating", code }),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating as u8
    }
}

/// Code 0 marks a school that has not been rated yet.
fn rating_or_unrated<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u8>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(code) => Rating::try_from(code)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export, rename_all = "camelCase"))]
pub struct School {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub postcode: Option<String>,
    /// (longitude, latitude)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub coordinates: Option<(f64, f64)>,
    #[serde(
        default,
        deserialize_with = "rating_or_unrated",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "ts", ts(optional, as = "Option<u8>"))]
    pub rating: Option<Rating>,
    /// Unix milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts", ts(optional))]
    pub inspection_date: Option<i64>,
}

impl School {
    pub fn inspected_at(&self) -> Option<DateTime<Utc>> {
        self.inspection_date.and_then(DateTime::from_timestamp_millis)
    }
}
