use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TubeStation {
    /// NaPTAN id
    pub id: String,
    pub name: String,
    pub postcode: String,
    /// (longitude, latitude)
    pub coordinates: (f64, f64),
    /// Lines serving the station
    #[serde(default)]
    pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_from_json() {
        let json = r#"{
            "id": "940GZZLUOXC",
            "name": "Oxford Circus",
            "postcode": "W1B 3AG",
            "coordinates": [-0.1418, 51.5152],
            "lines": ["Bakerloo", "Central", "Victoria"]
        }"#;
        let station: TubeStation = serde_json::from_str(json).unwrap();
        assert_eq!(station.lines.len(), 3);
        assert_eq!(station.lines[1], "Central");
    }

    #[test]
    fn test_station_without_lines() {
        let json = r#"{"id": "x", "name": "X", "postcode": "E1 6AN", "coordinates": [0.0, 51.0]}"#;
        let station: TubeStation = serde_json::from_str(json).unwrap();
        assert!(station.lines.is_empty());
    }
}
