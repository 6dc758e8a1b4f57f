//! Data transfer objects for web requests and responses.
//!
//! The domain types stay serde-free; everything crossing the HTTP boundary
//! is converted here.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::network::Line;
use crate::routing::Path;

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    /// Station name
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResponse {
    /// Station id
    pub id: u64,

    /// Station name
    pub name: String,
}

impl StationResponse {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

/// Request to register a line with its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    /// Line name
    pub name: String,

    /// Display color
    pub color: String,

    /// Up station of the first section
    pub up_station_id: u64,

    /// Down station of the first section
    pub down_station_id: u64,

    /// Distance of the first section
    pub distance: u32,
}

/// Request to rename or recolor a line.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    /// New line name
    pub name: String,

    /// New display color
    pub color: String,
}

/// A line in responses, with its stations in chain order.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line id
    pub id: u64,

    /// Line name
    pub name: String,

    /// Display color
    pub color: String,

    /// Stations from up terminus to down terminus
    pub stations: Vec<StationResponse>,
}

impl LineResponse {
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id().0,
            name: line.name().to_string(),
            color: line.color().to_string(),
            stations: line
                .topology()
                .ordered_stations()
                .map(StationResponse::from_station)
                .collect(),
        }
    }
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionRequest {
    /// Up station of the new section
    pub up_station_id: u64,

    /// Down station of the new section
    pub down_station_id: u64,

    /// Distance of the new section
    pub distance: u32,
}

/// Query parameters for removing a section by station.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSectionParams {
    /// The station to remove from the line
    pub station_id: u64,
}

/// Query parameters for a path lookup.
#[derive(Debug, Deserialize)]
pub struct PathParams {
    /// Source station id
    pub source: u64,

    /// Target station id
    pub target: u64,
}

/// A shortest-path result.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    /// Stations along the route, source first
    pub stations: Vec<StationResponse>,

    /// Total distance of the route
    pub distance: u64,
}

impl PathResponse {
    pub fn from_path(path: &Path) -> Self {
        Self {
            stations: path
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
            distance: path.distance,
        }
    }
}

/// Error payload returned for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    #[test]
    fn line_request_uses_camel_case_fields() {
        let json = r#"{
            "name": "Line 2",
            "color": "bg-green-600",
            "upStationId": 1,
            "downStationId": 2,
            "distance": 10
        }"#;

        let request: CreateLineRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.name, "Line 2");
        assert_eq!(request.up_station_id, 1);
        assert_eq!(request.down_station_id, 2);
        assert_eq!(request.distance, 10);
    }

    #[test]
    fn section_request_uses_camel_case_fields() {
        let json = r#"{"upStationId": 2, "downStationId": 3, "distance": 7}"#;

        let request: AddSectionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.up_station_id, 2);
        assert_eq!(request.down_station_id, 3);
    }

    #[test]
    fn path_response_shape() {
        let path = Path {
            stations: vec![
                Station::new(StationId(1), "Gangnam"),
                Station::new(StationId(2), "Yeoksam"),
            ],
            distance: 10,
        };

        let json = serde_json::to_value(PathResponse::from_path(&path)).unwrap();

        assert_eq!(json["distance"], 10);
        assert_eq!(json["stations"][0]["name"], "Gangnam");
        assert_eq!(json["stations"][1]["id"], 2);
    }
}
