use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A geocoded address the user dropped on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub label: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
    Cycling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    pub mode: TravelMode,
    pub alternates: bool,
}

/// One alternative returned for a single directions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub distance_m: f64,
    #[serde(default)]
    pub duration_s: f64,
    pub geometry: Vec<Coordinate>,
}

/// The drawn route between `waypoints[index]` and `waypoints[index + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub index: usize,
    pub from: Waypoint,
    pub to: Waypoint,
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub route_visible: bool,
    pub reset_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentFailure {
    pub index: usize,
    pub from: String,
    pub to: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteReport {
    /// The pins the segments were built from.
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    pub segments: Vec<RouteSegment>,
    pub failures: Vec<SegmentFailure>,
    pub total_distance_m: f64,
    /// Set when a reset interrupted the run; remaining segments were dropped.
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpx_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWaypointRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWaypointResponse {
    pub waypoint: Waypoint,
    pub count: usize,
    pub controls: Controls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointListResponse {
    pub waypoints: Vec<Waypoint>,
    pub controls: Controls,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RouteBounds>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapOverlay {
    pub markers: Vec<Waypoint>,
    pub polylines: Vec<RouteSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}
