pub use shared::{
    AddWaypointRequest, AddWaypointResponse, Alert, ApiError, Controls, Coordinate,
    DirectionsRequest, MapOverlay, RouteBounds, RouteCandidate, RouteReport, RouteSegment,
    SegmentFailure, TravelMode, Waypoint, WaypointListResponse,
};
