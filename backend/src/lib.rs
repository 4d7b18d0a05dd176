pub mod cancellation;
pub mod config;
pub mod directions;
pub mod display;
pub mod error;
pub mod geocoding;
pub mod gpx_export;
pub mod models;
pub mod route_builder;
pub mod routing;
pub mod session;
pub mod waypoints;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::config::Config;
use crate::directions::{DirectionsProvider, OsrmDirections};
use crate::display::{AlertLog, MapCanvas};
use crate::error::{ConfigError, GeocodeError, PinMapError};
use crate::geocoding::{Geocoder, NominatimGeocoder};
use crate::gpx_export::encode_route_as_gpx;
use crate::models::{
    AddWaypointRequest, AddWaypointResponse, Alert, ApiError, MapOverlay, RouteReport,
    WaypointListResponse,
};
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
    pub canvas: Arc<MapCanvas>,
    pub alerts: Arc<AlertLog>,
}

impl AppState {
    pub fn new(geocoder: Arc<dyn Geocoder>, directions: Arc<dyn DirectionsProvider>) -> Self {
        let canvas = Arc::new(MapCanvas::new());
        let alerts = Arc::new(AlertLog::new());
        let session = Session::new(geocoder, directions, canvas.clone(), alerts.clone());
        Self {
            session: Arc::new(session),
            canvas,
            alerts,
        }
    }

    /// State backed by the HTTP geocoder and directions clients.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client = config.http_client()?;
        let geocoder = NominatimGeocoder::new(client.clone(), config.geocoder_url.clone());
        let directions = OsrmDirections::new(client, config.directions_url.clone());
        Ok(Self::new(Arc::new(geocoder), Arc::new(directions)))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/waypoints",
            get(list_waypoints)
                .post(add_waypoint)
                .delete(reset_waypoints),
        )
        .route("/api/routes", post(build_routes))
        .route("/api/map", get(map_overlay))
        .route("/api/alerts", get(drain_alerts))
        .with_state(state)
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

async fn list_waypoints(State(state): State<AppState>) -> Json<WaypointListResponse> {
    Json(WaypointListResponse {
        waypoints: state.session.waypoints(),
        controls: state.session.controls(),
        bounds: state.session.bounds(),
    })
}

async fn add_waypoint(
    State(state): State<AppState>,
    Json(req): Json<AddWaypointRequest>,
) -> ApiResult<Json<AddWaypointResponse>> {
    tracing::info!("add waypoint request: {:?}", req.address);
    let waypoint = state
        .session
        .add_address(&req.address)
        .await
        .map_err(api_error)?;

    Ok(Json(AddWaypointResponse {
        waypoint,
        count: state.session.count(),
        controls: state.session.controls(),
    }))
}

async fn reset_waypoints(State(state): State<AppState>) -> StatusCode {
    state.session.reset();
    StatusCode::NO_CONTENT
}

async fn build_routes(State(state): State<AppState>) -> ApiResult<Json<RouteReport>> {
    let mut report = state.session.build_routes().await.map_err(api_error)?;

    if !report.segments.is_empty() {
        report.gpx_base64 =
            Some(encode_route_as_gpx(&report.waypoints, &report.segments).map_err(api_error)?);
    }
    tracing::info!(
        "route report: {} segment(s), {} failure(s), {:.0} m",
        report.segments.len(),
        report.failures.len(),
        report.total_distance_m
    );
    Ok(Json(report))
}

async fn map_overlay(State(state): State<AppState>) -> Json<MapOverlay> {
    Json(state.canvas.snapshot())
}

async fn drain_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.alerts.drain())
}

fn api_error(err: PinMapError) -> (StatusCode, Json<ApiError>) {
    let (status, alert) = match &err {
        // the geocoder itself misbehaved, not the address
        PinMapError::Geocode(
            geocode @ (GeocodeError::Http(_) | GeocodeError::Status(_) | GeocodeError::Malformed(_)),
        ) => (StatusCode::BAD_GATEWAY, Some(geocode.to_alert())),
        PinMapError::Geocode(geocode) => (StatusCode::UNPROCESSABLE_ENTITY, Some(geocode.to_alert())),
        PinMapError::NotEnoughWaypoints(_) => (StatusCode::BAD_REQUEST, None),
        PinMapError::Cancelled => (StatusCode::CONFLICT, None),
        PinMapError::Config(_) | PinMapError::Gpx(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, None)
        }
    };

    (
        status,
        Json(ApiError {
            message: err.to_string(),
            alert,
        }),
    )
}
