use async_trait::async_trait;
use serde::Deserialize;

use crate::error::DirectionsError;
use crate::models::{Coordinate, DirectionsRequest, RouteCandidate, TravelMode};
use crate::routing::path_length_m;

/// Travel route lookup between two coordinates.
///
/// Implementations return every alternative the service offers, in the
/// service's order. An empty vector is a valid answer and is treated by the
/// route builder the same way as [`DirectionsError::NoRoute`].
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(
        &self,
        req: &DirectionsRequest,
    ) -> Result<Vec<RouteCandidate>, DirectionsError>;
}

/// Client for the OSRM `route` service.
#[derive(Clone, Debug)]
pub struct OsrmDirections {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// When absent the length is taken from the geometry.
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`
    coordinates: Vec<[f64; 2]>,
}

fn profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Walking => "foot",
        TravelMode::Driving => "driving",
        TravelMode::Cycling => "bike",
    }
}

impl OsrmDirections {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn route_url(&self, req: &DirectionsRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            profile(req.mode),
            req.start.lon,
            req.start.lat,
            req.end.lon,
            req.end.lat
        )
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirections {
    #[tracing::instrument(skip(self))]
    async fn directions(
        &self,
        req: &DirectionsRequest,
    ) -> Result<Vec<RouteCandidate>, DirectionsError> {
        let alternatives = if req.alternates { "true" } else { "false" };
        let res = self
            .client
            .get(self.route_url(req))
            .query(&[
                ("alternatives", alternatives),
                ("overview", "full"),
                ("geometries", "geojson"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        // OSRM reports NoRoute with a 400 and a JSON body, so read the body first
        match serde_json::from_slice::<OsrmResponse>(&body) {
            Ok(parsed) => into_candidates(parsed),
            Err(_) if !status.is_success() => Err(DirectionsError::Status(status.as_u16())),
            Err(err) => Err(DirectionsError::Upstream(err.to_string())),
        }
    }
}

fn into_candidates(res: OsrmResponse) -> Result<Vec<RouteCandidate>, DirectionsError> {
    match res.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Err(DirectionsError::NoRoute),
        other => {
            return Err(DirectionsError::Upstream(
                res.message.unwrap_or_else(|| other.to_string()),
            ))
        }
    }

    let candidates = res
        .routes
        .into_iter()
        .map(|route| {
            let geometry: Vec<Coordinate> = route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate { lat, lon })
                .collect();
            let distance_m = route
                .distance
                .unwrap_or_else(|| path_length_m(&geometry));
            RouteCandidate {
                distance_m,
                duration_s: route.duration,
                geometry,
            }
        })
        .collect();
    Ok(candidates)
}
