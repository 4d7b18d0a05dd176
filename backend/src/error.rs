use thiserror::Error;

use crate::models::Alert;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("no location found for \"{0}\"")]
    NotFound(String),
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder answered with HTTP {0}")]
    Status(u16),
    #[error("geocoder returned an unreadable coordinate: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("no route found between the two points")]
    NoRoute,
    #[error("directions service error: {0}")]
    Upstream(String),
    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("directions service answered with HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum PinMapError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("at least 2 waypoints are required to build routes, got {0}")]
    NotEnoughWaypoints(usize),
    #[error("waypoints were reset while the request was in flight")]
    Cancelled,
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

impl GeocodeError {
    pub fn to_alert(&self) -> Alert {
        Alert {
            title: "Address not found".into(),
            message: self.to_string(),
        }
    }
}

impl DirectionsError {
    pub fn to_alert(&self) -> Alert {
        Alert {
            title: "No route".into(),
            message: self.to_string(),
        }
    }
}
