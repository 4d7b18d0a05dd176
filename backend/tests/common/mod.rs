use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use pinmap::{
    directions::DirectionsProvider,
    error::{DirectionsError, GeocodeError},
    geocoding::Geocoder,
    models::{Coordinate, DirectionsRequest, RouteCandidate},
};
use tokio::sync::Notify;

pub struct FixedGeocoder {
    places: HashMap<String, Coordinate>,
}

impl FixedGeocoder {
    pub fn new(places: &[(&str, f64, f64)]) -> Arc<Self> {
        Arc::new(Self {
            places: places
                .iter()
                .map(|(name, lat, lon)| (name.to_string(), Coordinate::new(*lat, *lon)))
                .collect(),
        })
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        self.places
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))
    }
}

/// Geocoder whose service is broken in the given way.
pub struct FailingGeocoder(pub fn() -> GeocodeError);

#[async_trait]
impl Geocoder for FailingGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Coordinate, GeocodeError> {
        Err((self.0)())
    }
}

/// Holds every lookup until `release` is notified.
#[derive(Default)]
pub struct GatedGeocoder {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl Geocoder for GatedGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Coordinate, GeocodeError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(Coordinate::new(PLACES[0].1, PLACES[0].2))
    }
}

/// Answers with a long and a short alternative, except for blocked starts.
#[derive(Default)]
pub struct TwoAlternatives {
    pub blocked_starts: Vec<Coordinate>,
    pub calls: Mutex<Vec<DirectionsRequest>>,
}

#[async_trait]
impl DirectionsProvider for TwoAlternatives {
    async fn directions(
        &self,
        req: &DirectionsRequest,
    ) -> Result<Vec<RouteCandidate>, DirectionsError> {
        self.calls.lock().unwrap().push(*req);
        if self.blocked_starts.contains(&req.start) {
            return Err(DirectionsError::NoRoute);
        }
        let mid = Coordinate::new(
            (req.start.lat + req.end.lat) / 2.0 + 0.001,
            (req.start.lon + req.end.lon) / 2.0,
        );
        Ok(vec![
            RouteCandidate {
                distance_m: 1500.0,
                duration_s: 1100.0,
                geometry: vec![req.start, mid, req.end],
            },
            RouteCandidate {
                distance_m: 1200.0,
                duration_s: 900.0,
                geometry: vec![req.start, req.end],
            },
        ])
    }
}

pub const PLACES: &[(&str, f64, f64)] = &[
    ("Red Square, Moscow", 55.7539, 37.6208),
    ("Bolshoi Theatre, Moscow", 55.7601, 37.6186),
    ("Gorky Park, Moscow", 55.7298, 37.6011),
];
