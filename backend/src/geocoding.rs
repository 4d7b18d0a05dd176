use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::models::Coordinate;

/// Resolves free text to a single coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Client for a Nominatim-compatible `/search` endpoint.
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let res = self
            .client
            .get(self.search_url())
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!("geocoder answered {status} for {address:?}");
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let hits: Vec<SearchHit> = res.json().await?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;
        let coordinate = parse_hit(&hit)?;
        tracing::debug!("geocoded {address:?} to {coordinate:?}");
        Ok(coordinate)
    }
}

fn parse_hit(hit: &SearchHit) -> Result<Coordinate, GeocodeError> {
    let parse = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|_| GeocodeError::Malformed(raw.to_string()))
    };
    let coordinate = Coordinate::new(parse(&hit.lat)?, parse(&hit.lon)?);
    if !(-90.0..=90.0).contains(&coordinate.lat) || !(-180.0..=180.0).contains(&coordinate.lon) {
        return Err(GeocodeError::Malformed(format!("{},{}", hit.lat, hit.lon)));
    }
    Ok(coordinate)
}
