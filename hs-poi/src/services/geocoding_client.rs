//! Google Geocoding API client
//!
//! Resolves free-text addresses to the first candidate's coordinate.

use super::maps_http::MapsHttp;
use super::{Geocoder, MapsError};
use async_trait::async_trait;
use hs_common::Coordinate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const GEOCODE_PATH: &str = "/geocode/json";

/// Status the provider returns on success
pub(crate) const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    geometry: Geometry,
    #[serde(default)]
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Geocoding API client
pub struct GeocodingClient {
    http: Arc<MapsHttp>,
}

impl GeocodingClient {
    pub fn new(http: Arc<MapsHttp>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError> {
        let response: GeocodeResponse = self
            .http
            .get_json(GEOCODE_PATH, &[("address", address.to_string())])
            .await?;

        let coordinate = first_coordinate(response)?;
        debug!(address = %address, coordinate = %coordinate, "Geocoded address");
        Ok(coordinate)
    }
}

/// First candidate's coordinate, or the provider status as an error
fn first_coordinate(response: GeocodeResponse) -> Result<Coordinate, MapsError> {
    if response.status != STATUS_OK {
        return Err(MapsError::Provider {
            message: response
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
            status: response.status,
        });
    }

    let candidate = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| MapsError::Parse("OK status with no results".to_string()))?;

    if let Some(formatted) = &candidate.formatted_address {
        debug!(formatted_address = %formatted, "Using first geocode candidate");
    }

    let LatLng { lat, lng } = candidate.geometry.location;
    Ok(Coordinate::new(lat, lng))
}
