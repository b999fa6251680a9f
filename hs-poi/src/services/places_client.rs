//! Google Places nearby search client

use super::geocoding_client::{Geometry, STATUS_OK};
use super::maps_http::MapsHttp;
use super::poi_ranker::rank_by_distance;
use super::{MapsError, PlaceSearch};
use crate::models::{Place, Rating};
use async_trait::async_trait;
use hs_common::Coordinate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const NEARBY_SEARCH_PATH: &str = "/place/nearbysearch/json";

/// Provider status for a search with no matches
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    #[serde(default)]
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceCandidate>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Places API nearby search client
pub struct PlacesClient {
    http: Arc<MapsHttp>,
}

impl PlacesClient {
    pub fn new(http: Arc<MapsHttp>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn try_search(
        &self,
        origin: &Coordinate,
        category: &str,
        radius_m: u32,
    ) -> Result<Vec<Place>, MapsError> {
        let params = [
            ("location", origin.to_string()),
            ("radius", radius_m.to_string()),
            ("type", category.to_string()),
        ];
        let response: NearbySearchResponse =
            self.http.get_json(NEARBY_SEARCH_PATH, &params).await?;

        let places = places_from_response(response, origin)?;
        debug!(
            category = %category,
            origin = %origin,
            radius_m = radius_m,
            count = places.len(),
            "Nearby search complete"
        );
        Ok(places)
    }
}

/// Convert a provider response into places sorted nearest first
///
/// `ZERO_RESULTS` is an empty success. Ties keep provider order.
fn places_from_response(
    response: NearbySearchResponse,
    origin: &Coordinate,
) -> Result<Vec<Place>, MapsError> {
    match response.status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Ok(Vec::new()),
        _ => {
            return Err(MapsError::Provider {
                message: response
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
                status: response.status,
            })
        }
    }

    let mut places: Vec<Place> = response
        .results
        .into_iter()
        .map(|c| {
            let location = Coordinate::new(c.geometry.location.lat, c.geometry.location.lng);
            Place::new(c.name, c.vicinity, Rating::from(c.rating), location, origin)
        })
        .collect();

    rank_by_distance(&mut places);
    Ok(places)
}
