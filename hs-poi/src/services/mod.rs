//! Remote Maps API clients and POI aggregation
//!
//! The geocoder and the places search sit behind traits so the pipeline can
//! run against in-memory fakes.

pub mod geocoding_client;
pub mod maps_http;
pub mod places_client;
pub mod poi_ranker;

pub use geocoding_client::GeocodingClient;
pub use maps_http::{MapsConfig, MapsHttp};
pub use places_client::PlacesClient;
pub use poi_ranker::{rank_by_distance, summarize, top_places};

use crate::models::Place;
use async_trait::async_trait;
use hs_common::Coordinate;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Maps API client errors
///
/// Every variant is recoverable at the granularity of a single call.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Connection or protocol failure
    #[error("Network error: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx HTTP status
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    /// Provider answered but reported a non-success status
    #[error("Provider status {status}: {message}")]
    Provider { status: String, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Address → coordinate resolution
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to the first matching coordinate
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError>;
}

/// Nearby search for one category around a coordinate
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Places within `radius_m`, distance-annotated and sorted ascending
    async fn try_search(
        &self,
        origin: &Coordinate,
        category: &str,
        radius_m: u32,
    ) -> Result<Vec<Place>, MapsError>;

    /// Like [`PlaceSearch::try_search`], but a failure is logged and yields no places
    async fn search(&self, origin: &Coordinate, category: &str, radius_m: u32) -> Vec<Place> {
        match self.try_search(origin, category, radius_m).await {
            Ok(places) => places,
            Err(e) => {
                warn!(category = %category, origin = %origin, error = %e, "Nearby search failed");
                Vec::new()
            }
        }
    }
}
