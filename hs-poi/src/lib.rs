//! hs-poi library interface
//!
//! Enriches property listings with nearest point-of-interest summaries per
//! category, using a geocoder and a places nearby search.

pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{EnrichError, EnrichResult};
pub use crate::services::{Geocoder, MapsError, PlaceSearch};
pub use crate::workflow::{EnrichmentPipeline, EnrichmentRun};

use crate::services::{GeocodingClient, MapsConfig, MapsHttp, PlacesClient};
use std::sync::Arc;

/// Build a pipeline backed by the Google Maps web services
///
/// Both clients share one HTTP client and rate limiter.
pub fn maps_pipeline(config: &MapsConfig) -> Result<EnrichmentPipeline, MapsError> {
    let http = Arc::new(MapsHttp::new(config)?);
    Ok(EnrichmentPipeline::new(
        Arc::new(GeocodingClient::new(http.clone())),
        Arc::new(PlacesClient::new(http)),
    ))
}
