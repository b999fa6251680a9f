//! Single-location nearby lookup
//!
//! Searches every requested category around one address or coordinate and
//! merges the results into one nearest-first list.

use crate::error::EnrichResult;
use crate::models::{EnrichParameters, Place};
use crate::services::{Geocoder, PlaceSearch};
use futures::future::join_all;
use hs_common::Coordinate;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Location to search around
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTarget {
    Address(String),
    Coordinate(Coordinate),
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Address(address) => f.write_str(address),
            LookupTarget::Coordinate(coordinate) => write!(f, "{}", coordinate),
        }
    }
}

/// A place tagged with the category that found it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    pub category: String,
    pub place: Place,
}

impl NearbyPlace {
    /// Category label for display, e.g. `shopping_mall` → `Shopping Mall`
    pub fn category_title(&self) -> String {
        self.category
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Lookup result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyResult {
    pub origin: Coordinate,
    /// Nearest first, at most `max_results`
    pub places: Vec<NearbyPlace>,
}

/// Find the nearest places of all `params.categories` around `target`
///
/// Unlike the batch pipeline, a geocoding failure is an error here. Failed
/// category searches contribute no places.
pub async fn find_nearby(
    geocoder: &dyn Geocoder,
    search: &dyn PlaceSearch,
    target: &LookupTarget,
    params: &EnrichParameters,
) -> EnrichResult<NearbyResult> {
    let origin = match target {
        LookupTarget::Coordinate(coordinate) => *coordinate,
        LookupTarget::Address(address) => geocoder.geocode(address).await?,
    };

    let searches = params.categories.iter().map(|category| async move {
        search
            .search(&origin, category, params.radius_m)
            .await
            .into_iter()
            .map(|place| NearbyPlace {
                category: category.clone(),
                place,
            })
            .collect::<Vec<_>>()
    });

    let mut merged: Vec<NearbyPlace> = join_all(searches).await.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.place.distance_m.total_cmp(&b.place.distance_m));
    let found = merged.len();
    merged.truncate(params.max_results);

    info!(
        location = %target,
        origin = %origin,
        found = found,
        shown = merged.len(),
        "Nearby lookup complete"
    );

    Ok(NearbyResult {
        origin,
        places: merged,
    })
}
