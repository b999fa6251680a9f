//! Places returned by a nearby search and their per-category summary

use hs_common::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text used when a place has no vicinity
pub const NO_ADDRESS: &str = "No address";

/// Text used when a place has no rating
pub const NO_RATING: &str = "No rating";

/// Provider star rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Stars(f64),
    Unrated,
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        value.map(Rating::Stars).unwrap_or(Rating::Unrated)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Stars(stars) => write!(f, "{}", stars),
            Rating::Unrated => f.write_str(NO_RATING),
        }
    }
}

/// One candidate point of interest, distance-annotated against the query origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Short address, [`NO_ADDRESS`] when the provider omits it
    pub vicinity: String,
    pub rating: Rating,
    pub location: Coordinate,
    /// Great-circle distance from the query origin in meters
    pub distance_m: f64,
}

impl Place {
    /// Build a place and compute its distance from `origin`
    pub fn new(
        name: impl Into<String>,
        vicinity: Option<String>,
        rating: Rating,
        location: Coordinate,
        origin: &Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            vicinity: vicinity.unwrap_or_else(|| NO_ADDRESS.to_string()),
            rating,
            location,
            distance_m: origin.distance_to(&location),
        }
    }

    /// Distance rounded to whole meters, as written to output columns
    pub fn distance_display(&self) -> String {
        format!("{:.0}", self.distance_m)
    }
}

/// Aggregate of one (record, category) search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    /// Number of places the search returned
    pub count: usize,
    /// Nearest place, `None` when `count == 0`
    pub closest: Option<Place>,
}

impl CategorySummary {
    /// Summary of a category whose search returned nothing
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            count: 0,
            closest: None,
        }
    }

    /// Flattened output values: count, closest name, closest distance, closest rating
    pub fn columns(&self) -> [String; 4] {
        match &self.closest {
            Some(place) => [
                self.count.to_string(),
                place.name.clone(),
                place.distance_display(),
                place.rating.to_string(),
            ],
            None => [
                self.count.to_string(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::Stars(4.5).to_string(), "4.5");
        assert_eq!(Rating::Stars(4.0).to_string(), "4");
        assert_eq!(Rating::Unrated.to_string(), "No rating");
        assert_eq!(Rating::from(None), Rating::Unrated);
    }

    #[test]
    fn test_place_computes_distance() {
        let origin = Coordinate::new(0.0, 0.0);
        let place = Place::new("Diner", None, Rating::Unrated, Coordinate::new(0.001, 0.0), &origin);

        assert_eq!(place.vicinity, NO_ADDRESS);
        assert!((place.distance_m - 111.19).abs() < 0.1);
        assert_eq!(place.distance_display(), "111");
    }

    #[test]
    fn test_empty_summary_columns_are_blank() {
        let summary = CategorySummary::empty("bank");
        assert_eq!(summary.columns(), ["0".to_string(), String::new(), String::new(), String::new()]);
    }
}
