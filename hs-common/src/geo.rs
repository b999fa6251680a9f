//! Great-circle distance between coordinates
//!
//! Distances assume a spherical Earth (Haversine formula). Inputs are plain
//! degrees; NaN or out-of-range values are not guarded by
//! [`haversine_distance`], only by [`Coordinate::parse`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, -90..=90
    pub lat: f64,
    /// Longitude, -180..=180
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a coordinate from the textual latitude/longitude fields of a record
    ///
    /// Both values are trimmed. Non-numeric, non-finite or out-of-range values
    /// are rejected with [`Error::InvalidInput`].
    pub fn parse(lat: &str, lng: &str) -> Result<Self> {
        let lat_value = parse_degrees("latitude", lat, 90.0)?;
        let lng_value = parse_degrees("longitude", lng, 180.0)?;
        Ok(Self::new(lat_value, lng_value))
    }

    /// Distance in meters to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

fn parse_degrees(field: &str, raw: &str, limit: f64) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} '{}' is not a number", field, trimmed)))?;

    if !value.is_finite() || value.abs() > limit {
        return Err(Error::InvalidInput(format!(
            "{} {} is outside [-{}, {}]",
            field, value, limit, limit
        )));
    }

    Ok(value)
}

/// Great-circle distance in meters between two coordinates
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let (delta_phi, delta_lambda) = ((b.lat - a.lat).to_radians(), (b.lng - a.lng).to_radians());

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1.0 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
