//! # homescout Common Library
//!
//! Shared code for the homescout tools including:
//! - Error and result types
//! - TOML bootstrap configuration and API key resolution
//! - Geodesic distance on a spherical Earth

pub mod config;
pub mod error;
pub mod geo;

pub use error::{Error, Result};
pub use geo::{haversine_distance, Coordinate};
