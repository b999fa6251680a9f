//! Error types for hs-poi
//!
//! Only conditions that stop a whole run live here. Per-call remote failures
//! are `MapsError`s and are absorbed at the (record, category) level by the
//! pipeline.

use crate::services::MapsError;
use thiserror::Error;

/// Fatal enrichment error
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Input has neither coordinate nor address columns
    #[error(
        "Input must contain either 'latitude' and 'longitude' columns or address columns \
         (address, full_street_line, street, city, state, zip_code); found: {0}"
    )]
    MissingSchema(String),

    /// Same column name appears twice in the input header
    #[error("Duplicate column in input header: {0}")]
    DuplicateColumn(String),

    /// Input already carries a column the enrichment would write
    #[error("Input column '{0}' collides with an enrichment column")]
    ColumnConflict(String),

    /// Malformed delimited input or output failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON report serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Single-shot remote call failed (nearby lookup)
    #[error("Maps API error: {0}")]
    Maps(#[from] MapsError),

    /// hs-common error
    #[error("Common error: {0}")]
    Common(#[from] hs_common::Error),
}

/// Result type for enrichment operations
pub type EnrichResult<T> = Result<T, EnrichError>;
