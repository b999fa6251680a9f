//! Per-record processing state and final outcome
//!
//! # State Progression
//! NEEDS_GEOCODE → HAS_COORDINATE → ENRICHED
//! NEEDS_GEOCODE → GEOCODE_FAILED (terminal)
//!
//! Records that start with valid coordinates enter at HAS_COORDINATE.

use super::place::{CategorySummary, Place};
use super::record::PropertyRecord;
use hs_common::Coordinate;
use serde::Serialize;
use std::fmt;

/// Enrichment state of a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordState {
    /// No coordinate yet, address must be geocoded
    NeedsGeocode,
    /// Coordinate known, category searches pending
    HasCoordinate,
    /// All category searches finished
    Enriched,
    /// Address could not be resolved
    GeocodeFailed,
}

impl RecordState {
    /// Whether `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: RecordState) -> bool {
        matches!(
            (self, next),
            (RecordState::NeedsGeocode, RecordState::HasCoordinate)
                | (RecordState::NeedsGeocode, RecordState::GeocodeFailed)
                | (RecordState::HasCoordinate, RecordState::Enriched)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordState::Enriched | RecordState::GeocodeFailed)
    }
}

/// Why a record was passed through without remote calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The processing cap was reached before this record
    CapReached,
}

/// Why a record could not be enriched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FailureReason {
    /// The geocoder rejected the address or could not be reached
    GeocodeFailed { address: String, message: String },
    /// Latitude/longitude present but not valid numbers
    MalformedRecord(String),
    /// Neither coordinates nor an address
    NoLocation,
}

impl FailureReason {
    /// Text written to the `closest_{cat}_name` column of a failed row
    pub fn marker(&self) -> String {
        match self {
            FailureReason::GeocodeFailed { .. } => "Could not geocode address".to_string(),
            FailureReason::MalformedRecord(detail) => format!("Malformed record: {}", detail),
            FailureReason::NoLocation => "No location data".to_string(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::GeocodeFailed { address, message } => {
                write!(f, "could not geocode '{}': {}", address, message)
            }
            FailureReason::MalformedRecord(detail) => write!(f, "malformed record: {}", detail),
            FailureReason::NoLocation => f.write_str("no coordinates or address"),
        }
    }
}

/// Search result for one category of an enriched record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub summary: CategorySummary,
    /// Nearest places, capped at the configured result count
    pub top_places: Vec<Place>,
}

/// Location and per-category results of an enriched record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedLocation {
    pub origin: Coordinate,
    /// Address text, if the record has one
    pub address: Option<String>,
    /// Coordinate came from the geocoder rather than the record
    pub geocoded: bool,
    /// One entry per configured category, in category order
    pub categories: Vec<CategoryResult>,
}

/// Final per-record outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordOutcome {
    Enriched(EnrichedLocation),
    Skipped(SkipReason),
    Failed(FailureReason),
}

impl RecordOutcome {
    pub fn is_enriched(&self) -> bool {
        matches!(self, RecordOutcome::Enriched(_))
    }
}

/// An input record paired with its outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRecord {
    pub record: PropertyRecord,
    pub outcome: RecordOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(RecordState::NeedsGeocode.can_transition_to(RecordState::HasCoordinate));
        assert!(RecordState::NeedsGeocode.can_transition_to(RecordState::GeocodeFailed));
        assert!(RecordState::HasCoordinate.can_transition_to(RecordState::Enriched));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!RecordState::HasCoordinate.can_transition_to(RecordState::GeocodeFailed));
        assert!(!RecordState::Enriched.can_transition_to(RecordState::HasCoordinate));
        assert!(!RecordState::GeocodeFailed.can_transition_to(RecordState::HasCoordinate));
        assert!(!RecordState::NeedsGeocode.can_transition_to(RecordState::Enriched));
    }

    #[test]
    fn test_terminal_states() {
        assert!(RecordState::Enriched.is_terminal());
        assert!(RecordState::GeocodeFailed.is_terminal());
        assert!(!RecordState::NeedsGeocode.is_terminal());
    }

    #[test]
    fn test_failure_markers() {
        let geocode = FailureReason::GeocodeFailed {
            address: "1 Main St".to_string(),
            message: "ZERO_RESULTS".to_string(),
        };
        assert_eq!(geocode.marker(), "Could not geocode address");
        assert!(geocode.to_string().contains("ZERO_RESULTS"));
        assert_eq!(FailureReason::NoLocation.marker(), "No location data");
    }
}
