//! Enrichment run statistics
//!
//! Display: "N rows: E enriched (G geocoded), F failed, S skipped"

use crate::models::{FailureReason, ProcessedRecord, RecordOutcome};
use serde::{Deserialize, Serialize};

/// Counters for one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichStats {
    /// Input rows
    pub total_rows: usize,
    /// Rows with summary columns
    pub enriched: usize,
    /// Enriched rows whose coordinate came from the geocoder
    pub geocoded: usize,
    pub geocode_failures: usize,
    /// Rows with unusable latitude/longitude values
    pub malformed: usize,
    pub no_location: usize,
    /// Rows passed through after the processing cap
    pub skipped_by_cap: usize,
    /// (record, category) searches that returned no places
    pub empty_categories: usize,
    /// (record, category) searches that failed and were treated as empty
    pub search_failures: usize,
}

impl EnrichStats {
    /// Tally one finished record
    pub fn record(&mut self, processed: &ProcessedRecord) {
        self.total_rows += 1;
        match &processed.outcome {
            RecordOutcome::Enriched(location) => {
                self.enriched += 1;
                if location.geocoded {
                    self.geocoded += 1;
                }
                self.empty_categories += location
                    .categories
                    .iter()
                    .filter(|c| c.summary.count == 0)
                    .count();
            }
            RecordOutcome::Skipped(_) => self.skipped_by_cap += 1,
            RecordOutcome::Failed(FailureReason::GeocodeFailed { .. }) => {
                self.geocode_failures += 1
            }
            RecordOutcome::Failed(FailureReason::MalformedRecord(_)) => self.malformed += 1,
            RecordOutcome::Failed(FailureReason::NoLocation) => self.no_location += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.geocode_failures + self.malformed + self.no_location
    }

    pub fn display_string(&self) -> String {
        format!(
            "{} rows: {} enriched ({} geocoded), {} failed, {} skipped",
            self.total_rows,
            self.enriched,
            self.geocoded,
            self.failed(),
            self.skipped_by_cap
        )
    }
}
