//! Human-readable run report
//!
//! One block per record that reached the remote services or failed; records
//! skipped by the processing cap are omitted.

use super::pipeline::EnrichmentRun;
use crate::models::RecordOutcome;
use std::fmt::Write;

/// Places listed per category before "... and K more"
pub const DEFAULT_SHOWN: usize = 5;

/// Render the report for `run`, listing at most `max_shown` places per category
pub fn render_report(run: &EnrichmentRun, max_shown: usize) -> String {
    let mut out = String::new();

    for processed in &run.rows {
        let record = &processed.record;
        let address = record
            .address()
            .unwrap_or_else(|| "Unknown address".to_string());

        match &processed.outcome {
            RecordOutcome::Skipped(_) => continue,
            RecordOutcome::Failed(reason) => {
                let _ = writeln!(out, "\n===== Property ID: {} =====", record.property_id());
                let _ = writeln!(out, "Address: {}", address);
                let _ = writeln!(out, "ERROR: {}", reason);
            }
            RecordOutcome::Enriched(location) => {
                let _ = writeln!(out, "\n===== Property ID: {} =====", record.property_id());
                let _ = writeln!(out, "Address: {}", address);
                let _ = writeln!(out, "Location: {}", location.origin);

                for result in &location.categories {
                    let summary = &result.summary;
                    let _ = writeln!(
                        out,
                        "\n== Nearby {}: {} found ==",
                        summary.category, summary.count
                    );

                    for (i, place) in result.top_places.iter().take(max_shown).enumerate() {
                        let _ = writeln!(out, "{}. {}", i + 1, place.name);
                        let _ = writeln!(out, "   Address: {}", place.vicinity);
                        let _ = writeln!(out, "   Rating: {}", place.rating);
                        let _ = writeln!(out, "   Distance: {} meters", place.distance_display());
                    }

                    let shown = result.top_places.len().min(max_shown);
                    if summary.count > shown {
                        let _ = writeln!(out, "... and {} more", summary.count - shown);
                    }
                }
            }
        }
    }

    let _ = writeln!(out, "\n{}", run.stats.display_string());
    out
}
