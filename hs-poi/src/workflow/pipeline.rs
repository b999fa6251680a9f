//! Enrichment pipeline
//!
//! # State Progression
//! NEEDS_GEOCODE → HAS_COORDINATE → ENRICHED
//! NEEDS_GEOCODE → GEOCODE_FAILED
//!
//! # Architecture
//! The run is planned up front in input order: each record is either sent
//! to the remote services, skipped because the processing cap was reached,
//! or failed locally (malformed coordinates, no location). Planned records
//! then flow through an order-preserving bounded stream; the categories of
//! one record are searched concurrently.

use super::lookup::{find_nearby, LookupTarget, NearbyResult};
use super::statistics::EnrichStats;
use crate::error::EnrichResult;
use crate::io::{load_records, write_output};
use crate::models::{
    extended_header, CategoryResult, CategorySummary, EnrichParameters, EnrichedLocation,
    FailureReason, ProcessedRecord, PropertyRecord, RecordLocation, RecordOutcome, RecordSchema,
    RecordState, SkipReason,
};
use crate::services::{summarize, top_places, Geocoder, PlaceSearch};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use hs_common::Coordinate;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one enrichment run
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentRun {
    pub schema: RecordSchema,
    /// Categories in output column order
    pub categories: Vec<String>,
    /// One entry per input row, in input order
    pub rows: Vec<ProcessedRecord>,
    pub stats: EnrichStats,
}

/// Where a remote-bound record starts
enum Origin {
    Known(Coordinate),
    Geocode(String),
}

/// Up-front decision for one record
enum RecordPlan {
    Remote(Origin),
    Skip(SkipReason),
    Fail(FailureReason),
}

/// Processed record plus its count of failed category searches
struct RecordRun {
    processed: ProcessedRecord,
    search_failures: usize,
}

/// Enrichment pipeline over a geocoder and a nearby search
pub struct EnrichmentPipeline {
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlaceSearch>,
}

impl EnrichmentPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, places: Arc<dyn PlaceSearch>) -> Self {
        Self { geocoder, places }
    }

    /// Load `input`, enrich every record, and write the extended CSV to `output`
    pub async fn enrich_file(
        &self,
        input: &Path,
        output: &Path,
        params: &EnrichParameters,
    ) -> EnrichResult<EnrichmentRun> {
        let (schema, records) = load_records(input)?;
        let run = self.run(schema, records, params).await?;
        write_output(output, &run.schema, &run.rows, &run.categories)?;
        Ok(run)
    }

    /// Nearest places around a single address or coordinate
    pub async fn lookup(
        &self,
        target: &LookupTarget,
        params: &EnrichParameters,
    ) -> EnrichResult<NearbyResult> {
        find_nearby(self.geocoder.as_ref(), self.places.as_ref(), target, params).await
    }

    /// Enrich `records`; the result has one row per record in input order
    ///
    /// Fails only before any remote call, when the output header would
    /// collide with an input column.
    pub async fn run(
        &self,
        schema: RecordSchema,
        records: Vec<PropertyRecord>,
        params: &EnrichParameters,
    ) -> EnrichResult<EnrichmentRun> {
        extended_header(&schema, &params.categories)?;

        let plans = plan_records(&records, params);
        info!(
            records = records.len(),
            categories = params.categories.len(),
            radius_m = params.radius_m,
            concurrency = params.concurrency,
            "Starting enrichment"
        );

        let runs: Vec<RecordRun> = stream::iter(records.into_iter().zip(plans))
            .map(|(record, plan)| self.process_record(record, plan, params))
            .buffered(params.concurrency.max(1))
            .collect()
            .await;

        let mut stats = EnrichStats::default();
        let rows = runs
            .into_iter()
            .map(|run| {
                stats.record(&run.processed);
                stats.search_failures += run.search_failures;
                run.processed
            })
            .collect();

        info!(
            enriched = stats.enriched,
            failed = stats.failed(),
            skipped = stats.skipped_by_cap,
            search_failures = stats.search_failures,
            "Enrichment complete: {}",
            stats.display_string()
        );

        Ok(EnrichmentRun {
            schema,
            categories: params.categories.clone(),
            rows,
            stats,
        })
    }

    async fn process_record(
        &self,
        record: PropertyRecord,
        plan: RecordPlan,
        params: &EnrichParameters,
    ) -> RecordRun {
        let (outcome, search_failures) = match plan {
            RecordPlan::Skip(reason) => (RecordOutcome::Skipped(reason), 0),
            RecordPlan::Fail(reason) => (RecordOutcome::Failed(reason), 0),
            RecordPlan::Remote(origin) => self.enrich_record(&record, origin, params).await,
        };

        RecordRun {
            processed: ProcessedRecord { record, outcome },
            search_failures,
        }
    }

    async fn enrich_record(
        &self,
        record: &PropertyRecord,
        origin: Origin,
        params: &EnrichParameters,
    ) -> (RecordOutcome, usize) {
        let property_id = record.property_id();

        let (coordinate, geocoded) = match origin {
            Origin::Known(coordinate) => (coordinate, false),
            Origin::Geocode(address) => match self.geocoder.geocode(&address).await {
                Ok(coordinate) => {
                    transition(property_id, RecordState::NeedsGeocode, RecordState::HasCoordinate);
                    (coordinate, true)
                }
                Err(e) => {
                    transition(property_id, RecordState::NeedsGeocode, RecordState::GeocodeFailed);
                    warn!(property_id = %property_id, address = %address, error = %e, "Geocoding failed");
                    let reason = FailureReason::GeocodeFailed {
                        address,
                        message: e.to_string(),
                    };
                    return (RecordOutcome::Failed(reason), 0);
                }
            },
        };

        let searches = params.categories.iter().map(|category| async move {
            let result = self
                .places
                .try_search(&coordinate, category, params.radius_m)
                .await;
            (category, result)
        });

        let mut failures = 0;
        let categories = join_all(searches)
            .await
            .into_iter()
            .map(|(category, result)| match result {
                Ok(places) => CategoryResult {
                    summary: summarize(category, &places),
                    top_places: top_places(&places, params.max_results),
                },
                Err(e) => {
                    failures += 1;
                    warn!(
                        property_id = %property_id,
                        category = %category,
                        error = %e,
                        "Nearby search failed, recording no places"
                    );
                    CategoryResult {
                        summary: CategorySummary::empty(category.as_str()),
                        top_places: Vec::new(),
                    }
                }
            })
            .collect();

        transition(property_id, RecordState::HasCoordinate, RecordState::Enriched);

        let location = EnrichedLocation {
            origin: coordinate,
            address: record.address(),
            geocoded,
            categories,
        };
        (RecordOutcome::Enriched(location), failures)
    }
}

/// Decide every record's path before any remote call
///
/// Only remote-bound records count against `max_records`. Once the cap is
/// reached every later record passes through, whatever its location.
fn plan_records(records: &[PropertyRecord], params: &EnrichParameters) -> Vec<RecordPlan> {
    let mut attempted = 0;

    records
        .iter()
        .map(|record| {
            if !params.within_cap(attempted) {
                return RecordPlan::Skip(SkipReason::CapReached);
            }

            let origin = match record.location() {
                RecordLocation::Coordinate(coordinate) => Origin::Known(coordinate),
                RecordLocation::Address(address) => Origin::Geocode(address),
                RecordLocation::Malformed(detail) => {
                    warn!(
                        property_id = %record.property_id(),
                        row = record.row_index,
                        detail = %detail,
                        "Malformed coordinates, skipping remote lookups"
                    );
                    return RecordPlan::Fail(FailureReason::MalformedRecord(detail));
                }
                RecordLocation::Missing => {
                    warn!(
                        property_id = %record.property_id(),
                        row = record.row_index,
                        "No coordinates or address"
                    );
                    return RecordPlan::Fail(FailureReason::NoLocation);
                }
            };

            attempted += 1;

            let initial = match origin {
                Origin::Known(_) => RecordState::HasCoordinate,
                Origin::Geocode(_) => RecordState::NeedsGeocode,
            };
            debug!(
                property_id = %record.property_id(),
                row = record.row_index,
                state = ?initial,
                "Record planned"
            );
            RecordPlan::Remote(origin)
        })
        .collect()
}

fn transition(property_id: &str, from: RecordState, to: RecordState) {
    debug_assert!(!from.is_terminal() && from.can_transition_to(to));
    debug!(property_id = %property_id, from = ?from, to = ?to, "Record state transition");
}
