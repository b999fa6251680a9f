//! Enrichment workflow: batch pipeline, single-location lookup, reporting

pub mod lookup;
pub mod pipeline;
pub mod report;
pub mod statistics;

pub use lookup::{find_nearby, LookupTarget, NearbyPlace, NearbyResult};
pub use pipeline::{EnrichmentPipeline, EnrichmentRun};
pub use report::{render_report, DEFAULT_SHOWN};
pub use statistics::EnrichStats;
