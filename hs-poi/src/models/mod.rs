//! Data models for hs-poi
//!
//! Records flow through the pipeline as:
//! `PropertyRecord` → `RecordOutcome` → `ExtendedRecord`

pub mod category;
pub mod extended_record;
pub mod outcome;
pub mod parameters;
pub mod place;
pub mod record;

pub use category::{
    parse_categories, validate_category, CategoryPreset, ATTRACTION_CATEGORIES,
    DEFAULT_CATEGORIES,
};
pub use extended_record::{extended_columns, extended_header, ExtendedRecord};
pub use outcome::{
    CategoryResult, EnrichedLocation, FailureReason, ProcessedRecord, RecordOutcome, RecordState,
    SkipReason,
};
pub use parameters::EnrichParameters;
pub use place::{CategorySummary, Place, Rating};
pub use record::{PropertyRecord, RecordLocation, RecordSchema, UNKNOWN_PROPERTY_ID};
