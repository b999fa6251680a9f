//! Output rows: original fields plus four summary columns per category

use super::outcome::{ProcessedRecord, RecordOutcome};
use super::place::CategorySummary;
use super::record::RecordSchema;
use crate::error::{EnrichError, EnrichResult};

/// Count column value written for every category of a failed record
pub const ERROR_MARKER: &str = "ERROR";

/// Enrichment column names, four per category in category order
pub fn extended_columns(categories: &[String]) -> Vec<String> {
    categories
        .iter()
        .flat_map(|cat| {
            [
                format!("{}_count", cat),
                format!("closest_{}_name", cat),
                format!("closest_{}_distance", cat),
                format!("closest_{}_rating", cat),
            ]
        })
        .collect()
}

/// Output header: input columns then enrichment columns
///
/// Fails with [`EnrichError::ColumnConflict`] if the input already has one of
/// the enrichment columns.
pub fn extended_header(schema: &RecordSchema, categories: &[String]) -> EnrichResult<Vec<String>> {
    let extra = extended_columns(categories);

    if let Some(conflict) = extra
        .iter()
        .find(|c| schema.columns().iter().any(|col| col.trim() == c.as_str()))
    {
        return Err(EnrichError::ColumnConflict(conflict.clone()));
    }

    Ok(schema.columns().iter().cloned().chain(extra).collect())
}

/// One output row, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedRecord {
    values: Vec<String>,
}

impl ExtendedRecord {
    /// Copy the record's fields and append the enrichment columns for its outcome
    ///
    /// - enriched: the category summaries (a category missing from the outcome
    ///   is written as an empty summary)
    /// - skipped: blanks
    /// - failed: `ERROR` count and the failure marker as the closest name
    pub fn build(schema: &RecordSchema, processed: &ProcessedRecord, categories: &[String]) -> Self {
        let mut values = processed.record.values(schema);
        values.reserve(categories.len() * 4);

        match &processed.outcome {
            RecordOutcome::Enriched(location) => {
                for category in categories {
                    let columns = location
                        .categories
                        .iter()
                        .find(|r| &r.summary.category == category)
                        .map(|r| r.summary.columns())
                        .unwrap_or_else(|| CategorySummary::empty(category.as_str()).columns());
                    values.extend(columns);
                }
            }
            RecordOutcome::Skipped(_) => {
                values.extend(std::iter::repeat(String::new()).take(categories.len() * 4));
            }
            RecordOutcome::Failed(reason) => {
                let marker = reason.marker();
                for _ in categories {
                    values.push(ERROR_MARKER.to_string());
                    values.push(marker.clone());
                    values.push(String::new());
                    values.push(String::new());
                }
            }
        }

        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}
