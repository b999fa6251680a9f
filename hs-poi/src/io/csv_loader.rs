//! Delimited input loading
//!
//! The header is read once into a [`RecordSchema`]; every data row must have
//! the same number of fields.

use crate::error::EnrichResult;
use crate::models::{PropertyRecord, RecordSchema};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load all records from a CSV file
pub fn load_records(path: &Path) -> EnrichResult<(RecordSchema, Vec<PropertyRecord>)> {
    let file = File::open(path)?;
    let (schema, records) = read_records(file)?;

    info!(
        path = %path.display(),
        rows = records.len(),
        columns = schema.columns().len(),
        has_coordinates = schema.has_coordinates(),
        has_address = schema.has_address(),
        "Loaded input"
    );
    Ok((schema, records))
}

/// Read records from any CSV source
///
/// Header names and values are kept verbatim so they can be written back
/// unchanged.
pub fn read_records<R: Read>(source: R) -> EnrichResult<(RecordSchema, Vec<PropertyRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let schema = RecordSchema::from_headers(reader.headers()?.iter())?;
    debug!(columns = ?schema.columns(), "Input schema");

    let records = reader
        .records()
        .enumerate()
        .map(|(row_index, row)| -> EnrichResult<PropertyRecord> {
            Ok(PropertyRecord::from_values(row_index, &schema, row?.iter()))
        })
        .collect::<EnrichResult<Vec<_>>>()?;

    Ok((schema, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichError;
    use crate::models::RecordLocation;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_coordinate_rows() {
        let data = "property_id, latitude ,longitude,price\nP1,42.35,-71.05,500000\nP2,,,\n";
        let (schema, records) = read_records(data.as_bytes()).unwrap();

        assert_eq!(schema.columns(), &["property_id", " latitude ", "longitude", "price"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].property_id(), "P1");
        assert_eq!(records[0].field("price"), Some("500000"));
        assert!(matches!(records[0].location(), RecordLocation::Coordinate(_)));
        assert_eq!(records[1].location(), RecordLocation::Missing);
        assert_eq!(records[1].row_index, 1);
    }

    #[test]
    fn test_quoted_address_fields() {
        let data = "street,city,state,zip_code\n\"1 Main St, Rear\",Boston,MA,02108\n";
        let (_, records) = read_records(data.as_bytes()).unwrap();
        assert_eq!(
            records[0].address().as_deref(),
            Some("1 Main St, Rear, Boston, MA, 02108")
        );
    }

    #[test]
    fn test_missing_schema_is_fatal() {
        let err = read_records("id,price\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EnrichError::MissingSchema(_)));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = read_records("latitude,longitude\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EnrichError::Csv(_)));
    }

    #[test]
    fn test_header_only_file() {
        let (schema, records) = read_records("latitude,longitude\n".as_bytes()).unwrap();
        assert!(schema.has_coordinates());
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "property_id,city,state").unwrap();
        writeln!(file, "A,Salem,MA").unwrap();

        let (schema, records) = load_records(file.path()).unwrap();
        assert!(schema.has_address());
        assert_eq!(records[0].address().as_deref(), Some("Salem, MA"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("/nonexistent/listings.csv")).unwrap_err();
        assert!(matches!(err, EnrichError::Io(_)));
    }
}
