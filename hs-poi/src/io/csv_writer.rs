//! Extended CSV output and the JSON run report

use crate::error::EnrichResult;
use crate::models::{extended_header, ExtendedRecord, ProcessedRecord, RecordSchema};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const OUTPUT_SUFFIX: &str = "_with_pois.csv";

/// `<dir>/<input stem>_with_pois.csv`
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Write one extended row per processed record, in the order given
pub fn write_extended<W: Write>(
    sink: W,
    schema: &RecordSchema,
    rows: &[ProcessedRecord],
    categories: &[String],
) -> EnrichResult<()> {
    let header = extended_header(schema, categories)?;
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(&header)?;
    for processed in rows {
        let row = ExtendedRecord::build(schema, processed, categories);
        writer.write_record(row.values())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the extended CSV to `path`
pub fn write_output(
    path: &Path,
    schema: &RecordSchema,
    rows: &[ProcessedRecord],
    categories: &[String],
) -> EnrichResult<()> {
    let file = File::create(path)?;
    write_extended(BufWriter::new(file), schema, rows, categories)?;
    info!(path = %path.display(), rows = rows.len(), "Wrote enriched output");
    Ok(())
}

/// Write any serializable run report as pretty JSON
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> EnrichResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(())
}
