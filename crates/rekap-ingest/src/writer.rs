use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use rekap_model::{ColumnLayout, ReportRow};

use crate::error::{IngestError, Result};

/// Preserved template headers, by position.
///
/// Rows read from one template share the same header list; the longest list
/// wins so hand-built rows with fewer preserved cells still line up.
/// Repeated or blank header names are kept as they are.
fn preserved_header(rows: &[ReportRow]) -> Vec<&str> {
    rows.iter()
        .max_by_key(|row| row.preserved.len())
        .map(|row| row.preserved.iter().map(|(name, _)| name.as_str()).collect())
        .unwrap_or_default()
}

/// Writes rows as CSV: preserved template columns, then the layout's count
/// columns in taxonomy order.
pub fn write_report_to<W: Write>(
    writer: W,
    rows: &[ReportRow],
    layout: &ColumnLayout,
) -> std::result::Result<(), csv::Error> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    let preserved = preserved_header(rows);

    let header = preserved
        .iter()
        .copied()
        .chain(layout.counts.iter().map(String::as_str));
    csv.write_record(header)?;

    for row in rows {
        let mut record: Vec<String> = (0..preserved.len())
            .map(|idx| {
                row.preserved
                    .get(idx)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect();
        record.extend(layout.counts.iter().map(|column| row.count(column).to_string()));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the report to `path`, replacing any existing file.
pub fn write_report(path: &Path, rows: &[ReportRow], layout: &ColumnLayout) -> Result<()> {
    let file = File::create(path).map_err(|source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    write_report_to(file, rows, layout).map_err(|source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote report");
    Ok(())
}
