use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use rekap_model::RecordTable;

use crate::error::{IngestError, Result};

/// Header plus data rows of a CSV file.
pub(crate) struct RawCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows that had more cells than the header.
    pub truncated_rows: usize,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV file; the first non-blank line is the header.
///
/// Blank lines are skipped and every data row is padded or cut to the
/// header width.
pub(crate) fn read_raw(path: &Path) -> Result<RawCsv> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut truncated_rows = 0;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        match headers.as_ref().map(Vec::len) {
            None => headers = Some(row),
            Some(width) => {
                let mut row = row;
                let extra = row.get(width..).unwrap_or_default();
                if extra.iter().any(|cell| !cell.is_empty()) {
                    truncated_rows += 1;
                }
                row.resize(width, String::new());
                rows.push(row);
            }
        }
    }

    let headers = headers.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    if truncated_rows > 0 {
        tracing::warn!(
            path = %path.display(),
            rows = truncated_rows,
            "cells beyond the header width were dropped"
        );
    }
    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv"
    );
    Ok(RawCsv {
        headers,
        rows,
        truncated_rows,
    })
}

/// Reads a discharge-record export into a [`RecordTable`].
pub fn read_record_table(path: &Path) -> Result<RecordTable> {
    let raw = read_raw(path)?;
    let mut table = RecordTable::new(raw.headers);
    for row in raw.rows {
        table.push_row(row);
    }
    Ok(table)
}
