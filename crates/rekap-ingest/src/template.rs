use std::path::Path;

use rekap_codes::Expander;
use rekap_map::{FieldAliases, LogicalField, normalize_column};
use rekap_model::{ColumnLayout, ReportRow};

use crate::error::{IngestError, Result};
use crate::reader::read_raw;

/// Template headers for the code-expression column, tried after the
/// diagnosis-code aliases.
pub const TEMPLATE_CODE_ALIASES: [&str; 3] = ["kode", "golongan sebab penyakit", "kode icd x"];

/// Loads a report template with the default expander.
pub fn read_template(
    path: &Path,
    aliases: &FieldAliases,
    layout: &ColumnLayout,
) -> Result<Vec<ReportRow>> {
    read_template_with(path, aliases, layout, &Expander::default())
}

/// Loads a report template, one [`ReportRow`] per non-blank line.
///
/// The code-expression cell of each line is expanded into canonical codes.
/// Columns named like one of the layout's count columns are dropped because
/// aggregation recomputes them; every other column, the expression column
/// included, is carried through as a preserved value.
pub fn read_template_with(
    path: &Path,
    aliases: &FieldAliases,
    layout: &ColumnLayout,
    expander: &Expander,
) -> Result<Vec<ReportRow>> {
    let raw = read_raw(path)?;
    let code_index =
        find_code_column(&raw.headers, aliases).ok_or_else(|| IngestError::MissingCodeColumn {
            path: path.to_path_buf(),
            available: raw.headers.clone(),
        })?;

    let kept: Vec<usize> = (0..raw.headers.len())
        .filter(|&idx| idx == code_index || !layout.contains(&raw.headers[idx]))
        .collect();
    tracing::debug!(
        path = %path.display(),
        code_column = %raw.headers[code_index],
        dropped = raw.headers.len() - kept.len(),
        "resolved template columns"
    );

    let rows: Vec<ReportRow> = raw
        .rows
        .iter()
        .map(|cells| {
            let expression = cells[code_index].as_str();
            let mut row = ReportRow::new(expression, expander.expand(expression));
            for &idx in &kept {
                row = row.with_preserved(raw.headers[idx].as_str(), cells[idx].as_str());
            }
            row
        })
        .collect();

    let without_codes = rows.iter().filter(|row| row.codes.is_empty()).count();
    if without_codes > 0 {
        tracing::debug!(rows = without_codes, "template rows without a code expression");
    }
    Ok(rows)
}

fn find_code_column(headers: &[String], aliases: &FieldAliases) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_column(h)).collect();
    aliases
        .get(LogicalField::DiagnosisCode)
        .iter()
        .map(String::as_str)
        .chain(TEMPLATE_CODE_ALIASES)
        .map(normalize_column)
        .filter(|alias| !alias.is_empty())
        .find_map(|alias| normalized.iter().position(|header| *header == alias))
}
