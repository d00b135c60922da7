use rekap_model::{Age, Gender, PatientRecord, RecordTable};
use serde::{Deserialize, Serialize};

use crate::field::LogicalField;
use crate::resolve::FieldMapping;

/// Per-record problems that were recovered rather than reported as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionIssues {
    /// Age cells that were not numbers and were read as 0.
    pub invalid_numbers: usize,
    /// Records with an empty diagnosis code. They are kept but never match.
    pub missing_codes: usize,
}

impl ExtractionIssues {
    pub fn is_clean(&self) -> bool {
        self.invalid_numbers == 0 && self.missing_codes == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<PatientRecord>,
    pub issues: ExtractionIssues,
}

/// Parses a non-negative count cell.
///
/// Blank cells read as 0. Spreadsheet exports often write integers as
/// `25.0`, so decimals are accepted and truncated. Returns `None` for
/// anything else, negatives included.
pub fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(value) = trimmed.parse::<u32>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc().min(f64::from(u32::MAX)) as u32)
}

impl FieldMapping {
    /// Converts every table row into a [`PatientRecord`].
    pub fn extract(&self, table: &RecordTable) -> Extraction {
        let mut extraction = Extraction {
            records: Vec::with_capacity(table.len()),
            issues: ExtractionIssues::default(),
        };

        for row in 0..table.len() {
            let text = |field: LogicalField| {
                self.index(field)
                    .map_or("", |idx| table.get(row, idx).trim())
            };
            let mut number = |field: LogicalField| -> u32 {
                match parse_count(text(field)) {
                    Some(value) => value,
                    None => {
                        extraction.issues.invalid_numbers += 1;
                        0
                    }
                }
            };
            let age = Age::new(
                number(LogicalField::AgeYears),
                number(LogicalField::AgeMonths),
                number(LogicalField::AgeDays),
            );

            let code = text(LogicalField::DiagnosisCode);
            if code.is_empty() {
                extraction.issues.missing_codes += 1;
            }
            let record = PatientRecord::new(code, Gender::from_token(text(LogicalField::Gender)), age)
                .with_affiliation(text(LogicalField::Affiliation))
                .with_sub_affiliation(text(LogicalField::SubAffiliation))
                .with_payer_type(text(LogicalField::PayerType))
                .with_outcome(text(LogicalField::Outcome));
            extraction.records.push(record);
        }

        if !extraction.issues.is_clean() {
            tracing::warn!(
                invalid_numbers = extraction.issues.invalid_numbers,
                missing_codes = extraction.issues.missing_codes,
                "recovered malformed record values"
            );
        }
        extraction
    }
}
