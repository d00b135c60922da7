//! Fixed report column taxonomies.
//!
//! Header text is consumed verbatim by downstream spreadsheets, so every
//! name here is case- and spacing-sensitive.

use serde::{Deserialize, Serialize};

use crate::patient::Gender;
use crate::report::ReportKind;

/// Age bands of the grid report, youngest first.
pub const GRID_AGE_BANDS: [&str; 16] = [
    "0 HR",
    "1-7 HR",
    "8-28 HR",
    "29 HR-<3 BL",
    "3-<6 BL",
    "6-11 BL",
    "1-4 TH",
    "5-14 TH",
    "15-24 TH",
    "25-44 TH",
    "45-59 TH",
    "60-64 TH",
    "65-69 TH",
    "70-79 TH",
    "80-84 TH",
    ">=85 TH",
];

pub const GRID_CASES_MALE: &str = "KASUS_L";
pub const GRID_CASES_FEMALE: &str = "KASUS_P";
pub const GRID_CASES_TOTAL: &str = "KASUS_JML";
pub const GRID_DEATHS_MALE: &str = "MATI_L";
pub const GRID_DEATHS_FEMALE: &str = "MATI_P";
pub const GRID_DEATHS_TOTAL: &str = "MATI_JML";

/// Age bands of the eight-band report, youngest first.
pub const EIGHT_AGE_BANDS: [&str; 8] = [
    "0-28 HR",
    "28 HR-1 TH",
    "1-4 TH",
    "5-14 TH",
    "15-25 TH",
    "25-44 TH",
    "45-64 TH",
    ">64 TH",
];

pub const EIGHT_MALE: &str = "L";
pub const EIGHT_FEMALE: &str = "P";
pub const EIGHT_TOTAL: &str = "JML";
pub const EIGHT_DEATHS: &str = "MATI";

/// Affiliation/payer category columns in priority order.
pub const CATEGORY_COLUMNS: [&str; 8] = [
    "MIL AD",
    "PNS AD",
    "KEL AD",
    "MIL LAIN",
    "PNS LAIN",
    "KEL LAIN",
    "PURN/BPJS",
    "UMUM",
];

/// Compound grid column name, e.g. `25-44 TH_P`.
pub fn grid_column(band: &str, gender: Gender) -> Option<String> {
    gender.suffix().map(|suffix| format!("{band}_{suffix}"))
}

/// A column computed as the sum of other columns after aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub name: String,
    pub parts: Vec<String>,
}

impl DerivedColumn {
    pub fn new(name: &str, parts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            parts: parts.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// Ordered count columns of one report kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Every count column, derived ones included, in output order.
    pub counts: Vec<String>,
    pub derived: Vec<DerivedColumn>,
}

impl ColumnLayout {
    pub fn for_kind(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Sirs => Self::grid(),
            ReportKind::Puskesad => Self::eight_band(),
        }
    }

    fn grid() -> Self {
        let mut counts = Vec::with_capacity(GRID_AGE_BANDS.len() * 2 + 6);
        for band in GRID_AGE_BANDS {
            for gender in [Gender::Male, Gender::Female] {
                if let Some(name) = grid_column(band, gender) {
                    counts.push(name);
                }
            }
        }
        counts.extend(
            [
                GRID_CASES_MALE,
                GRID_CASES_FEMALE,
                GRID_CASES_TOTAL,
                GRID_DEATHS_MALE,
                GRID_DEATHS_FEMALE,
                GRID_DEATHS_TOTAL,
            ]
            .map(String::from),
        );
        Self {
            counts,
            derived: vec![
                DerivedColumn::new(GRID_CASES_TOTAL, &[GRID_CASES_MALE, GRID_CASES_FEMALE]),
                DerivedColumn::new(GRID_DEATHS_TOTAL, &[GRID_DEATHS_MALE, GRID_DEATHS_FEMALE]),
            ],
        }
    }

    fn eight_band() -> Self {
        let mut counts: Vec<String> = EIGHT_AGE_BANDS.iter().map(|b| (*b).to_string()).collect();
        counts.extend([EIGHT_MALE, EIGHT_FEMALE, EIGHT_TOTAL].map(String::from));
        counts.extend(CATEGORY_COLUMNS.iter().map(|c| (*c).to_string()));
        counts.push(EIGHT_DEATHS.to_string());
        Self {
            counts,
            derived: vec![DerivedColumn::new(EIGHT_TOTAL, &[EIGHT_MALE, EIGHT_FEMALE])],
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.counts.iter().any(|c| c == column)
    }

    pub fn is_derived(&self, column: &str) -> bool {
        self.derived.iter().any(|d| d.name == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_layout_has_every_band_for_both_genders() {
        let layout = ColumnLayout::for_kind(ReportKind::Sirs);
        assert_eq!(layout.len(), 16 * 2 + 6);
        assert_eq!(layout.counts[0], "0 HR_L");
        assert_eq!(layout.counts[1], "0 HR_P");
        assert_eq!(layout.counts[31], ">=85 TH_P");
        assert!(layout.is_derived(GRID_CASES_TOTAL));
        assert!(!layout.is_derived(GRID_CASES_MALE));
    }

    #[test]
    fn eight_band_layout_order() {
        let layout = ColumnLayout::for_kind(ReportKind::Puskesad);
        assert_eq!(layout.len(), 8 + 3 + 8 + 1);
        assert_eq!(layout.counts[8], "L");
        assert_eq!(layout.counts[10], "JML");
        assert_eq!(layout.counts[11], "MIL AD");
        assert_eq!(layout.counts.last().map(String::as_str), Some("MATI"));
    }

    #[test]
    fn grid_column_requires_known_gender() {
        assert_eq!(grid_column("1-4 TH", Gender::Female).as_deref(), Some("1-4 TH_P"));
        assert_eq!(grid_column("1-4 TH", Gender::Unknown), None);
    }
}
