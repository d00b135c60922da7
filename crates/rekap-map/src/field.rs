use std::fmt;

use serde::{Deserialize, Serialize};

/// A patient attribute the aggregator reads from a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    DiagnosisCode,
    Gender,
    AgeYears,
    AgeMonths,
    AgeDays,
    Affiliation,
    SubAffiliation,
    PayerType,
    Outcome,
}

impl LogicalField {
    pub const ALL: [LogicalField; 9] = [
        Self::DiagnosisCode,
        Self::Gender,
        Self::AgeYears,
        Self::AgeMonths,
        Self::AgeDays,
        Self::Affiliation,
        Self::SubAffiliation,
        Self::PayerType,
        Self::Outcome,
    ];

    /// Fields without which no record can be placed in any row.
    pub fn is_required(self) -> bool {
        matches!(self, Self::DiagnosisCode | Self::Gender | Self::AgeYears)
    }

    /// Key used in alias files.
    pub fn key(self) -> &'static str {
        match self {
            Self::DiagnosisCode => "diagnosis_code",
            Self::Gender => "gender",
            Self::AgeYears => "age_years",
            Self::AgeMonths => "age_months",
            Self::AgeDays => "age_days",
            Self::Affiliation => "affiliation",
            Self::SubAffiliation => "sub_affiliation",
            Self::PayerType => "payer_type",
            Self::Outcome => "outcome",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = normalize_column(key);
        Self::ALL
            .into_iter()
            .find(|field| normalize_column(field.key()) == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DiagnosisCode => "diagnosis code",
            Self::Gender => "gender",
            Self::AgeYears => "age (years)",
            Self::AgeMonths => "age (months)",
            Self::AgeDays => "age (days)",
            Self::Affiliation => "affiliation",
            Self::SubAffiliation => "sub-affiliation",
            Self::PayerType => "payer type",
            Self::Outcome => "outcome",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Comparison form of a column header: lowercase ASCII letters and digits
/// only, so `KODE ICD`, `kode_icd` and `Kode-ICD` compare equal.
pub fn normalize_column(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
