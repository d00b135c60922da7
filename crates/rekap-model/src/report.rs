//! Report rows and report kinds.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::code::CanonicalCode;
use crate::error::ModelError;

/// The two fixed report taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Age × gender grid (16 age bands, each split by gender).
    Sirs,
    /// Eight age bands plus gender, affiliation category and outcome.
    Puskesad,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Sirs, ReportKind::Puskesad];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sirs => "sirs",
            Self::Puskesad => "puskesad",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sirs" => Ok(Self::Sirs),
            "puskesad" => Ok(Self::Puskesad),
            _ => Err(ModelError::UnknownReportKind(s.to_string())),
        }
    }
}

/// One output row of a report, identified by its expanded diagnosis codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The template's original code expression.
    pub expression: String,
    pub codes: Vec<CanonicalCode>,
    /// Non-numeric template columns carried through unchanged, in order.
    pub preserved: Vec<(String, String)>,
    pub counts: BTreeMap<String, u64>,
}

impl ReportRow {
    pub fn new(expression: impl Into<String>, codes: Vec<CanonicalCode>) -> Self {
        Self {
            expression: expression.into(),
            codes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_preserved(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.preserved.push((column.into(), value.into()));
        self
    }

    /// Drops every existing count and sets each of `columns` to zero.
    pub fn reset<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.counts.clear();
        for column in columns {
            self.counts.insert(column.as_ref().to_string(), 0);
        }
    }

    pub fn increment(&mut self, column: &str) {
        match self.counts.get_mut(column) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(column.to_string(), 1);
            }
        }
    }

    pub fn set(&mut self, column: &str, value: u64) {
        self.counts.insert(column.to_string(), value);
    }

    /// Current count; columns never touched read as zero.
    pub fn count(&self, column: &str) -> u64 {
        self.counts.get(column).copied().unwrap_or(0)
    }

    pub fn preserved_value(&self, column: &str) -> Option<&str> {
        self.preserved
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}
