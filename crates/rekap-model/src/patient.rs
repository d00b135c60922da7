//! Patient discharge records as seen by the aggregator.

use std::fmt;

use serde::{Deserialize, Serialize};

const MALE_TOKENS: [&str; 5] = ["L", "LAKI-LAKI", "M", "MALE", "LK"];
const FEMALE_TOKENS: [&str; 6] = ["P", "PEREMPUAN", "F", "FEMALE", "PR", "WANITA"];

/// Patient gender normalized from free text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Classifies a free-text gender token (case-insensitive, trimmed).
    ///
    /// Anything outside the two synonym sets is [`Gender::Unknown`].
    pub fn from_token(raw: &str) -> Self {
        let token = raw.trim().to_uppercase();
        if MALE_TOKENS.contains(&token.as_str()) {
            Self::Male
        } else if FEMALE_TOKENS.contains(&token.as_str()) {
            Self::Female
        } else {
            Self::Unknown
        }
    }

    /// Column suffix used by gender-compound report columns.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Male => Some("L"),
            Self::Female => Some("P"),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Age at discharge split into its recorded parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Age {
    pub const fn new(years: u32, months: u32, days: u32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    pub const fn years(years: u32) -> Self {
        Self::new(years, 0, 0)
    }

    /// Elapsed days using 365-day years and 30-day months.
    pub fn total_days(&self) -> u64 {
        u64::from(self.years) * 365 + u64::from(self.months) * 30 + u64::from(self.days)
    }
}

/// One flattened discharge record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub diagnosis_code: String,
    pub gender: Gender,
    pub age: Age,
    /// Organizational affiliation such as `AD`, `PNS AL` or `UMUM`.
    pub affiliation: String,
    pub sub_affiliation: String,
    pub payer_type: String,
    pub outcome: String,
}

impl PatientRecord {
    pub fn new(diagnosis_code: impl Into<String>, gender: Gender, age: Age) -> Self {
        Self {
            diagnosis_code: diagnosis_code.into(),
            gender,
            age,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    #[must_use]
    pub fn with_sub_affiliation(mut self, sub_affiliation: impl Into<String>) -> Self {
        self.sub_affiliation = sub_affiliation.into();
        self
    }

    #[must_use]
    pub fn with_payer_type(mut self, payer_type: impl Into<String>) -> Self {
        self.payer_type = payer_type.into();
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_synonyms() {
        for token in ["l", "Laki-Laki", "M", "male", " LK "] {
            assert_eq!(Gender::from_token(token), Gender::Male, "{token}");
        }
        for token in ["p", "Perempuan", "F", "female", "PR", "wanita"] {
            assert_eq!(Gender::from_token(token), Gender::Female, "{token}");
        }
        for token in ["", "X", "laki", "unknown"] {
            assert_eq!(Gender::from_token(token), Gender::Unknown, "{token}");
        }
    }

    #[test]
    fn gender_suffix() {
        assert_eq!(Gender::Male.suffix(), Some("L"));
        assert_eq!(Gender::Female.suffix(), Some("P"));
        assert_eq!(Gender::Unknown.suffix(), None);
    }

    #[test]
    fn total_days_uses_fixed_month_and_year_lengths() {
        assert_eq!(Age::new(1, 2, 3).total_days(), 365 + 60 + 3);
        assert_eq!(Age::default().total_days(), 0);
    }
}
