//! Demographic classification for morbidity reports.
//!
//! Pure functions map a patient's age, gender, affiliation and outcome to a
//! report column name. Each report kind plugs its own combination into a
//! [`ClassifierSet`], which the aggregator consumes without knowing which
//! taxonomy it is filling.

#![deny(unsafe_code)]

pub mod age;
pub mod category;
pub mod outcome;
mod set;

pub use age::{EightBand, GridAgeBand, MAX_PLAUSIBLE_YEARS, eight_band, grid_age_band};
pub use category::{Category, classify_affiliation, classify_payer};
pub use outcome::{DEATH_TERMS, is_death};
pub use set::{
    AffiliationCategories, AgeClassifier, CategoryClassifier, CategoryHits, Classification,
    ClassifierSet, Deaths, EightBandAge, GenderClassifier, GenderColumns, GenderedDeaths, GridAge,
    NoCategory, OutcomeClassifier,
};

use rekap_model::Gender;

/// Normalizes a free-text gender token.
pub fn classify_gender(raw: &str) -> Gender {
    Gender::from_token(raw)
}
