//! Pluggable classifier bundles.
//!
//! The aggregator only ever sees a [`ClassifierSet`]: four capability objects
//! that turn a [`PatientRecord`] into column names, plus the
//! [`ColumnLayout`] those names belong to. Each report kind is one
//! combination of the implementations below.

use std::fmt;

use rekap_model::taxonomy::{
    EIGHT_AGE_BANDS, EIGHT_DEATHS, EIGHT_FEMALE, EIGHT_MALE, GRID_AGE_BANDS, GRID_CASES_FEMALE,
    GRID_CASES_MALE, GRID_DEATHS_FEMALE, GRID_DEATHS_MALE,
};
use rekap_model::{ColumnLayout, Gender, PatientRecord, ReportKind};

use crate::age::{eight_band, grid_age_band};
use crate::category::{classify_affiliation, classify_payer};
use crate::outcome::is_death;

/// Maps a record to its age column.
pub trait AgeClassifier: Send + Sync {
    fn age_column(&self, record: &PatientRecord) -> Option<&str>;

    /// Whether the age itself falls in a band, whatever else the column
    /// depends on.
    fn in_range(&self, record: &PatientRecord) -> bool {
        self.age_column(record).is_some()
    }
}

/// Maps a record to its gender column.
pub trait GenderClassifier: Send + Sync {
    fn gender_column(&self, record: &PatientRecord) -> Option<&str>;
}

/// Maps a record to up to two category columns.
pub trait CategoryClassifier: Send + Sync {
    fn category_columns(&self, record: &PatientRecord) -> CategoryHits<'_>;

    /// False for reports without a category family, so that missing
    /// categories are not reported as unclassified.
    fn is_active(&self) -> bool {
        true
    }
}

/// Maps a record to its outcome column, if the outcome is counted at all.
pub trait OutcomeClassifier: Send + Sync {
    fn outcome_column(&self, record: &PatientRecord) -> Option<&str>;
}

/// Category columns hit by one record: the affiliation lookup first, then
/// the payer lookup. The two never name the same column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryHits<'a> {
    pub primary: Option<&'a str>,
    pub secondary: Option<&'a str>,
}

impl<'a> CategoryHits<'a> {
    pub fn new(primary: Option<&'a str>, secondary: Option<&'a str>) -> Self {
        let secondary = secondary.filter(|s| Some(*s) != primary);
        Self { primary, secondary }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.primary.into_iter().chain(self.secondary)
    }
}

/// Grid age: `{band}_{L|P}`, so an unknown gender leaves the age unplaced.
#[derive(Debug, Clone)]
pub struct GridAge {
    columns: Vec<[String; 2]>,
}

impl GridAge {
    pub fn new() -> Self {
        let columns = GRID_AGE_BANDS
            .iter()
            .map(|band| [format!("{band}_L"), format!("{band}_P")])
            .collect();
        Self { columns }
    }
}

impl Default for GridAge {
    fn default() -> Self {
        Self::new()
    }
}

impl AgeClassifier for GridAge {
    fn age_column(&self, record: &PatientRecord) -> Option<&str> {
        let band = grid_age_band(&record.age)?;
        let pair = &self.columns[band.index()];
        match record.gender {
            Gender::Male => Some(pair[0].as_str()),
            Gender::Female => Some(pair[1].as_str()),
            Gender::Unknown => None,
        }
    }

    fn in_range(&self, record: &PatientRecord) -> bool {
        grid_age_band(&record.age).is_some()
    }
}

/// Eight-band age, independent of gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct EightBandAge;

impl AgeClassifier for EightBandAge {
    fn age_column(&self, record: &PatientRecord) -> Option<&str> {
        eight_band(&record.age).map(|band| EIGHT_AGE_BANDS[band.index()])
    }
}

/// Male/female column pair.
#[derive(Debug, Clone)]
pub struct GenderColumns {
    male: String,
    female: String,
}

impl GenderColumns {
    pub fn new(male: impl Into<String>, female: impl Into<String>) -> Self {
        Self {
            male: male.into(),
            female: female.into(),
        }
    }
}

impl GenderClassifier for GenderColumns {
    fn gender_column(&self, record: &PatientRecord) -> Option<&str> {
        match record.gender {
            Gender::Male => Some(self.male.as_str()),
            Gender::Female => Some(self.female.as_str()),
            Gender::Unknown => None,
        }
    }
}

/// Affiliation lookup plus the secondary payer-keyword lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffiliationCategories;

impl CategoryClassifier for AffiliationCategories {
    fn category_columns(&self, record: &PatientRecord) -> CategoryHits<'_> {
        let primary = classify_affiliation(&record.affiliation, &record.sub_affiliation);
        let secondary = classify_payer(&record.payer_type);
        CategoryHits::new(primary.map(|c| c.column()), secondary.map(|c| c.column()))
    }
}

/// For reports without category columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCategory;

impl CategoryClassifier for NoCategory {
    fn category_columns(&self, _record: &PatientRecord) -> CategoryHits<'_> {
        CategoryHits::default()
    }

    fn is_active(&self) -> bool {
        false
    }
}

/// Deaths split by gender; deaths of unknown gender are not placed.
#[derive(Debug, Clone)]
pub struct GenderedDeaths {
    male: String,
    female: String,
}

impl GenderedDeaths {
    pub fn new(male: impl Into<String>, female: impl Into<String>) -> Self {
        Self {
            male: male.into(),
            female: female.into(),
        }
    }
}

impl OutcomeClassifier for GenderedDeaths {
    fn outcome_column(&self, record: &PatientRecord) -> Option<&str> {
        if !is_death(&record.outcome) {
            return None;
        }
        match record.gender {
            Gender::Male => Some(self.male.as_str()),
            Gender::Female => Some(self.female.as_str()),
            Gender::Unknown => None,
        }
    }
}

/// All deaths in one column.
#[derive(Debug, Clone)]
pub struct Deaths {
    column: String,
}

impl Deaths {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl OutcomeClassifier for Deaths {
    fn outcome_column(&self, record: &PatientRecord) -> Option<&str> {
        is_death(&record.outcome).then_some(self.column.as_str())
    }
}

/// Columns one record contributes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification<'a> {
    pub age: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub categories: CategoryHits<'a>,
    pub outcome: Option<&'a str>,
}

impl<'a> Classification<'a> {
    /// Every column to increment, in family order.
    pub fn columns(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.age
            .into_iter()
            .chain(self.gender)
            .chain(self.categories.iter())
            .chain(self.outcome)
    }
}

/// The four classifiers of one report kind and the layout they fill.
pub struct ClassifierSet {
    layout: ColumnLayout,
    age: Box<dyn AgeClassifier>,
    gender: Box<dyn GenderClassifier>,
    category: Box<dyn CategoryClassifier>,
    outcome: Box<dyn OutcomeClassifier>,
}

impl ClassifierSet {
    pub fn new(
        layout: ColumnLayout,
        age: Box<dyn AgeClassifier>,
        gender: Box<dyn GenderClassifier>,
        category: Box<dyn CategoryClassifier>,
        outcome: Box<dyn OutcomeClassifier>,
    ) -> Self {
        Self {
            layout,
            age,
            gender,
            category,
            outcome,
        }
    }

    pub fn for_kind(kind: ReportKind) -> Self {
        let layout = ColumnLayout::for_kind(kind);
        match kind {
            ReportKind::Sirs => Self::new(
                layout,
                Box::new(GridAge::new()),
                Box::new(GenderColumns::new(GRID_CASES_MALE, GRID_CASES_FEMALE)),
                Box::new(NoCategory),
                Box::new(GenderedDeaths::new(GRID_DEATHS_MALE, GRID_DEATHS_FEMALE)),
            ),
            ReportKind::Puskesad => Self::new(
                layout,
                Box::new(EightBandAge),
                Box::new(GenderColumns::new(EIGHT_MALE, EIGHT_FEMALE)),
                Box::new(AffiliationCategories),
                Box::new(Deaths::new(EIGHT_DEATHS)),
            ),
        }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn tracks_categories(&self) -> bool {
        self.category.is_active()
    }

    /// False when the record's age fits no band of this report.
    pub fn age_in_range(&self, record: &PatientRecord) -> bool {
        self.age.in_range(record)
    }

    pub fn classify(&self, record: &PatientRecord) -> Classification<'_> {
        Classification {
            age: self.age.age_column(record),
            gender: self.gender.gender_column(record),
            categories: self.category.category_columns(record),
            outcome: self.outcome.outcome_column(record),
        }
    }
}

impl fmt::Debug for ClassifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierSet")
            .field("columns", &self.layout.len())
            .field("tracks_categories", &self.tracks_categories())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rekap_model::Age;
    use rekap_model::taxonomy::grid_column;

    use super::*;

    fn record(gender: Gender, years: u32) -> PatientRecord {
        PatientRecord::new("A00.0", gender, Age::years(years))
    }

    #[test]
    fn grid_age_needs_gender() {
        let age = GridAge::new();
        assert_eq!(age.age_column(&record(Gender::Female, 30)), Some("25-44 TH_P"));
        assert_eq!(age.age_column(&record(Gender::Male, 0)), Some("0 HR_L"));
        assert_eq!(age.age_column(&record(Gender::Unknown, 30)), None);
        assert!(age.in_range(&record(Gender::Unknown, 30)));
        assert!(!age.in_range(&record(Gender::Male, 200)));
    }

    #[test]
    fn grid_columns_match_taxonomy_helper() {
        let age = GridAge::new();
        let rec = record(Gender::Male, 90);
        assert_eq!(
            age.age_column(&rec).map(String::from),
            grid_column(">=85 TH", Gender::Male)
        );
    }

    #[test]
    fn secondary_category_is_not_repeated() {
        let hits = CategoryHits::new(Some("UMUM"), Some("UMUM"));
        assert_eq!(hits.iter().collect::<Vec<_>>(), vec!["UMUM"]);

        let rec = record(Gender::Male, 40)
            .with_affiliation("AD")
            .with_payer_type("BPJS");
        let hits = AffiliationCategories.category_columns(&rec);
        assert_eq!(hits.iter().collect::<Vec<_>>(), vec!["MIL AD", "PURN/BPJS"]);
    }

    #[test]
    fn eight_band_classification() {
        let set = ClassifierSet::for_kind(ReportKind::Puskesad);
        let rec = record(Gender::Female, 25)
            .with_affiliation("KEL AD")
            .with_outcome("Meninggal");
        let columns: Vec<&str> = set.classify(&rec).columns().collect();
        assert_eq!(columns, vec!["15-25 TH", "P", "KEL AD", "MATI"]);
        assert!(set.tracks_categories());
    }

    #[test]
    fn grid_classification() {
        let set = ClassifierSet::for_kind(ReportKind::Sirs);
        let rec = record(Gender::Male, 70).with_outcome("MATI").with_affiliation("AD");
        let columns: Vec<&str> = set.classify(&rec).columns().collect();
        assert_eq!(columns, vec!["70-79 TH_L", "KASUS_L", "MATI_L"]);
        assert!(!set.tracks_categories());
    }

    #[test]
    fn every_classified_column_is_in_the_layout() {
        for kind in ReportKind::ALL {
            let set = ClassifierSet::for_kind(kind);
            for gender in [Gender::Male, Gender::Female] {
                for years in [0, 3, 12, 20, 25, 50, 63, 66, 90] {
                    let rec = record(gender, years)
                        .with_affiliation("PNS AL")
                        .with_payer_type("umum")
                        .with_outcome("died");
                    for column in set.classify(&rec).columns() {
                        assert!(set.layout().contains(column), "{kind}: {column}");
                    }
                }
            }
        }
    }
}
