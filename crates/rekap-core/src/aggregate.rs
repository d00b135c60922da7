use std::collections::HashSet;

use rekap_classify::ClassifierSet;
use rekap_map::{ExtractionIssues, FieldResolver};
use rekap_model::{ColumnLayout, PatientRecord, RecordTable, ReportKind, ReportRow, code_key};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::error::Result;
use crate::index::RecordIndex;

/// Counters describing one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub rows: usize,
    pub records: usize,
    /// Record contributions summed over rows. A record matching two rows
    /// counts twice.
    pub matched: usize,
    /// Rows that matched no record at all.
    pub unmatched_rows: usize,
    pub unclassified_age: usize,
    pub unclassified_gender: usize,
    pub unclassified_category: usize,
}

/// Outcome of [`Aggregator::aggregate_table`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub stats: AggregationStats,
    pub issues: ExtractionIssues,
}

/// Fills report rows from patient records using one classifier set.
#[derive(Debug)]
pub struct Aggregator {
    kind: Option<ReportKind>,
    classifiers: ClassifierSet,
}

impl Aggregator {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind: Some(kind),
            classifiers: ClassifierSet::for_kind(kind),
        }
    }

    pub fn with_classifiers(classifiers: ClassifierSet) -> Self {
        Self {
            kind: None,
            classifiers,
        }
    }

    pub fn kind(&self) -> Option<ReportKind> {
        self.kind
    }

    pub fn layout(&self) -> &ColumnLayout {
        self.classifiers.layout()
    }

    /// Recomputes every row's counts from `records`.
    ///
    /// Existing counts are discarded first, so running twice over the same
    /// input gives the same rows. A code listed twice in one row is only
    /// looked up once.
    pub fn aggregate(&self, rows: &mut [ReportRow], records: &[PatientRecord]) -> AggregationStats {
        let kind = self.kind.map_or("custom", ReportKind::as_str);
        let span = info_span!("aggregate", kind, rows = rows.len(), records = records.len());
        let _guard = span.enter();

        let index = RecordIndex::build(records);
        let layout = self.classifiers.layout();
        let mut stats = AggregationStats {
            rows: rows.len(),
            records: records.len(),
            ..AggregationStats::default()
        };

        for row in rows.iter_mut() {
            row.reset(&layout.counts);
            let matched = self.fill_row(row, &index, &mut stats);
            if matched == 0 {
                stats.unmatched_rows += 1;
            }
            stats.matched += matched;
            for derived in &layout.derived {
                let total: u64 = derived.parts.iter().map(|part| row.count(part)).sum();
                row.set(&derived.name, total);
            }
        }

        info!(
            matched = stats.matched,
            unmatched_rows = stats.unmatched_rows,
            unclassified_age = stats.unclassified_age,
            unclassified_gender = stats.unclassified_gender,
            unclassified_category = stats.unclassified_category,
            "aggregation complete"
        );
        stats
    }

    fn fill_row(
        &self,
        row: &mut ReportRow,
        index: &RecordIndex<'_>,
        stats: &mut AggregationStats,
    ) -> usize {
        let mut seen = HashSet::new();
        let mut matched = 0;
        let codes: Vec<String> = row.codes.iter().map(|code| code_key(code.as_str())).collect();
        for key in codes {
            if !seen.insert(key.clone()) {
                continue;
            }
            for record in index.lookup(&key) {
                let classification = self.classifiers.classify(record);
                if !self.classifiers.age_in_range(record) {
                    stats.unclassified_age += 1;
                }
                if classification.gender.is_none() {
                    stats.unclassified_gender += 1;
                }
                if self.classifiers.tracks_categories() && classification.categories.is_empty() {
                    stats.unclassified_category += 1;
                }
                for column in classification.columns() {
                    row.increment(column);
                }
                matched += 1;
            }
        }
        matched
    }

    /// Resolves the table's columns, extracts records and aggregates them.
    ///
    /// Field resolution happens before any row is touched, so an
    /// unresolvable table leaves `rows` exactly as they were.
    pub fn aggregate_table(
        &self,
        rows: &mut [ReportRow],
        table: &RecordTable,
        resolver: &FieldResolver,
    ) -> Result<RunReport> {
        let mapping = resolver.resolve(&table.columns)?;
        let extraction = mapping.extract(table);
        let stats = self.aggregate(rows, &extraction.records);
        Ok(RunReport {
            stats,
            issues: extraction.issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use rekap_model::{Age, CanonicalCode, Gender};

    use super::*;

    fn row(codes: &[&str]) -> ReportRow {
        let codes = codes.iter().map(|c| CanonicalCode::literal(c)).collect();
        ReportRow::new("", codes)
    }

    #[test]
    fn duplicate_codes_in_a_row_count_once() {
        let records = vec![PatientRecord::new("A00.0", Gender::Male, Age::years(30))];
        let mut rows = vec![row(&["A00.0", "A00.0", "a00.0"])];
        let stats = Aggregator::new(ReportKind::Puskesad).aggregate(&mut rows, &records);
        assert_eq!(stats.matched, 1);
        assert_eq!(rows[0].count("L"), 1);
        assert_eq!(rows[0].count("JML"), 1);
    }

    #[test]
    fn derived_totals_are_sums() {
        let records = vec![
            PatientRecord::new("A00.0", Gender::Male, Age::years(30)).with_outcome("mati"),
            PatientRecord::new("A00.0", Gender::Female, Age::years(31)),
            PatientRecord::new("A00.0", Gender::Female, Age::years(32)).with_outcome("died"),
        ];
        let mut rows = vec![row(&["A00.0"])];
        Aggregator::new(ReportKind::Sirs).aggregate(&mut rows, &records);
        let counts = &rows[0];
        assert_eq!(counts.count("KASUS_L"), 1);
        assert_eq!(counts.count("KASUS_P"), 2);
        assert_eq!(counts.count("KASUS_JML"), 3);
        assert_eq!(counts.count("MATI_JML"), 2);
        assert_eq!(counts.count("25-44 TH_P"), 2);
    }

    #[test]
    fn category_stats_only_for_category_reports() {
        let records = vec![PatientRecord::new("A00.0", Gender::Male, Age::years(30))];
        let mut rows = vec![row(&["A00.0"])];
        let grid = Aggregator::new(ReportKind::Sirs).aggregate(&mut rows, &records);
        assert_eq!(grid.unclassified_category, 0);
        let eight = Aggregator::new(ReportKind::Puskesad).aggregate(&mut rows, &records);
        assert_eq!(eight.unclassified_category, 1);
    }

    #[test]
    fn unknown_gender_is_not_an_unplaced_age() {
        let records = vec![
            PatientRecord::new("A00.0", Gender::Unknown, Age::years(30)),
            PatientRecord::new("A00.0", Gender::Male, Age::years(200)),
        ];
        let mut rows = vec![row(&["A00.0"])];
        let stats = Aggregator::new(ReportKind::Sirs).aggregate(&mut rows, &records);
        assert_eq!(stats.unclassified_gender, 1);
        assert_eq!(stats.unclassified_age, 1);
        assert_eq!(rows[0].count("KASUS_L"), 1);
    }
}
