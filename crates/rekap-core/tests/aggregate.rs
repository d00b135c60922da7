use proptest::prelude::*;
use rekap_codes::expand;
use rekap_core::{Aggregator, CoreError};
use rekap_map::{FieldResolver, LogicalField, MappingError};
use rekap_model::{Age, Gender, PatientRecord, RecordTable, ReportKind, ReportRow};

fn template(expressions: &[&str]) -> Vec<ReportRow> {
    expressions
        .iter()
        .map(|expr| ReportRow::new(*expr, expand(expr)))
        .collect()
}

fn sample_records() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new("A06.1", Gender::Male, Age::years(25))
            .with_affiliation("AD")
            .with_payer_type("BPJS"),
        PatientRecord::new("a06.9", Gender::Female, Age::years(40))
            .with_affiliation("KEL AL")
            .with_outcome("Meninggal"),
        PatientRecord::new("A06.4", Gender::Female, Age::new(0, 2, 0)).with_affiliation("UMUM"),
        PatientRecord::new("A15.3", Gender::Unknown, Age::years(70)),
        PatientRecord::new("B99.9", Gender::Male, Age::years(10)),
    ]
}

#[test]
fn eight_band_report_counts() {
    let mut rows = template(&["A 06.0-.3,.5-.9", "A 15.1-16.2", "C 00"]);
    let stats = Aggregator::new(ReportKind::Puskesad).aggregate(&mut rows, &sample_records());

    let a06 = &rows[0];
    assert_eq!(a06.count("15-25 TH"), 1);
    assert_eq!(a06.count("25-44 TH"), 1);
    assert_eq!(a06.count("L"), 1);
    assert_eq!(a06.count("P"), 1);
    assert_eq!(a06.count("JML"), 2);
    assert_eq!(a06.count("MIL AD"), 1);
    assert_eq!(a06.count("PURN/BPJS"), 1);
    assert_eq!(a06.count("KEL LAIN"), 1);
    assert_eq!(a06.count("MATI"), 1);
    assert_eq!(a06.count("UMUM"), 0, "A06.4 is not part of the expression");

    let a15 = &rows[1];
    assert_eq!(a15.count(">64 TH"), 1);
    assert_eq!(a15.count("JML"), 0);

    assert!(rows[2].counts.values().all(|count| *count == 0));

    assert_eq!(stats.rows, 3);
    assert_eq!(stats.records, 5);
    assert_eq!(stats.matched, 3);
    assert_eq!(stats.unmatched_rows, 1);
    assert_eq!(stats.unclassified_gender, 1);
    assert_eq!(stats.unclassified_category, 1);
}

#[test]
fn grid_report_counts() {
    let mut rows = template(&["A 06.0-.9"]);
    Aggregator::new(ReportKind::Sirs).aggregate(&mut rows, &sample_records());
    let row = &rows[0];
    assert_eq!(row.count("25-44 TH_L"), 1);
    assert_eq!(row.count("25-44 TH_P"), 1);
    assert_eq!(row.count("29 HR-<3 BL_P"), 1);
    assert_eq!(row.count("KASUS_L"), 1);
    assert_eq!(row.count("KASUS_P"), 2);
    assert_eq!(row.count("KASUS_JML"), 3);
    assert_eq!(row.count("MATI_P"), 1);
    assert_eq!(row.count("MATI_JML"), 1);
    assert!(!row.counts.contains_key("MIL AD"));
}

#[test]
fn rerunning_gives_identical_rows() {
    let aggregator = Aggregator::new(ReportKind::Puskesad);
    let records = sample_records();
    let mut rows = template(&["A 06.0-.9", "A 15"]);
    aggregator.aggregate(&mut rows, &records);
    let first = rows.clone();
    aggregator.aggregate(&mut rows, &records);
    assert_eq!(rows, first);
}

#[test]
fn twenty_five_year_old_lands_in_fifteen_to_twenty_five() {
    let records = vec![PatientRecord::new("J18.9", Gender::Female, Age::years(25))];
    let mut rows = template(&["J 18.9"]);
    Aggregator::new(ReportKind::Puskesad).aggregate(&mut rows, &records);
    assert_eq!(rows[0].count("15-25 TH"), 1);
    assert_eq!(rows[0].count("25-44 TH"), 0);
}

#[test]
fn non_matching_record_contributes_nothing() {
    let records = vec![PatientRecord::new("A06.1 X", Gender::Male, Age::years(30))];
    let mut rows = template(&["A 06.1"]);
    let stats = Aggregator::new(ReportKind::Sirs).aggregate(&mut rows, &records);
    assert_eq!(stats.matched, 0);
    assert!(rows[0].counts.values().all(|count| *count == 0));
}

#[test]
fn unresolved_field_leaves_rows_untouched() {
    let mut rows = template(&["A 06.1"]);
    rows[0].set("L", 7);
    let before = rows.clone();

    let mut table = RecordTable::new(vec!["NO".into(), "JK".into(), "UMUR".into()]);
    table.push_row(vec!["1".into(), "L".into(), "30".into()]);

    let err = Aggregator::new(ReportKind::Puskesad)
        .aggregate_table(&mut rows, &table, &FieldResolver::default())
        .unwrap_err();
    match err {
        CoreError::Mapping(MappingError::UnresolvedField { field, available, .. }) => {
            assert_eq!(field, LogicalField::DiagnosisCode);
            assert_eq!(available, vec!["NO", "JK", "UMUR"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(rows, before);
}

#[test]
fn table_run_reports_issues() {
    let mut table = RecordTable::new(
        ["KODE ICD", "JK", "UMUR", "GOLONGAN"].map(String::from).to_vec(),
    );
    table.push_row(["A06.1", "P", "30.0", "PNS AD"].map(String::from).to_vec());
    table.push_row(["A06.1", "L", "tiga", ""].map(String::from).to_vec());
    table.push_row(["", "L", "3", ""].map(String::from).to_vec());

    let mut rows = template(&["A 06.1"]);
    let report = Aggregator::new(ReportKind::Puskesad)
        .aggregate_table(&mut rows, &table, &FieldResolver::default())
        .unwrap();

    assert_eq!(report.stats.matched, 2);
    assert_eq!(report.issues.invalid_numbers, 1);
    assert_eq!(report.issues.missing_codes, 1);
    assert_eq!(rows[0].count("PNS AD"), 1);
    assert_eq!(rows[0].count("0-28 HR"), 1);
    insta::assert_json_snapshot!(report, @r#"
    {
      "stats": {
        "rows": 1,
        "records": 3,
        "matched": 2,
        "unmatched_rows": 0,
        "unclassified_age": 0,
        "unclassified_gender": 0,
        "unclassified_category": 1
      },
      "issues": {
        "invalid_numbers": 1,
        "missing_codes": 1
      }
    }
    "#);
}

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Unknown)]
}

fn record_strategy() -> impl Strategy<Value = PatientRecord> {
    (
        0u32..12,
        gender_strategy(),
        0u32..160,
        0u32..12,
        0u32..31,
        prop::sample::select(vec!["", "AD", "PNS AU", "UMUM", "BPJS", "KEL AD"]),
        prop::sample::select(vec!["", "Sembuh", "Meninggal"]),
    )
        .prop_map(|(sub, gender, years, months, days, affiliation, outcome)| {
            PatientRecord::new(format!("A06.{sub}"), gender, Age::new(years, months, days))
                .with_affiliation(affiliation)
                .with_outcome(outcome)
        })
}

proptest! {
    #[test]
    fn derived_totals_match_their_parts(records in prop::collection::vec(record_strategy(), 0..60)) {
        for kind in ReportKind::ALL {
            let aggregator = Aggregator::new(kind);
            let mut rows = template(&["A 06.0-.9", "A 06.5"]);
            aggregator.aggregate(&mut rows, &records);
            for row in &rows {
                for derived in &aggregator.layout().derived {
                    let parts: u64 = derived.parts.iter().map(|p| row.count(p)).sum();
                    prop_assert_eq!(row.count(&derived.name), parts);
                }
            }
        }
    }

    #[test]
    fn gender_columns_count_known_genders(records in prop::collection::vec(record_strategy(), 0..60)) {
        let mut rows = template(&["A 06.0-.9"]);
        Aggregator::new(ReportKind::Puskesad).aggregate(&mut rows, &records);
        let known = records
            .iter()
            .filter(|r| r.gender.is_known() && r.diagnosis_code.len() == 5)
            .count() as u64;
        prop_assert_eq!(rows[0].count("JML"), known);
    }
}
