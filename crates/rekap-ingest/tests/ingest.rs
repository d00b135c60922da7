use std::fs;

use rekap_ingest::{IngestError, read_record_table, read_template, write_report};
use rekap_map::FieldAliases;
use rekap_model::{ColumnLayout, ReportKind};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn record_table_strips_bom_and_pads_rows() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "records.csv",
        "\u{feff}KODE ICD , JK,UMUR\n\nA00.0, L ,30\nA01.0,P\n",
    );
    let table = read_record_table(&path).unwrap();
    assert_eq!(table.columns, vec!["KODE ICD", "JK", "UMUR"]);
    assert_eq!(table.rows, vec![vec!["A00.0", "L", "30"], vec!["A01.0", "P", ""]]);
}

#[test]
fn read_errors() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        read_record_table(&missing),
        Err(IngestError::FileNotFound { .. })
    ));

    let empty = write(&dir, "empty.csv", "\n , \n");
    assert!(matches!(read_record_table(&empty), Err(IngestError::EmptyCsv { .. })));
}

#[test]
fn template_rows_are_expanded_and_stale_counts_dropped() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "template.csv",
        "NO,Golongan Sebab Penyakit,URAIAN,L,P\n\
         1,\"A 06.0-.3,.5-.9\",Amoebiasis,4,5\n\
         2,,Judul bagian,,\n\
         3,A 00,Kolera,1,1\n",
    );
    let layout = ColumnLayout::for_kind(ReportKind::Puskesad);
    let rows = read_template(&path, &FieldAliases::default(), &layout).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].expression, "A 06.0-.3,.5-.9");
    assert_eq!(rows[0].codes.len(), 9);
    assert_eq!(
        rows[0].preserved,
        vec![
            ("NO".to_string(), "1".to_string()),
            ("Golongan Sebab Penyakit".to_string(), "A 06.0-.3,.5-.9".to_string()),
            ("URAIAN".to_string(), "Amoebiasis".to_string()),
        ]
    );
    assert!(rows[0].counts.is_empty());
    assert!(rows[1].codes.is_empty());
    assert_eq!(rows[2].codes[0].as_str(), "A00.0");
}

#[test]
fn template_without_code_column() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "template.csv", "NO,URAIAN\n1,Kolera\n");
    let layout = ColumnLayout::for_kind(ReportKind::Sirs);
    let err = read_template(&path, &FieldAliases::default(), &layout).unwrap_err();
    match err {
        IngestError::MissingCodeColumn { available, .. } => {
            assert_eq!(available, vec!["NO", "URAIAN"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn report_round_trips_through_record_reader() {
    let dir = TempDir::new().unwrap();
    let template = write(&dir, "template.csv", "KODE,URAIAN\nA 00,Kolera\n");
    let layout = ColumnLayout::for_kind(ReportKind::Sirs);
    let mut rows = read_template(&template, &FieldAliases::default(), &layout).unwrap();
    rows[0].reset(&layout.counts);
    rows[0].set("KASUS_L", 3);

    let output = dir.path().join("out.csv");
    write_report(&output, &rows, &layout).unwrap();
    let written = read_record_table(&output).unwrap();

    assert_eq!(written.columns.len(), 2 + layout.len());
    assert_eq!(written.columns[..3], ["KODE", "URAIAN", "0 HR_L"]);
    let idx = written.column_index("KASUS_L").unwrap();
    assert_eq!(written.get(0, idx), "3");
    assert_eq!(written.get(0, 0), "A 00");
}

#[test]
fn blank_template_headers_survive_the_round_trip() {
    let dir = TempDir::new().unwrap();
    let template = write(&dir, "template.csv", "NO,KODE,,\n1,A 00,Kolera,Catatan\n");
    let layout = ColumnLayout::for_kind(ReportKind::Puskesad);
    let mut rows = read_template(&template, &FieldAliases::default(), &layout).unwrap();
    rows[0].reset(&layout.counts);

    let output = dir.path().join("out.csv");
    write_report(&output, &rows, &layout).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();

    assert!(lines.next().unwrap().starts_with("NO,KODE,,,0-28 HR,"));
    assert!(lines.next().unwrap().starts_with("1,A 00,Kolera,Catatan,0,"));
}
