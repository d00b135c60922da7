//! One report run: template and records in, filled rows out.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rekap_core::{Aggregator, RunReport};
use rekap_ingest::{read_record_table, read_template, write_report};
use rekap_map::{FieldAliases, FieldResolver, load_aliases};
use rekap_model::{ColumnLayout, ReportKind, ReportRow};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub kind: ReportKind,
    pub template: PathBuf,
    pub records: PathBuf,
    pub aliases: Option<PathBuf>,
    /// CSV destination; `None` with `write_csv` uses [`default_output_path`].
    pub output: Option<PathBuf>,
    pub write_csv: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub kind: ReportKind,
    pub rows: Vec<ReportRow>,
    pub report: RunReport,
    pub output: Option<PathBuf>,
}

/// Machine-readable form of a run for `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub report: ReportKind,
    pub columns: &'a [String],
    #[serde(flatten)]
    pub summary: &'a RunReport,
    pub rows: &'a [ReportRow],
}

/// `<template stem>_<report>.csv` next to the template.
pub fn default_output_path(template: &Path, kind: ReportKind) -> PathBuf {
    let stem = template
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    template.with_file_name(format!("{stem}_{kind}.csv"))
}

/// Built-in aliases, extended by the file when one is given.
pub fn resolve_aliases(path: Option<&Path>) -> Result<FieldAliases> {
    match path {
        Some(path) => {
            load_aliases(path).with_context(|| format!("load aliases {}", path.display()))
        }
        None => Ok(FieldAliases::default()),
    }
}

pub fn run_report(options: &RunOptions) -> Result<RunOutcome> {
    let aliases = resolve_aliases(options.aliases.as_deref())?;
    let aggregator = Aggregator::new(options.kind);

    let mut rows = read_template(&options.template, &aliases, aggregator.layout())
        .with_context(|| format!("read template {}", options.template.display()))?;
    let table = read_record_table(&options.records)
        .with_context(|| format!("read records {}", options.records.display()))?;

    let resolver = FieldResolver::new(aliases);
    let report = aggregator
        .aggregate_table(&mut rows, &table, &resolver)
        .with_context(|| format!("aggregate {}", options.records.display()))?;

    let output = if options.write_csv {
        let path = options
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&options.template, options.kind));
        write_report(&path, &rows, aggregator.layout())
            .with_context(|| format!("write report {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "report written");
        Some(path)
    } else {
        None
    };

    Ok(RunOutcome {
        kind: options.kind,
        rows,
        report,
        output,
    })
}

impl RunOutcome {
    pub fn to_json(&self) -> Result<String> {
        let layout = ColumnLayout::for_kind(self.kind);
        let json = JsonReport {
            report: self.kind,
            columns: &layout.counts,
            summary: &self.report,
            rows: &self.rows,
        };
        serde_json::to_string_pretty(&json).context("serialize report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_beside_template() {
        let path = default_output_path(Path::new("/data/rl4.csv"), ReportKind::Puskesad);
        assert_eq!(path, PathBuf::from("/data/rl4_puskesad.csv"));
        let path = default_output_path(Path::new("form.csv"), ReportKind::Sirs);
        assert_eq!(path, PathBuf::from("form_sirs.csv"));
    }
}
