use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use rekap_cli::report::{RunOptions, RunOutcome, resolve_aliases, run_report};
use rekap_codes::Expander;
use rekap_ingest::read_record_table;
use rekap_map::{FieldResolver, LogicalField};
use rekap_model::{ColumnLayout, ReportKind};
use tracing::info_span;

use crate::cli::{ColumnsArgs, ExpandArgs, FieldsArgs, RunArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_run(args: &RunArgs) -> Result<RunOutcome> {
    let kind = ReportKind::from(args.report);
    let span = info_span!("run", report = %kind, template = %args.template.display());
    let _guard = span.enter();
    let options = RunOptions {
        kind,
        template: args.template.clone(),
        records: args.records.clone(),
        aliases: args.aliases.clone(),
        output: args.output.clone(),
        write_csv: !args.json || args.output.is_some(),
    };
    run_report(&options)
}

pub fn run_expand(args: &ExpandArgs) -> Result<()> {
    let expander = Expander::new().with_default_prefix(args.prefix);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expression"),
        header_cell("Count"),
        header_cell("Codes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for expression in &args.expressions {
        let codes = expander.expand(expression);
        let listed = codes
            .iter()
            .map(|code| code.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new(expression), Cell::new(codes.len()), Cell::new(listed)]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let aliases = resolve_aliases(args.aliases.as_deref())?;
    let table = read_record_table(&args.records)
        .with_context(|| format!("read records {}", args.records.display()))?;
    let mapping = FieldResolver::new(aliases)
        .resolve(&table.columns)
        .with_context(|| format!("resolve columns of {}", args.records.display()))?;

    let mut output = Table::new();
    output.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Column"),
    ]);
    apply_table_style(&mut output);
    align_column(&mut output, 1, CellAlignment::Center);
    for field in LogicalField::ALL {
        let required = if field.is_required() { "yes" } else { "no" };
        let column = match mapping.column(field) {
            Some(name) => Cell::new(name),
            None => dim_cell("-"),
        };
        output.add_row(vec![Cell::new(field.label()), Cell::new(required), column]);
    }
    println!("{output}");
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let layout = ColumnLayout::for_kind(args.report.into());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column"), header_cell("Sum of")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in layout.counts.iter().enumerate() {
        let parts = layout
            .derived
            .iter()
            .find(|derived| &derived.name == column)
            .map(|derived| derived.parts.join(" + "));
        let parts = match parts {
            Some(parts) => Cell::new(parts),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(idx + 1), Cell::new(column), parts]);
    }
    println!("{table}");
    Ok(())
}
