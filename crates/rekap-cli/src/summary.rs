use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rekap_model::{ColumnLayout, ReportRow};

use rekap_cli::report::RunOutcome;

/// Rows with the most matched records shown in the run summary.
const TOP_ROWS: usize = 10;

pub fn print_summary(outcome: &RunOutcome) {
    let stats = &outcome.report.stats;
    let issues = &outcome.report.issues;
    println!("Report: {}", outcome.kind);
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Template rows"), Cell::new(stats.rows)]);
    table.add_row(vec![Cell::new("Records"), Cell::new(stats.records)]);
    table.add_row(vec![Cell::new("Matched contributions"), Cell::new(stats.matched)]);
    table.add_row(vec![Cell::new("Rows without matches"), dim_cell(stats.unmatched_rows)]);
    table.add_row(vec![
        Cell::new("Age not classified"),
        count_cell(stats.unclassified_age, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Gender not classified"),
        count_cell(stats.unclassified_gender, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Category not classified"),
        count_cell(stats.unclassified_category, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Invalid numbers read as 0"),
        count_cell(issues.invalid_numbers, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Records without a code"),
        count_cell(issues.missing_codes, Color::Red),
    ]);
    println!("{table}");

    print_top_rows(outcome);
}

fn print_top_rows(outcome: &RunOutcome) {
    let layout = ColumnLayout::for_kind(outcome.kind);
    let Some(total) = layout.derived.first() else {
        return;
    };
    let mut ranked: Vec<&ReportRow> = outcome
        .rows
        .iter()
        .filter(|row| row.count(&total.name) > 0)
        .collect();
    if ranked.is_empty() {
        return;
    }
    ranked.sort_by(|a, b| b.count(&total.name).cmp(&a.count(&total.name)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Expression"),
        header_cell("Codes"),
        header_cell(&total.name),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in ranked.into_iter().take(TOP_ROWS) {
        table.add_row(vec![
            Cell::new(&row.expression),
            dim_cell(row.codes.len()),
            Cell::new(row.count(&total.name)).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
