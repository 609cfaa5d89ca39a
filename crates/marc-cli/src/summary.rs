use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use marc_model::SkipReason;

use crate::types::ConvertResult;

pub fn print_summary(result: &ConvertResult) {
    let report = &result.report;
    println!("Source: {}", report.source.display());
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    if let Some(path) = &result.failure_report {
        println!("Failure report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Records"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Read"), Cell::new(report.records_read)]);
    table.add_row(vec![
        Cell::new(if result.dry_run { "Would write" } else { "Written" }),
        count_cell(report.written.len(), Color::Green),
    ]);
    for reason in [SkipReason::AlreadyProcessed, SkipReason::PrefixMismatch] {
        let count = report.skipped.get(reason.as_str()).copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(format!("Skipped ({})", reason.as_str())),
            count_cell(count, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Failed")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.failures.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_rule_table(result);

    if !report.failures.is_empty() {
        eprintln!("Failed records:");
        for failure in &report.failures {
            eprintln!("- {} (record {}): {}", failure.identifier, failure.index, failure.message);
        }
    }
}

fn print_rule_table(result: &ConvertResult) {
    let counts = &result.report.rule_counts;
    if counts.is_empty() {
        return;
    }
    let mut ordered: Vec<(&String, &usize)> = counts.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![header_cell("Rule action"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, count) in ordered {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    println!();
    println!("Rule actions:");
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
