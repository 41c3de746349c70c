use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mbs_cli::types::RunResult;
use mbs_model::FieldSchema;

/// Render the run summary: source, output, counts and rejection breakdown.
pub fn render_summary(result: &RunResult) -> String {
    let mut lines = vec![format!("Source: {}", result.source)];
    if let Some(date) = &result.release_date {
        lines.push(format!("Release: {date}"));
    }
    match &result.output_path {
        Some(path) => lines.push(format!("Output: {}", path.display())),
        None => lines.push("Output: stdout".to_string()),
    }

    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Items"),
        header_cell("Valid"),
        header_cell("Rejected"),
        header_cell("Fields"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total_records).add_attribute(Attribute::Bold),
        count_cell(summary.valid_records, Color::Green),
        count_cell(summary.rejected_records, Color::Yellow),
        Cell::new(summary.field_count),
    ]);
    lines.push(table.to_string());

    if !result.rejection_counts.is_empty() {
        let mut rejections = Table::new();
        rejections.set_header(vec![header_cell("Reason"), header_cell("Count")]);
        apply_summary_table_style(&mut rejections);
        align_column(&mut rejections, 1, CellAlignment::Right);
        for (reason, count) in &result.rejection_counts {
            rejections.add_row(vec![
                Cell::new(*reason),
                count_cell(*count, Color::Yellow),
            ]);
        }
        lines.push(String::new());
        lines.push("Rejected items:".to_string());
        lines.push(rejections.to_string());
    }
    lines.join("\n")
}

pub fn print_summary(result: &RunResult) {
    println!("{}", render_summary(result));
    print_sink_failures(result);
}

/// Summary on stderr, for when stdout carries the document.
pub fn eprint_summary(result: &RunResult) {
    eprintln!("{}", render_summary(result));
    print_sink_failures(result);
}

fn print_sink_failures(result: &RunResult) {
    if !result.sink_failures.is_empty() {
        eprintln!("Warnings:");
        for failure in &result.sink_failures {
            eprintln!("- {failure}");
        }
    }
}

/// Table of declared fields in declaration order.
pub fn schema_table(schema: &FieldSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for definition in schema.definitions() {
        let required = if definition.required {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&definition.name),
            Cell::new(definition.field_type.as_str()),
            required,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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
