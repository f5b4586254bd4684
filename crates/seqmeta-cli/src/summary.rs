use std::fmt;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use seqmeta_cli::types::{ExportResult, ExtractResult};
use seqmeta_report::relative_outputs;

pub fn print_extract_summary(result: &ExtractResult) {
    println!("Container: {}", result.container);
    println!(
        "Experiments: {} of {} samples",
        result.experiments, result.samples
    );
    println!("Output: {}", result.output.display());
    let skipped = result.samples.saturating_sub(result.experiments);
    if skipped > 0 {
        eprintln!("Skipped {skipped} sample(s); see the log for details.");
    }
}

pub fn print_export_summary(result: &ExportResult) {
    println!("Runfolder: {}", result.runfolder);
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Project"),
        header_cell("Experiments"),
        header_cell("Runs"),
        header_cell("Outputs"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_experiments = 0usize;
    let mut total_runs = 0usize;
    for project in &result.projects {
        total_experiments += project.experiments;
        total_runs += project.runs;
        let outputs: Vec<String> = relative_outputs(&result.output_dir, project)
            .map(|path| path.display().to_string())
            .collect();
        table.add_row(vec![
            Cell::new(&project.project)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(project.experiments),
            count_cell(project.runs, Color::Yellow),
            if outputs.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(outputs.join("\n"))
            },
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_experiments).add_attribute(Attribute::Bold),
        Cell::new(total_runs).add_attribute(Attribute::Bold),
        Cell::new(format!("{} file(s)", result.output_count())).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

/// Node keys joined one per line.
pub fn node_list<N: fmt::Display>(nodes: &[N]) -> Cell {
    let keys: Vec<String> = nodes.iter().map(ToString::to_string).collect();
    Cell::new(keys.join("\n"))
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
