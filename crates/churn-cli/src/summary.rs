use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use churn_cli::types::RunSummary;
use churn_ingest::FrameProfile;
use churn_load::LoadReport;
use churn_model::{PartitionKind, StarSchema};

pub fn print_run_summary(summary: &RunSummary) {
    println!("Source: {}", summary.source.display());
    println!("Database: {}", summary.database.display());
    println!(
        "Ingested {} rows x {} columns; repaired {} monetary values; removed {} duplicate rows",
        summary.rows_ingested,
        summary.columns_ingested,
        summary.clean.repaired_values,
        summary.clean.duplicates_removed
    );
    for path in &summary.artifacts {
        println!("Wrote {}", path.display());
    }
    print_load_report(&summary.load);
    if !summary.unassigned.is_empty() {
        eprintln!("Not loaded (no partition): {}", summary.unassigned.join(", "));
    }
}

pub fn print_load_report(report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Relation"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for relation in &report.relations {
        table.add_row(vec![
            partition_cell(&relation.partition),
            Cell::new(&relation.relation),
            count_cell(relation.rows),
            Cell::new(relation.columns),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_profile(profile: &FrameProfile) {
    println!(
        "{} rows, {} columns, {} duplicate rows",
        profile.rows,
        profile.columns.len(),
        profile.duplicate_rows
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Distinct"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for column in &profile.columns {
        let nulls = if column.null_count > 0 {
            Cell::new(column.null_count).fg(Color::Yellow)
        } else {
            dim_cell(column.null_count)
        };
        table.add_row(vec![
            Cell::new(&column.name),
            dim_cell(&column.dtype),
            nulls,
            Cell::new(column.distinct),
        ]);
    }
    println!("{table}");
}

pub fn print_schema(schema: &StarSchema) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Relation"),
        header_cell("Kind"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for spec in schema.partitions() {
        let kind = match spec.kind {
            PartitionKind::Fact => Cell::new("fact").fg(Color::Green),
            PartitionKind::Dimension => Cell::new("dimension"),
        };
        table.add_row(vec![
            partition_cell(&spec.name),
            Cell::new(&spec.relation),
            kind,
            Cell::new(spec.columns.join(", ")),
        ]);
    }
    println!("Key: {}", schema.key());
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
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn partition_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
