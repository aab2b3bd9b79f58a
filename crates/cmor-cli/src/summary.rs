use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cmor_validate::BatchSummary;

pub fn print_summary(summary: &BatchSummary) {
    println!("Files checked: {}", summary.checked);
    let passed = summary.checked - summary.failures.len();
    println!(
        "Passed: {passed}  Failed: {}",
        summary.failures.len()
    );
    if summary.failures.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Error")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }
    for failure in &summary.failures {
        table.add_row(vec![
            Cell::new(failure.path.display()),
            Cell::new(&failure.message).fg(Color::Red),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
