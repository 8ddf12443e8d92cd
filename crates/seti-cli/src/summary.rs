use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::GenerateOutcome;

const TABLE_WIDTH: u16 = 140;

pub fn print_summary(outcome: &GenerateOutcome) {
    println!("Entrada: {}", outcome.input.display());
    println!("Salida:  {}", outcome.output_dir.display());

    let mut table = styled_table(["Tabla", "Filas", "Aceptadas", "Rechazadas", "Archivo"]);
    for index in 1..=3 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    let file = outcome.report.as_ref().map_or_else(
        || Cell::new("-").fg(Color::DarkGrey),
        |report| Cell::new(report.path.display()).fg(Color::Green),
    );
    table.add_row(vec![
        Cell::new(&outcome.table_id)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.total_rows),
        count_cell(outcome.accepted(), Color::Green),
        count_cell(outcome.row_errors.len(), Color::Yellow),
        file,
    ]);
    println!("{table}");

    if !outcome.row_errors.is_empty() {
        let mut errors = styled_table(["Filas rechazadas"]);
        for message in &outcome.row_errors {
            errors.add_row(vec![Cell::new(message).fg(Color::Yellow)]);
        }
        println!();
        println!("{errors}");
    }
    if let Some(failure) = &outcome.failure {
        eprintln!("error: {failure}");
    }
}

/// Rounded condensed table with bold cyan headers.
pub fn styled_table<I, S>(headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_header(headers.into_iter().map(|label| {
            Cell::new(label.as_ref())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

fn count_cell(count: usize, color: Color) -> Cell {
    let cell = Cell::new(count);
    if count == 0 {
        cell.fg(Color::DarkGrey)
    } else {
        cell.fg(color).add_attribute(Attribute::Bold)
    }
}
