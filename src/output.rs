//! Terminal rendering: aligned text tables for rows, pretty JSON for records.

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

use records::Row;
use serde::Serialize;

use crate::error::ConsoleError;

const MAX_CELL_WIDTH: usize = 48;

/// Render rows under `R::columns()`, padding every column to its widest cell.
#[must_use]
pub fn render_table<R: Row>(rows: &[&R]) -> String {
    let columns = R::columns();
    let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells().into_iter().map(|c| clip(&c)).collect()).collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, columns.iter().map(|c| (*c).to_owned()), &widths);
    push_line(&mut out, widths.iter().map(|w| "-".repeat(*w)), &widths);
    for row in cells {
        push_line(&mut out, row.into_iter(), &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

pub fn print_table<R: Row>(rows: &[&R]) {
    print!("{}", render_table(rows));
}

/// # Errors
///
/// Fails only if `value` cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ConsoleError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Single-line cell text, truncated with an ellipsis.
fn clip(cell: &str) -> String {
    let flat = cell.replace(['\n', '\r', '\t'], " ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut clipped: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
