//! Text rendering of grids, paths and solved fronts.

use crate::grid::Grid;
use crate::label::Label;
use crate::types::{CellId, CellKind};
use std::fmt::{self, Write};

/// Glyph drawn over every non-terminal cell a path visits.
pub const PATH_MARKER: char = '*';

const SEPARATOR: &str = "--------------------";

/// Grid symbols, one row per line, separated by single spaces.
pub fn render_grid(grid: &Grid) -> String {
    render_with(grid, |_, _| None)
}

/// The grid with each visited non-terminal cell replaced by [`PATH_MARKER`].
pub fn render_path(grid: &Grid, label: &Label) -> String {
    let mut on_path = vec![false; grid.len()];
    for id in label.history() {
        on_path[id.index()] = true;
    }
    render_with(grid, |index, kind| {
        (on_path[index] && !kind.is_terminal()).then_some(PATH_MARKER)
    })
}

fn render_with(grid: &Grid, overlay: impl Fn(usize, CellKind) -> Option<char>) -> String {
    let mut out = String::with_capacity(grid.len() * 2);
    for row in 0..grid.rows() {
        if row > 0 {
            out.push('\n');
        }
        for col in 0..grid.cols() {
            if col > 0 {
                out.push(' ');
            }
            let index = row * grid.cols() + col;
            let kind = grid.cell(CellId(index as u32)).kind;
            out.push(overlay(index, kind).unwrap_or_else(|| kind.symbol()));
        }
    }
    out
}

/// Write the solved fronts of every End cell.
///
/// With several End cells each block is headed by `End (r, c)`.
pub fn write_report<W: Write>(grid: &Grid, out: &mut W) -> fmt::Result {
    let ends: Vec<_> = grid.end_cells().collect();
    if ends.is_empty() {
        return writeln!(out, "*** No end cell in grid. ***");
    }

    for end in &ends {
        if ends.len() > 1 {
            writeln!(out, "\nEnd ({}, {})", end.row, end.col)?;
        }
        let labels = grid.labels(end.id);
        if labels.is_empty() {
            writeln!(out, "*** No valid path found. ***")?;
            continue;
        }
        for (i, label) in labels.sorted().into_iter().enumerate() {
            writeln!(out, "\nPath {}: {}", i + 1, label.resources())?;
            writeln!(out, "Path visualization:")?;
            writeln!(out, "{}", render_path(grid, label))?;
            writeln!(out, "{SEPARATOR}")?;
        }
    }
    Ok(())
}

/// [`write_report`] into a fresh string.
pub fn report(grid: &Grid) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(grid, &mut out)?;
    Ok(out)
}
