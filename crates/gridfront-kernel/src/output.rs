//! Serializable view of a solved grid.

use crate::grid::Grid;
use crate::label::Label;
use crate::scheduler::SolveReport;
use crate::types::CellKind;
use serde::{Deserialize, Serialize};

/// A cell on a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
}

/// One Pareto-optimal path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathView {
    pub health: i32,
    pub moves: i32,
    pub history: Vec<CellView>,
}

impl PathView {
    pub fn from_label(grid: &Grid, label: &Label) -> Self {
        Self {
            health: label.health(),
            moves: label.moves(),
            history: label
                .history()
                .iter()
                .map(|&id| {
                    let cell = grid.cell(id);
                    CellView {
                        row: cell.row,
                        col: cell.col,
                        kind: cell.kind,
                    }
                })
                .collect(),
        }
    }
}

/// The Pareto front reaching one End cell. Empty `paths` means unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndFront {
    pub row: usize,
    pub col: usize,
    pub paths: Vec<PathView>,
}

/// Everything a caller needs from a solved grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub rows: usize,
    pub cols: usize,
    pub converged: bool,
    pub pops: u64,
    pub merges: u64,
    pub ends: Vec<EndFront>,
}

impl Solution {
    /// Collect the fronts of every End cell, best health first.
    pub fn from_grid(grid: &Grid, report: &SolveReport) -> Self {
        let ends = grid
            .end_cells()
            .map(|end| EndFront {
                row: end.row,
                col: end.col,
                paths: grid
                    .labels(end.id)
                    .sorted()
                    .into_iter()
                    .map(|label| PathView::from_label(grid, label))
                    .collect(),
            })
            .collect();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            converged: report.converged,
            pops: report.pops,
            merges: report.merges,
            ends,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
