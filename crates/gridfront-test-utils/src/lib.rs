//! Testing utilities for the gridfront workspace
//!
//! Shared grid fixtures, expected fronts and proptest strategies.

#![allow(missing_docs)]

use gridfront_kernel::{CellKind, Grid, Resources, Solver, SolverConfig};
use proptest::prelude::*;

/// Grid with two incomparable paths to its End cell.
pub const CANONICAL: &str = "ASS\nELB\nEEE";

/// Front of the End cell of [`CANONICAL`] under the default budget.
pub const CANONICAL_FRONT: [Resources; 2] = [Resources::new(200, 446), Resources::new(190, 450)];

/// `(row, col)` history of each path in [`CANONICAL_FRONT`], same order.
pub const CANONICAL_HISTORIES: [&[(usize, usize)]; 2] = [
    &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2)],
    &[(0, 0), (0, 1), (0, 2), (1, 2)],
];

/// Only a Lava corridor leads to the End; four Lava cells drain the
/// default 200 health to zero.
pub const LAVA_CORRIDOR: &str = "ALLLLB";

/// End walled in by Lava. Unreachable with a starting health of 50.
pub const LAVA_ENCLOSED: &str = "AEE\nELL\nELB";
pub const LAVA_ENCLOSED_HEALTH: i32 = 50;

pub fn grid(text: &str) -> Grid {
    Grid::parse(text).unwrap()
}

pub fn solver(config: SolverConfig) -> Solver {
    Solver::new(config).unwrap()
}

/// Solve `text` with `config` and return the grid.
pub fn solved(text: &str, config: SolverConfig) -> Grid {
    let mut grid = grid(text);
    let report = solver(config).solve(&mut grid);
    assert!(report.converged, "solver stopped before fixpoint");
    grid
}

/// The front of the first End cell.
pub fn end_front(grid: &Grid) -> Vec<Resources> {
    let end = grid.end_cells().next().expect("grid has no End cell");
    grid.labels(end.id).front()
}

/// `(row, col)` history of every path reaching the first End cell, best first.
pub fn end_histories(grid: &Grid) -> Vec<Vec<(usize, usize)>> {
    let end = grid.end_cells().next().expect("grid has no End cell");
    grid.labels(end.id)
        .sorted()
        .into_iter()
        .map(|label| {
            label
                .history()
                .iter()
                .map(|&id| {
                    let cell = grid.cell(id);
                    (cell.row, cell.col)
                })
                .collect()
        })
        .collect()
}

/// Any non-Start cell kind.
pub fn arb_fill() -> impl Strategy<Value = CellKind> {
    prop_oneof![
        3 => Just(CellKind::Blank),
        2 => Just(CellKind::Speeder),
        1 => Just(CellKind::Lava),
        2 => Just(CellKind::Mud),
        1 => Just(CellKind::End),
    ]
}

/// Rectangular grids up to `max_side` on each side with exactly one Start.
pub fn arb_grid(max_side: usize) -> impl Strategy<Value = Grid> {
    (1..=max_side, 1..=max_side)
        .prop_flat_map(|(rows, cols)| {
            (
                proptest::collection::vec(arb_fill(), rows * cols),
                0..rows * cols,
                Just(cols),
            )
        })
        .prop_map(|(mut cells, start, cols)| {
            cells[start] = CellKind::Start;
            let rows = cells.chunks(cols).map(<[CellKind]>::to_vec).collect();
            Grid::from_rows(rows).unwrap()
        })
}

/// Small positive budgets so that validity actually prunes.
pub fn arb_budget() -> impl Strategy<Value = SolverConfig> {
    (1..=120i32, 1..=40i32).prop_map(|(health, moves)| {
        SolverConfig::new()
            .with_starting_health(health)
            .with_max_moves(moves)
    })
}
