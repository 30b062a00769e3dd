//! Grid topology, per-cell effects and per-cell label state.
//!
//! Topology and effects are fixed at construction. The only mutable state
//! is each cell's [`LabelSet`] and its visit counter, both owned by the
//! grid and changed only by the solver.

mod loader;

use crate::error::GridError;
use crate::label::{self, Label, LabelSet};
use crate::types::{CellId, CellKind, Resources};
use std::fmt;

/// One grid cell. Immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: CellId,
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    pub health_delta: i32,
    pub moves_delta: i32,
}

impl Cell {
    fn new(id: CellId, row: usize, col: usize, kind: CellKind) -> Self {
        let effect = kind.effect();
        Self {
            id,
            row,
            col,
            kind,
            health_delta: effect.health,
            moves_delta: effect.moves,
        }
    }

    /// Resource change applied when a path enters this cell.
    #[inline]
    pub fn effect(&self) -> Resources {
        Resources::new(self.health_delta, self.moves_delta)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.kind.symbol(), self.row, self.col)
    }
}

#[derive(Debug, Clone, Default)]
struct CellState {
    labels: LabelSet,
    visits: u64,
}

/// A validated rectangular grid with exactly one Start cell.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    state: Vec<CellState>,
    start: CellId,
}

impl Grid {
    /// Build a grid from typed rows.
    ///
    /// # Errors
    /// `Empty`, `Ragged`, `MissingStart` or `MultipleStarts`.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, GridError> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(GridError::Empty),
        };

        let mut cells = Vec::with_capacity(rows.len() * width);
        let mut start: Option<Cell> = None;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            for (c, &kind) in row.iter().enumerate() {
                let id = CellId((r * width + c) as u32);
                let cell = Cell::new(id, r, c, kind);
                if kind == CellKind::Start {
                    if let Some(first) = start {
                        return Err(GridError::MultipleStarts {
                            first: (first.row, first.col),
                            second: (r, c),
                        });
                    }
                    start = Some(cell);
                }
                cells.push(cell);
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;
        Ok(Self {
            rows: rows.len(),
            cols: width,
            state: vec![CellState::default(); cells.len()],
            cells,
            start: start.id,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn id_at(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.rows && col < self.cols).then(|| CellId((row * self.cols + col) as u32))
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.id_at(row, col).map(|id| self.cell(id))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All End cells in row-major order.
    pub fn end_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.kind == CellKind::End)
    }

    #[inline]
    pub fn labels(&self, id: CellId) -> &LabelSet {
        &self.state[id.index()].labels
    }

    /// How many times the scheduler processed this cell. Diagnostic only.
    #[inline]
    pub fn visits(&self, id: CellId) -> u64 {
        self.state[id.index()].visits
    }

    /// Reset all label state and seed the Start cell with a single label
    /// holding `budget` and the history `[Start]`.
    pub fn seed(&mut self, budget: Resources) {
        for state in &mut self.state {
            *state = CellState::default();
        }
        let origin = Label::origin(self.start, budget);
        self.state[self.start.index()].labels = LabelSet::from_iter([origin]);
    }

    pub(crate) fn record_visit(&mut self, id: CellId) {
        self.state[id.index()].visits += 1;
    }

    /// Cheap pre-check: would any label of `from` improve `to`?
    pub fn should_propagate(&self, from: CellId, to: CellId) -> bool {
        from != to && label::should_propagate(self.labels(from), self.cell(to), self.labels(to))
    }

    /// Fold `from`'s labels, advanced onto `to`, into `to`'s label set.
    /// Returns whether `to`'s set changed.
    pub fn merge(&mut self, from: CellId, to: CellId) -> bool {
        if from == to {
            return false;
        }
        let to_cell = *self.cell(to);
        let (from_labels, to_labels) = self.label_pair_mut(from, to);
        label::merge(from_labels, &to_cell, to_labels)
    }

    fn label_pair_mut(&mut self, from: CellId, to: CellId) -> (&LabelSet, &mut LabelSet) {
        let (f, t) = (from.index(), to.index());
        if f < t {
            let (lo, hi) = self.state.split_at_mut(t);
            (&lo[f].labels, &mut hi[0].labels)
        } else {
            let (lo, hi) = self.state.split_at_mut(f);
            (&hi[0].labels, &mut lo[t].labels)
        }
    }

    /// `A (0, 0) [3v, 1p]`: symbol, position, visits and label count.
    pub fn describe(&self, id: CellId) -> String {
        format!(
            "{} [{}v, {}p]",
            self.cell(id),
            self.visits(id),
            self.labels(id).len()
        )
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render_grid(self))
    }
}
