//! Frontier Scheduler
//!
//! Drives label propagation to a fixpoint. A cell popped from the frontier
//! offers its labels to each neighbor; a neighbor whose label set changed is
//! scheduled again. The loop ends when the frontier is empty.
//!
//! Termination: no cell ever adds health or moves, both are bounded below by
//! validity and above by the seed label, and each cell keeps at most one
//! label per `(health, moves)` pair, replaced only by a strictly shorter
//! history. Every merge that reports a change therefore makes progress
//! through a finite space.

pub mod frontier;

pub use frontier::{frontier_for, FifoFrontier, Frontier, LifoFrontier, ShuffledFrontier};

use crate::config::SolverConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::neighbors::NeighborCache;
use serde::{Deserialize, Serialize};

/// Counters from one solver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Cells taken from the frontier
    pub pops: u64,
    /// Neighbor merges attempted (pre-check passed)
    pub merges: u64,
    /// Merges that changed the neighbor's label set
    pub changes: u64,
    /// Neighbor offers rejected by the pre-check
    pub skipped: u64,
    /// Largest frontier size observed
    pub peak_frontier: usize,
    /// False if `max_pops` stopped the run before the fixpoint
    pub converged: bool,
}

/// Runs the frontier search with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver, rejecting unusable configurations.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Seed `grid` and propagate to fixpoint using the configured order.
    pub fn solve(&self, grid: &mut Grid) -> SolveReport {
        let mut frontier = frontier_for(self.config.order, grid.len());
        self.solve_with(grid, frontier.as_mut())
    }

    /// Like [`Solver::solve`] with a caller-supplied frontier.
    pub fn solve_with<F: Frontier + ?Sized>(&self, grid: &mut Grid, frontier: &mut F) -> SolveReport {
        grid.seed(self.config.budget());
        let neighbors = NeighborCache::new(grid);
        let mut report = SolveReport::default();

        tracing::info!(
            rows = grid.rows(),
            cols = grid.cols(),
            health = self.config.starting_health,
            moves = self.config.max_moves,
            "Solving"
        );

        frontier.push(grid.start());
        report.peak_frontier = frontier.len();

        loop {
            if let Some(limit) = self.config.max_pops {
                if report.pops >= limit && !frontier.is_empty() {
                    tracing::warn!(
                        limit,
                        pending = frontier.len(),
                        "Pop budget exhausted before fixpoint"
                    );
                    break;
                }
            }
            let Some(current) = frontier.pop() else {
                report.converged = true;
                break;
            };

            report.pops += 1;
            grid.record_visit(current);
            tracing::debug!(
                current = %grid.describe(current),
                frontier = frontier.len(),
                "Pop"
            );

            for &neighbor in neighbors.neighbors(current) {
                if !grid.should_propagate(current, neighbor) {
                    report.skipped += 1;
                    continue;
                }
                report.merges += 1;
                if grid.merge(current, neighbor) {
                    report.changes += 1;
                    tracing::trace!(neighbor = %grid.describe(neighbor), "Labels changed");
                    frontier.push(neighbor);
                    report.peak_frontier = report.peak_frontier.max(frontier.len());
                }
            }
        }

        tracing::info!(
            pops = report.pops,
            merges = report.merges,
            changes = report.changes,
            converged = report.converged,
            "Done"
        );
        report
    }
}

/// Solve `grid` in place with the default configuration.
pub fn solve(grid: &mut Grid) -> SolveReport {
    Solver::default().solve(grid)
}
