//! Randomised invariant harness
//!
//! Generates seeded grids, solves each one under several frontier orders
//! and checks the properties every fixpoint must have:
//! - every held label is valid
//! - no cell's set contains a label dominating another
//! - the `(health, moves)` front of every cell is independent of pop order

use crate::config::{FrontierOrder, SolverConfig};
use crate::grid::Grid;
use crate::scheduler::Solver;
use crate::types::{CellId, CellKind, Resources};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stress run configuration
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// First seed; grid `i` uses `seed + i`
    pub seed: u64,
    /// Number of grids to generate
    pub grids: u64,
    /// Maximum rows and columns of a generated grid
    pub max_side: usize,
    /// Probability that a generated cell is an End cell
    pub end_ratio: f64,
    /// Solver budget
    pub solver: SolverConfig,
    /// Stop on the first violation
    pub stop_on_first_violation: bool,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grids: 100,
            max_side: 6,
            end_ratio: 0.1,
            solver: SolverConfig::default(),
            stop_on_first_violation: false,
        }
    }
}

/// An invariant broken by a solved grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A held label has `health <= 0` or `moves <= 0`
    InvalidLabel { seed: u64, cell: CellId, resources: Resources },
    /// One held label dominates another on the same cell
    Dominated {
        seed: u64,
        cell: CellId,
        winner: Resources,
        loser: Resources,
    },
    /// Two pop orders ended with different fronts on a cell
    OrderDependent {
        seed: u64,
        cell: CellId,
        order: FrontierOrder,
        expected: Vec<Resources>,
        actual: Vec<Resources>,
    },
    /// A run did not reach its fixpoint
    NotConverged { seed: u64, order: FrontierOrder },
}

/// Outcome of [`run_stress`]
#[derive(Debug, Clone, Default)]
pub struct StressReport {
    pub grids: u64,
    pub solves: u64,
    pub total_pops: u64,
    pub violations: Vec<Violation>,
}

impl StressReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn generate_text(&self) -> String {
        let mut text = format!(
            "Stress Report\n=============\nGrids: {}\nSolves: {}\nTotal pops: {}\nViolations: {}\n",
            self.grids,
            self.solves,
            self.total_pops,
            self.violations.len()
        );
        for v in self.violations.iter().take(10) {
            text.push_str(&format!("  {v:?}\n"));
        }
        text.push_str(if self.passed() { "Status: PASSED\n" } else { "Status: FAILED\n" });
        text
    }
}

/// Generate a random grid with exactly one Start cell.
pub fn random_grid(rng: &mut impl Rng, max_side: usize, end_ratio: f64) -> Grid {
    let rows = rng.gen_range(1..=max_side.max(1));
    let cols = rng.gen_range(1..=max_side.max(1));
    let start = (rng.gen_range(0..rows), rng.gen_range(0..cols));
    const FILL: [CellKind; 4] = [CellKind::Blank, CellKind::Speeder, CellKind::Lava, CellKind::Mud];

    let cells = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    if (r, c) == start {
                        CellKind::Start
                    } else if rng.gen_bool(end_ratio.clamp(0.0, 1.0)) {
                        CellKind::End
                    } else {
                        FILL[rng.gen_range(0..FILL.len())]
                    }
                })
                .collect()
        })
        .collect();

    // One Start and a non-empty rectangle by construction.
    match Grid::from_rows(cells) {
        Ok(grid) => grid,
        Err(e) => unreachable!("generated grid rejected: {e}"),
    }
}

/// Fronts of every cell, in cell order.
pub fn fronts(grid: &Grid) -> Vec<Vec<Resources>> {
    grid.cells().map(|c| grid.labels(c.id).front()).collect()
}

/// Validity and dominance-freedom violations of a solved grid.
pub fn check_invariants(grid: &Grid, seed: u64) -> Vec<Violation> {
    let mut out = Vec::new();
    for cell in grid.cells() {
        let labels = grid.labels(cell.id);
        for a in labels.iter() {
            if !a.is_valid() {
                out.push(Violation::InvalidLabel {
                    seed,
                    cell: cell.id,
                    resources: a.resources(),
                });
            }
            for b in labels.iter() {
                if a.dominates(b) {
                    out.push(Violation::Dominated {
                        seed,
                        cell: cell.id,
                        winner: a.resources(),
                        loser: b.resources(),
                    });
                }
            }
        }
    }
    out
}

/// Run the harness.
pub fn run_stress(config: StressConfig) -> StressReport {
    let mut report = StressReport::default();
    let orders = |seed: u64| {
        [
            FrontierOrder::Fifo,
            FrontierOrder::Lifo,
            FrontierOrder::Shuffled { seed },
            FrontierOrder::Shuffled { seed: seed.wrapping_add(1) },
        ]
    };

    for i in 0..config.grids {
        let seed = config.seed.wrapping_add(i);
        let mut rng = StdRng::seed_from_u64(seed);
        let template = random_grid(&mut rng, config.max_side, config.end_ratio);
        report.grids += 1;

        let mut baseline: Option<Vec<Vec<Resources>>> = None;
        for order in orders(seed) {
            let mut grid = template.clone();
            let solver = match Solver::new(config.solver.clone().with_order(order)) {
                Ok(solver) => solver,
                Err(e) => {
                    tracing::error!("Stress config rejected: {e}");
                    return report;
                }
            };
            let run = solver.solve(&mut grid);
            report.solves += 1;
            report.total_pops += run.pops;

            if !run.converged {
                report.violations.push(Violation::NotConverged { seed, order });
                continue;
            }
            report.violations.extend(check_invariants(&grid, seed));

            let current = fronts(&grid);
            let Some(expected) = baseline.as_ref() else {
                baseline = Some(current);
                continue;
            };
            for (index, (want, got)) in expected.iter().zip(&current).enumerate() {
                if want != got {
                    report.violations.push(Violation::OrderDependent {
                        seed,
                        cell: CellId(index as u32),
                        order,
                        expected: want.clone(),
                        actual: got.clone(),
                    });
                }
            }
        }

        if config.stop_on_first_violation && !report.passed() {
            tracing::warn!(seed, "Stopping on first violation");
            break;
        }
    }
    report
}
