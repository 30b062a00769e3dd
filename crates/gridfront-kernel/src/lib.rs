//! gridfront kernel
//!
//! Multi-criteria frontier search over cost grids. Every cell of a grid
//! charges a path some `health` and some `moves`; the solver finds, for
//! every cell, the complete set of Pareto-optimal paths from the Start cell.
//!
//! # Quick Start
//!
//! ```rust
//! use gridfront_kernel::prelude::*;
//!
//! let mut grid = Grid::parse("ASS\nELB\nEEE")?;
//! let report = Solver::new(SolverConfig::default())?.solve(&mut grid);
//! assert!(report.converged);
//!
//! let end = grid.end_cells().next().unwrap().id;
//! assert_eq!(
//!     grid.labels(end).front(),
//!     vec![Resources::new(200, 446), Resources::new(190, 450)]
//! );
//! # Ok::<(), gridfront_kernel::Error>(())
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Cell ids, cell kinds and their effects, resource pairs |
//! | [`grid`] | Grid topology, loader and per-cell label state |
//! | [`neighbors`] | Memoized orthogonal neighbor lookup |
//! | [`label`] | Path labels, Pareto sets and the merge operator |
//! | [`scheduler`] | Frontier queues and the fixpoint solver |
//! | [`render`] | Text grids, path visualization, reports |
//! | [`output`] | Serializable solution view |
//! | [`config`] | Solver configuration |
//! | [`test_harness`] | Randomised invariant checks |

pub mod config;
pub mod error;
pub mod grid;
pub mod label;
pub mod neighbors;
pub mod output;
pub mod render;
pub mod scheduler;
pub mod test_harness;
pub mod types;

pub use config::{FrontierOrder, SolverConfig};
pub use error::{ConfigError, Error, GridError};
pub use grid::{Cell, Grid};
pub use label::{Label, LabelSet};
pub use output::Solution;
pub use scheduler::{solve, SolveReport, Solver};
pub use types::{CellId, CellKind, Resources};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{FrontierOrder, SolverConfig};
    pub use crate::error::{ConfigError, Error, GridError};
    pub use crate::grid::{Cell, Grid};
    pub use crate::label::{Label, LabelSet};
    pub use crate::output::Solution;
    pub use crate::render::{render_grid, render_path, report};
    pub use crate::scheduler::{solve, Frontier, SolveReport, Solver};
    pub use crate::types::{CellId, CellKind, Resources};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
