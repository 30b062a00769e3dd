//! Error types for the grid search
//!
//! All failure handling happens before the search runs:
//! - Grid loading (shape, symbols, Start cell)
//! - Solver configuration
//!
//! An End cell without a valid path is not an error; it has an empty front.

use std::path::PathBuf;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Grid could not be loaded
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    /// Solver configuration rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report rendering failed
    #[error("render failed: {0}")]
    Render(#[from] std::fmt::Error),

    /// JSON encoding failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a report failed
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the caller supplied bad input (as opposed to an internal failure).
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::Grid(GridError::Io { .. }) => false,
            Self::Grid(_) => true,
            Self::Config(ConfigError::Read { .. }) => false,
            Self::Config(_) => true,
            Self::Render(_) | Self::Json(_) | Self::Io { .. } => false,
        }
    }
}

/// Grid loading errors
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// No non-blank rows
    #[error("grid is empty")]
    Empty,

    /// Row length differs from the first row
    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Character outside the symbol table
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    /// No `A` cell
    #[error("grid has no start cell")]
    MissingStart,

    /// More than one `A` cell
    #[error("grid has more than one start cell: ({}, {}) and ({}, {})", first.0, first.1, second.0, second.1)]
    MultipleStarts {
        first: (usize, usize),
        second: (usize, usize),
    },

    /// Grid file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GridError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Solver configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Starting resources must be positive or no label is ever valid
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::SolverConfig`]
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Frontier order name not recognised
    #[error("unknown frontier order: '{0}' (expected fifo, lifo or shuffled)")]
    UnknownOrder(String),
}

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;
