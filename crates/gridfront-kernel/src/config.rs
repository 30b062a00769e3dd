//! Solver configuration.
//!
//! Loaded from an optional TOML file; every field has a default so a file
//! only needs the values it overrides:
//!
//! ```toml
//! starting_health = 200
//! max_moves = 450
//! max_pops = 1_000_000
//!
//! [order]
//! kind = "shuffled"
//! seed = 7
//! ```

use crate::error::ConfigError;
use crate::types::Resources;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default health a path starts with.
pub const DEFAULT_STARTING_HEALTH: i32 = 200;
/// Default moves a path starts with.
pub const DEFAULT_MAX_MOVES: i32 = 450;

/// Order in which the frontier hands out cells. The final fronts do not
/// depend on it; it only changes how much work is done to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FrontierOrder {
    #[default]
    Fifo,
    Lifo,
    Shuffled {
        #[serde(default)]
        seed: u64,
    },
}

impl FromStr for FrontierOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(FrontierOrder::Fifo),
            "lifo" => Ok(FrontierOrder::Lifo),
            "shuffled" => Ok(FrontierOrder::Shuffled { seed: 0 }),
            _ => Err(ConfigError::UnknownOrder(s.to_string())),
        }
    }
}

/// Configuration for one solver run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Health of the seed label on the Start cell
    pub starting_health: i32,
    /// Moves of the seed label on the Start cell
    pub max_moves: i32,
    /// Frontier processing order
    pub order: FrontierOrder,
    /// Stop after this many frontier pops; `None` runs to fixpoint
    pub max_pops: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            starting_health: DEFAULT_STARTING_HEALTH,
            max_moves: DEFAULT_MAX_MOVES,
            order: FrontierOrder::Fifo,
            max_pops: None,
        }
    }
}

impl SolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML config file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SolverConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_moves(mut self, moves: i32) -> Self {
        self.max_moves = moves;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: FrontierOrder) -> Self {
        self.order = order;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_pops(mut self, max_pops: Option<u64>) -> Self {
        self.max_pops = max_pops;
        self
    }

    /// Resources of the seed label.
    #[inline]
    pub fn budget(&self) -> Resources {
        Resources::new(self.starting_health, self.max_moves)
    }

    /// Reject budgets that could never produce a valid label.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health <= 0 {
            return Err(ConfigError::NonPositive {
                field: "starting_health",
                value: i64::from(self.starting_health),
            });
        }
        if self.max_moves <= 0 {
            return Err(ConfigError::NonPositive {
                field: "max_moves",
                value: i64::from(self.max_moves),
            });
        }
        Ok(())
    }
}
