//! Core value types shared by every layer of the search.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense cell identifier, `row * width + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a grid cell is. The symbol table is closed: every symbol maps to
/// exactly one kind and everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Start,
    End,
    Blank,
    Speeder,
    Lava,
    Mud,
}

impl CellKind {
    pub const ALL: [CellKind; 6] = [
        CellKind::Start,
        CellKind::End,
        CellKind::Blank,
        CellKind::Speeder,
        CellKind::Lava,
        CellKind::Mud,
    ];

    /// Look up a grid symbol. `row`/`col` are only used for the error.
    pub fn from_symbol(symbol: char, row: usize, col: usize) -> Result<Self, GridError> {
        match symbol {
            'A' => Ok(CellKind::Start),
            'B' => Ok(CellKind::End),
            'E' => Ok(CellKind::Blank),
            'S' => Ok(CellKind::Speeder),
            'L' => Ok(CellKind::Lava),
            'M' => Ok(CellKind::Mud),
            other => Err(GridError::UnknownSymbol {
                row,
                col,
                symbol: other,
            }),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellKind::Start => 'A',
            CellKind::End => 'B',
            CellKind::Blank => 'E',
            CellKind::Speeder => 'S',
            CellKind::Lava => 'L',
            CellKind::Mud => 'M',
        }
    }

    /// Resource change applied when a path enters a cell of this kind.
    pub fn effect(self) -> Resources {
        match self {
            CellKind::Start | CellKind::End => Resources::new(0, 0),
            CellKind::Blank => Resources::new(0, -1),
            CellKind::Speeder => Resources::new(-5, 0),
            CellKind::Lava => Resources::new(-50, -10),
            CellKind::Mud => Resources::new(-10, -5),
        }
    }

    /// Start and End cells are never overdrawn by path visualization.
    pub fn is_terminal(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A `(health, moves)` pair. Used both as a running total and as a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Resources {
    pub health: i32,
    pub moves: i32,
}

impl Resources {
    #[inline]
    pub const fn new(health: i32, moves: i32) -> Self {
        Self { health, moves }
    }

    /// Both resources strictly positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.health > 0 && self.moves > 0
    }

    #[inline]
    pub fn apply(self, delta: Resources) -> Resources {
        Resources::new(self.health + delta.health, self.moves + delta.moves)
    }

    /// Standard 2-D Pareto order: at least as good in both, strictly better in one.
    #[inline]
    pub fn dominates(self, other: Resources) -> bool {
        self.health >= other.health
            && self.moves >= other.moves
            && (self.health > other.health || self.moves > other.moves)
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Health={}, Moves={}", self.health, self.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_table_round_trips() {
        for kind in CellKind::ALL {
            assert_eq!(CellKind::from_symbol(kind.symbol(), 0, 0).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_symbol_is_rejected_with_position() {
        let err = CellKind::from_symbol('X', 2, 3).unwrap_err();
        assert!(matches!(
            err,
            GridError::UnknownSymbol {
                row: 2,
                col: 3,
                symbol: 'X'
            }
        ));
    }

    #[test]
    fn effects_match_table() {
        assert_eq!(CellKind::Start.effect(), Resources::new(0, 0));
        assert_eq!(CellKind::End.effect(), Resources::new(0, 0));
        assert_eq!(CellKind::Blank.effect(), Resources::new(0, -1));
        assert_eq!(CellKind::Speeder.effect(), Resources::new(-5, 0));
        assert_eq!(CellKind::Lava.effect(), Resources::new(-50, -10));
        assert_eq!(CellKind::Mud.effect(), Resources::new(-10, -5));
    }

    #[test]
    fn no_effect_ever_increases_a_resource() {
        for kind in CellKind::ALL {
            let e = kind.effect();
            assert!(e.health <= 0 && e.moves <= 0, "{kind} gains resources");
        }
    }

    #[test]
    fn dominance_is_strict() {
        let a = Resources::new(200, 450);
        assert!(!a.dominates(a));
        assert!(a.dominates(Resources::new(200, 449)));
        assert!(a.dominates(Resources::new(199, 450)));
        assert!(!Resources::new(200, 440).dominates(Resources::new(190, 450)));
        assert!(!Resources::new(190, 450).dominates(Resources::new(200, 440)));
    }

    #[test]
    fn validity_requires_both_positive() {
        assert!(Resources::new(1, 1).is_valid());
        assert!(!Resources::new(0, 10).is_valid());
        assert!(!Resources::new(10, 0).is_valid());
        assert!(!Resources::new(-5, 10).is_valid());
    }
}
