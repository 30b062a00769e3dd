use super::Grid;
use crate::error::GridError;
use crate::types::CellKind;
use std::path::Path;
use std::str::FromStr;

impl Grid {
    /// Parse a grid from text, one row per line.
    ///
    /// Lines are trimmed and blank lines skipped. Whitespace inside a line
    /// is ignored so rendered grids (`A S S`) load back unchanged. Any
    /// other character must be one of `A B E S L M`.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let r = rows.len();
            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .enumerate()
                .map(|(c, ch)| CellKind::from_symbol(ch, r, c))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Read and parse a grid file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| GridError::io_error(path, source))?;
        Self::parse(&text)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
