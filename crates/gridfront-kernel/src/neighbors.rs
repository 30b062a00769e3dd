//! Memoized orthogonal neighbor lookup.

use crate::grid::Grid;
use crate::types::CellId;
use once_cell::unsync::OnceCell;
use smallvec::SmallVec;

type Neighbors = SmallVec<[CellId; 4]>;

/// Lazily computed neighbor lists, one slot per cell.
///
/// Topology never changes for the lifetime of a grid, so each slot is
/// filled at most once.
#[derive(Debug)]
pub struct NeighborCache {
    rows: usize,
    cols: usize,
    slots: Vec<OnceCell<Neighbors>>,
}

impl NeighborCache {
    pub fn new(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            slots: (0..grid.len()).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Neighbors of `id` in the order left, right, up, down. Cells past the
    /// edge are omitted; there is no wraparound.
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.slots[id.index()].get_or_init(|| self.compute(id))
    }

    /// Number of cells whose neighbors have been computed.
    pub fn cached(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    fn compute(&self, id: CellId) -> Neighbors {
        let (row, col) = (id.index() / self.cols, id.index() % self.cols);
        let at = |r: usize, c: usize| CellId((r * self.cols + c) as u32);

        let mut out = Neighbors::new();
        if col > 0 {
            out.push(at(row, col - 1));
        }
        if col + 1 < self.cols {
            out.push(at(row, col + 1));
        }
        if row > 0 {
            out.push(at(row - 1, col));
        }
        if row + 1 < self.rows {
            out.push(at(row + 1, col));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(text: &str) -> (Grid, NeighborCache) {
        let grid = Grid::parse(text).unwrap();
        let cache = NeighborCache::new(&grid);
        (grid, cache)
    }

    #[test]
    fn center_has_four_in_order() {
        let (grid, cache) = cache("EEE\nEAE\nEEE");
        let center = grid.id_at(1, 1).unwrap();
        let expected: Vec<CellId> = [(1, 0), (1, 2), (0, 1), (2, 1)]
            .iter()
            .map(|&(r, c)| grid.id_at(r, c).unwrap())
            .collect();
        assert_eq!(cache.neighbors(center), expected.as_slice());
    }

    #[test]
    fn corners_and_edges_omit_out_of_bounds() {
        let (grid, cache) = cache("AEE\nEEE\nEEB");
        assert_eq!(
            cache.neighbors(grid.id_at(0, 0).unwrap()),
            &[grid.id_at(0, 1).unwrap(), grid.id_at(1, 0).unwrap()]
        );
        assert_eq!(
            cache.neighbors(grid.id_at(2, 2).unwrap()),
            &[grid.id_at(2, 1).unwrap(), grid.id_at(1, 2).unwrap()]
        );
        assert_eq!(cache.neighbors(grid.id_at(0, 1).unwrap()).len(), 3);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let (grid, cache) = cache("A");
        assert!(cache.neighbors(grid.start()).is_empty());
    }

    #[test]
    fn single_row_never_wraps() {
        let (grid, cache) = cache("AEB");
        let last = grid.id_at(0, 2).unwrap();
        assert_eq!(cache.neighbors(last), &[grid.id_at(0, 1).unwrap()]);
    }

    #[test]
    fn results_are_memoized() {
        let (grid, cache) = cache("AEB\nEEE");
        assert_eq!(cache.cached(), 0);
        let first = cache.neighbors(grid.start()).as_ptr();
        let second = cache.neighbors(grid.start()).as_ptr();
        assert_eq!(first, second);
        assert_eq!(cache.cached(), 1);
    }
}
