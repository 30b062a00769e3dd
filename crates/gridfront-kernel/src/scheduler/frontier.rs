//! Work queues of cells awaiting (re-)processing.
//!
//! Every frontier is a set: pushing a cell that is already pending is a
//! no-op. Pop order differs between implementations and is not part of the
//! solver's contract.

use crate::config::FrontierOrder;
use crate::types::CellId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// A membership-deduplicating worklist of cells.
pub trait Frontier {
    /// Schedule `id`. Returns false if it was already pending.
    fn push(&mut self, id: CellId) -> bool;

    /// Take the next cell to process.
    fn pop(&mut self) -> Option<CellId>;

    /// Number of pending cells.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the frontier for `order`, sized for a grid of `cells` cells.
pub fn frontier_for(order: FrontierOrder, cells: usize) -> Box<dyn Frontier> {
    match order {
        FrontierOrder::Fifo => Box::new(FifoFrontier::new(cells)),
        FrontierOrder::Lifo => Box::new(LifoFrontier::new(cells)),
        FrontierOrder::Shuffled { seed } => Box::new(ShuffledFrontier::new(cells, seed)),
    }
}

/// Pending flags indexed by cell.
#[derive(Debug, Clone)]
struct Pending(Vec<bool>);

impl Pending {
    fn new(cells: usize) -> Self {
        Self(vec![false; cells])
    }

    fn mark(&mut self, id: CellId) -> bool {
        let i = id.index();
        if i >= self.0.len() {
            self.0.resize(i + 1, false);
        }
        !std::mem::replace(&mut self.0[i], true)
    }

    fn clear(&mut self, id: CellId) {
        if let Some(flag) = self.0.get_mut(id.index()) {
            *flag = false;
        }
    }
}

/// Queue order: oldest pending cell first.
#[derive(Debug, Clone)]
pub struct FifoFrontier {
    queue: VecDeque<CellId>,
    pending: Pending,
}

impl FifoFrontier {
    pub fn new(cells: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(cells),
            pending: Pending::new(cells),
        }
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, id: CellId) -> bool {
        let fresh = self.pending.mark(id);
        if fresh {
            self.queue.push_back(id);
        }
        fresh
    }

    fn pop(&mut self) -> Option<CellId> {
        let id = self.queue.pop_front()?;
        self.pending.clear(id);
        Some(id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Stack order: most recently scheduled cell first.
#[derive(Debug, Clone)]
pub struct LifoFrontier {
    stack: Vec<CellId>,
    pending: Pending,
}

impl LifoFrontier {
    pub fn new(cells: usize) -> Self {
        Self {
            stack: Vec::with_capacity(cells),
            pending: Pending::new(cells),
        }
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, id: CellId) -> bool {
        let fresh = self.pending.mark(id);
        if fresh {
            self.stack.push(id);
        }
        fresh
    }

    fn pop(&mut self) -> Option<CellId> {
        let id = self.stack.pop()?;
        self.pending.clear(id);
        Some(id)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Seeded pseudo-random order. Same seed, same pops.
#[derive(Debug, Clone)]
pub struct ShuffledFrontier {
    cells: Vec<CellId>,
    pending: Pending,
    rng: StdRng,
}

impl ShuffledFrontier {
    pub fn new(cells: usize, seed: u64) -> Self {
        Self {
            cells: Vec::with_capacity(cells),
            pending: Pending::new(cells),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Frontier for ShuffledFrontier {
    fn push(&mut self, id: CellId) -> bool {
        let fresh = self.pending.mark(id);
        if fresh {
            self.cells.push(id);
        }
        fresh
    }

    fn pop(&mut self) -> Option<CellId> {
        if self.cells.is_empty() {
            return None;
        }
        let i = self.rng.gen_range(0..self.cells.len());
        let id = self.cells.swap_remove(i);
        self.pending.clear(id);
        Some(id)
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut dyn Frontier) -> Vec<u32> {
        std::iter::from_fn(|| frontier.pop()).map(|id| id.0).collect()
    }

    #[test]
    fn fifo_pops_in_queue_order_and_dedups() {
        let mut f = FifoFrontier::new(4);
        assert!(f.push(CellId(2)));
        assert!(f.push(CellId(0)));
        assert!(!f.push(CellId(2)));
        assert!(f.push(CellId(3)));
        assert_eq!(f.len(), 3);
        assert_eq!(drain(&mut f), vec![2, 0, 3]);
        assert!(f.is_empty());
    }

    #[test]
    fn lifo_pops_in_stack_order() {
        let mut f = LifoFrontier::new(4);
        for i in [1, 2, 3] {
            f.push(CellId(i));
        }
        assert!(!f.push(CellId(1)));
        assert_eq!(drain(&mut f), vec![3, 2, 1]);
    }

    #[test]
    fn popped_cells_can_be_rescheduled() {
        let mut f = FifoFrontier::new(2);
        f.push(CellId(1));
        assert_eq!(f.pop(), Some(CellId(1)));
        assert!(f.push(CellId(1)));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn shuffled_is_reproducible_per_seed() {
        let run = |seed| {
            let mut f = ShuffledFrontier::new(16, seed);
            for i in 0..16 {
                f.push(CellId(i));
            }
            drain(&mut f)
        };
        let a = run(7);
        assert_eq!(a, run(7));
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut f = LifoFrontier::new(1);
        assert!(f.push(CellId(10)));
        assert!(!f.push(CellId(10)));
        assert_eq!(f.pop(), Some(CellId(10)));
    }

    #[test]
    fn frontier_for_matches_order() {
        let mut f = frontier_for(FrontierOrder::Lifo, 3);
        f.push(CellId(0));
        f.push(CellId(1));
        assert_eq!(f.pop(), Some(CellId(1)));

        let mut f = frontier_for(FrontierOrder::Fifo, 3);
        f.push(CellId(0));
        f.push(CellId(1));
        assert_eq!(f.pop(), Some(CellId(0)));
    }
}
