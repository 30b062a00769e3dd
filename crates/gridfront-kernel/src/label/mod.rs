//! Path labels and the per-cell Pareto sets that hold them.
//!
//! A [`Label`] is one candidate path: its remaining `(health, moves)` and
//! the ordered cells it visited. Histories are persistent vectors, so
//! advancing a label shares the prefix with its parent instead of copying
//! it. Label identity is the history alone; the resources are a function of
//! it.

mod merge;

pub use merge::{merge, should_propagate};

use crate::grid::Cell;
use crate::types::{CellId, Resources};
use indexmap::IndexSet;
use std::hash::{Hash, Hasher};

/// Ordered cell history, shared between labels that extend the same prefix.
pub type History = im::Vector<CellId>;

/// A candidate path ending at `self.cell()`.
#[derive(Debug, Clone)]
pub struct Label {
    resources: Resources,
    at: CellId,
    history: History,
}

impl Label {
    /// The seed label of a run: `budget` on the Start cell.
    pub fn origin(start: CellId, budget: Resources) -> Self {
        Self {
            resources: budget,
            at: start,
            history: im::vector![start],
        }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.resources.health
    }

    #[inline]
    pub fn moves(&self) -> i32 {
        self.resources.moves
    }

    #[inline]
    pub fn resources(&self) -> Resources {
        self.resources
    }

    /// The cell this label currently resides on.
    #[inline]
    pub fn cell(&self) -> CellId {
        self.at
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of cells in the history, Start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.resources.is_valid()
    }

    #[inline]
    pub fn dominates(&self, other: &Label) -> bool {
        self.resources.dominates(other.resources)
    }

    /// Resources after entering `cell`, without building the new history.
    #[inline]
    pub fn advanced_resources(&self, cell: &Cell) -> Resources {
        self.resources.apply(cell.effect())
    }

    /// A new label one step further: `cell`'s deltas applied and `cell`
    /// appended to the history. `self` is untouched.
    pub fn advance(&self, cell: &Cell) -> Label {
        let mut history = self.history.clone();
        history.push_back(cell.id);
        Label {
            resources: self.advanced_resources(cell),
            at: cell.id,
            history,
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.history == other.history
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.history.hash(state);
    }
}

/// The labels held by one cell.
///
/// Compared as a set: two `LabelSet`s are equal when they hold the same
/// histories, whatever the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(IndexSet<Label>);

impl LabelSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    #[inline]
    pub fn contains(&self, label: &Label) -> bool {
        self.0.contains(label)
    }

    /// Whether `candidate` is strictly dominated by some member.
    pub fn dominates(&self, candidate: Resources) -> bool {
        self.0.iter().any(|l| l.resources.dominates(candidate))
    }

    /// Resource pairs of every label, sorted by health then moves (descending).
    pub fn front(&self) -> Vec<Resources> {
        let mut pairs: Vec<Resources> = self.0.iter().map(Label::resources).collect();
        pairs.sort_unstable_by(|a, b| b.cmp(a));
        pairs
    }

    /// Labels sorted like [`LabelSet::front`].
    pub fn sorted(&self) -> Vec<&Label> {
        let mut labels: Vec<&Label> = self.0.iter().collect();
        labels.sort_by(|a, b| b.resources.cmp(&a.resources).then(a.len().cmp(&b.len())));
        labels
    }

    /// No member dominates another.
    pub fn is_dominance_free(&self) -> bool {
        self.0
            .iter()
            .all(|a| self.0.iter().all(|b| !a.dominates(b)))
    }
}

impl FromIterator<Label> for LabelSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = indexmap::set::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
