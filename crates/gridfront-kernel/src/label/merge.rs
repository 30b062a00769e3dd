//! Folding advanced labels into a neighbor's Pareto set.

use super::{Label, LabelSet};
use crate::grid::Cell;
use crate::types::Resources;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

/// True iff some label in `from`, advanced onto `to_cell`, is valid and
/// not dominated by anything already in `to`. Vacuously true for an empty
/// `to` as long as one advanced label is valid.
pub fn should_propagate(from: &LabelSet, to_cell: &Cell, to: &LabelSet) -> bool {
    from.iter().any(|label| {
        let next = label.advanced_resources(to_cell);
        next.is_valid() && !to.dominates(next)
    })
}

/// Merge `from`'s labels, advanced onto `to_cell`, into `to`.
///
/// Old labels dominated by a candidate are dropped, candidates dominated by
/// a surviving old label are discarded, and for every `(health, moves)` pair
/// only the shortest history is kept. Ties keep the first one seen, old
/// labels before candidates. Returns whether `to` changed as a set.
pub fn merge(from: &LabelSet, to_cell: &Cell, to: &mut LabelSet) -> bool {
    let candidates: Vec<Label> = from
        .iter()
        .map(|label| label.advance(to_cell))
        .filter(Label::is_valid)
        .collect();

    let survivors: Vec<&Label> = to
        .iter()
        .filter(|old| !candidates.iter().any(|c| c.dominates(old)))
        .collect();
    let admitted: Vec<&Label> = candidates
        .iter()
        .filter(|c| !survivors.iter().any(|s| s.dominates(c)))
        .collect();

    let union: IndexSet<&Label> = survivors.into_iter().chain(admitted).collect();

    let mut shortest: IndexMap<Resources, &Label> = IndexMap::with_capacity(union.len());
    for label in union {
        match shortest.entry(label.resources()) {
            Entry::Vacant(slot) => {
                slot.insert(label);
            }
            Entry::Occupied(mut slot) => {
                if label.len() < slot.get().len() {
                    slot.insert(label);
                }
            }
        }
    }

    let merged: LabelSet = shortest.into_values().cloned().collect();
    if merged == *to {
        return false;
    }
    *to = merged;
    true
}
