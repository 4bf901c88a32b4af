use crate::graph::StateId;
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Display, Formatter};

/// Set of automaton states with value semantics: equality ignores insertion order.
///
/// Grows on demand; callers that know the graph size can pre-size it with
/// [`StateSet::with_capacity`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StateSet {
    states: FxHashSet<StateId>,
}

impl StateSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns whether `id` was newly added.
    pub fn insert(&mut self, id: StateId) -> bool {
        self.states.insert(id)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains(&id)
    }

    pub fn union_with(&mut self, other: &StateSet) {
        self.states.extend(other.states.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Each contained id exactly once, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    fn sorted(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        self.states.extend(iter)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<std::collections::hash_set::Iter<'a, StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter().copied()
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.sorted()).finish()
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.sorted().iter().map(|id| id.to_string()).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}
