use crate::error::InvalidStateError;
use std::fmt::{Display, Formatter};

/// Identifier of one automaton state. Ids are handed out densely by [`StateGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolLabel {
    Symbol(char),
    Epsilon,
}

/// Selects which outgoing transitions [`StateGraph::transitions_from`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFilter {
    All,
    Epsilon,
    Symbols,
    Symbol(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub destination: StateId,
    pub label: SymbolLabel,
}

/// Append-only arena of states and labeled transitions.
///
/// States are plain indices, transitions refer to them by [`StateId`], so the graph owns
/// everything by value and is dropped as a unit.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    transitions: Vec<Transition>,
    // outgoing[state] holds indices into `transitions`, in insertion order
    outgoing: Vec<Vec<usize>>,
}

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SymbolLabel {
    pub fn is_epsilon(&self) -> bool {
        *self == SymbolLabel::Epsilon
    }
}

impl Display for SymbolLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolLabel::Symbol(c) => write!(f, "{}", c),
            SymbolLabel::Epsilon => write!(f, "ε"),
        }
    }
}

impl LabelFilter {
    pub fn accepts(&self, label: SymbolLabel) -> bool {
        match (self, label) {
            (LabelFilter::All, _) => true,
            (LabelFilter::Epsilon, SymbolLabel::Epsilon) => true,
            (LabelFilter::Symbols, SymbolLabel::Symbol(_)) => true,
            (LabelFilter::Symbol(c), SymbolLabel::Symbol(symbol)) => *c == symbol,
            _ => false,
        }
    }
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the arena, e.g. from a token count: Thompson construction allocates at most
    /// two states per token.
    pub fn with_capacity(states: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(states * 2),
            outgoing: Vec::with_capacity(states),
        }
    }

    pub fn allocate_state(&mut self) -> StateId {
        self.outgoing.push(Vec::new());
        StateId(self.outgoing.len() - 1)
    }

    pub fn add_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        label: SymbolLabel,
    ) -> Result<(), InvalidStateError> {
        self.check_owned(source)?;
        self.check_owned(destination)?;

        self.outgoing[source.0].push(self.transitions.len());
        self.transitions.push(Transition {
            source,
            destination,
            label,
        });
        Ok(())
    }

    /// Outgoing transitions of `state` accepted by `filter`, in insertion order.
    ///
    /// An id that this graph never allocated simply has no transitions.
    pub fn transitions_from(
        &self,
        state: StateId,
        filter: LabelFilter,
    ) -> impl Iterator<Item = &Transition> + Clone + '_ {
        self.outgoing
            .get(state.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.transitions[idx])
            .filter(move |t| filter.accepts(t.label))
    }

    pub fn contains(&self, state: StateId) -> bool {
        state.0 < self.outgoing.len()
    }

    pub fn state_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.outgoing.len()).map(StateId)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn check_owned(&self, state: StateId) -> Result<(), InvalidStateError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(InvalidStateError {
                state,
                state_count: self.state_count(),
            })
        }
    }
}
