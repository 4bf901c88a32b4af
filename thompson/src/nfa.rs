use crate::graph::{StateGraph, StateId};
use crate::sim::{Simulator, Trace};
use log::trace;

/// A finished Thompson automaton: an immutable graph with one start and one accept state.
///
/// Matching only reads the graph, so one `Nfa` can be shared between threads, each run
/// owning its own [`Simulator`].
#[derive(Debug, Clone)]
pub struct Nfa {
    graph: StateGraph,
    start: StateId,
    accept: StateId,
}

impl Nfa {
    pub(crate) fn new(graph: StateGraph, start: StateId, accept: StateId) -> Self {
        Self {
            graph,
            start,
            accept,
        }
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn simulator(&self) -> Simulator<'_> {
        Simulator::new(self)
    }

    /// Whole-input match: the accept state must be active exactly at the end of `input`.
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut sim = self.simulator();
        for c in input {
            sim.feed(c);
            if sim.is_dead() {
                trace!("no active state left after '{}'", c);
                return false;
            }
        }
        sim.is_accepting()
    }

    pub fn accepts_str(&self, s: &str) -> bool {
        self.accepts(s.chars())
    }

    /// Byte length of the longest prefix of `s` the automaton accepts.
    pub fn longest_prefix(&self, s: &str) -> Option<usize> {
        let mut sim = self.simulator();
        let mut longest = sim.is_accepting().then_some(0);

        for (idx, c) in s.char_indices() {
            sim.feed(c);
            if sim.is_dead() {
                break;
            }
            if sim.is_accepting() {
                longest = Some(idx + c.len_utf8());
            }
        }
        longest
    }

    pub fn trace<I>(&self, input: I) -> Trace
    where
        I: IntoIterator<Item = char>,
    {
        Trace::record(self, input)
    }
}
