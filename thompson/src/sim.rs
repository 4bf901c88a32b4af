use crate::graph::{LabelFilter, StateGraph};
use crate::nfa::Nfa;
use crate::state_set::StateSet;
use log::trace;

/// All states reachable from `seed` through epsilon transitions only, `seed` included.
///
/// The result doubles as the visited marker, which is what stops the walk on epsilon cycles.
pub fn epsilon_closure(graph: &StateGraph, seed: &StateSet) -> StateSet {
    let mut reachable = StateSet::with_capacity(graph.state_count());
    let mut pending = Vec::with_capacity(seed.len());

    for state in seed {
        if reachable.insert(state) {
            pending.push(state);
        }
    }

    while let Some(cur) = pending.pop() {
        for t in graph.transitions_from(cur, LabelFilter::Epsilon) {
            if reachable.insert(t.destination) {
                pending.push(t.destination);
            }
        }
    }

    reachable
}

/// Follows every `symbol` transition out of `active`, then closes over epsilons.
pub fn step(graph: &StateGraph, active: &StateSet, symbol: char) -> StateSet {
    if active.is_empty() {
        return StateSet::empty();
    }

    let moved: StateSet = active
        .iter()
        .flat_map(|state| graph.transitions_from(state, LabelFilter::Symbol(symbol)))
        .map(|t| t.destination)
        .collect();

    epsilon_closure(graph, &moved)
}

/// Incremental run of an automaton; owns its active set, borrows the graph.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    nfa: &'a Nfa,
    active: StateSet,
}

impl<'a> Simulator<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        let start: StateSet = std::iter::once(nfa.start()).collect();
        Self {
            nfa,
            active: epsilon_closure(nfa.graph(), &start),
        }
    }

    pub fn feed(&mut self, symbol: char) {
        self.active = step(self.nfa.graph(), &self.active, symbol);
        trace!("after '{}': {} active state(s)", symbol, self.active.len());
    }

    pub fn active(&self) -> &StateSet {
        &self.active
    }

    pub fn is_accepting(&self) -> bool {
        self.active.contains(self.nfa.accept())
    }

    /// No input can lead to acceptance any more.
    pub fn is_dead(&self) -> bool {
        self.active.is_empty()
    }
}

/// Active state sets of one run: the initial closure, then one set per consumed symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<StateSet>,
    consumed: usize,
}

impl Trace {
    pub(crate) fn record<I>(nfa: &Nfa, input: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut sim = Simulator::new(nfa);
        let mut steps = vec![sim.active().clone()];

        for c in input {
            if sim.is_dead() {
                break;
            }
            sim.feed(c);
            steps.push(sim.active().clone());
        }

        Self {
            consumed: steps.len() - 1,
            steps,
        }
    }

    pub fn steps(&self) -> &[StateSet] {
        &self.steps
    }

    /// Symbols consumed before the run ended or died.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// First `(earlier, later)` pair of step indices whose active sets are equal.
    pub fn first_repeat(&self) -> Option<(usize, usize)> {
        self.steps.iter().enumerate().skip(1).find_map(|(later, set)| {
            self.steps[..later]
                .iter()
                .position(|seen| seen == set)
                .map(|earlier| (earlier, later))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Builder, Token, Token::*};
    use rstest::rstest;

    fn nfa(tokens: &[Token]) -> Nfa {
        Builder::build(tokens.iter().copied()).unwrap()
    }

    fn a_bc_star() -> Nfa {
        // a(b|c)*
        nfa(&[Literal('a'), Literal('b'), Literal('c'), Alternate, KleeneStar, Concat])
    }

    mod epsilon_closure {
        use super::*;

        #[test]
        fn should_include_seed() {
            // given
            let nfa = nfa(&[Literal('a')]);
            let seed: StateSet = [nfa.start()].into_iter().collect();

            // when
            let closure = super::super::epsilon_closure(nfa.graph(), &seed);

            // then
            assert_eq!(closure, seed);
        }

        #[test]
        fn should_terminate_on_epsilon_cycle() {
            // given
            let nfa = nfa(&[Literal('a'), KleeneStar, KleeneStar]);
            let seed: StateSet = nfa.graph().states().collect();

            // when
            let closure = super::super::epsilon_closure(nfa.graph(), &seed);

            // then
            assert_eq!(closure.len(), nfa.graph().state_count());
        }

        #[test]
        fn should_be_idempotent() {
            // given
            let nfa = a_bc_star();
            for state in nfa.graph().states() {
                let seed: StateSet = [state].into_iter().collect();

                // when
                let once = super::super::epsilon_closure(nfa.graph(), &seed);
                let twice = super::super::epsilon_closure(nfa.graph(), &once);

                // then
                assert_eq!(once, twice);
            }
        }

        #[test]
        fn star_closure_should_reach_accept_from_start() {
            // given
            let nfa = nfa(&[Literal('a'), KleeneStar]);
            let seed: StateSet = [nfa.start()].into_iter().collect();

            // when
            let closure = super::super::epsilon_closure(nfa.graph(), &seed);

            // then
            assert!(closure.contains(nfa.accept()));
            assert_eq!(closure.len(), 3);
        }
    }

    mod step {
        use super::*;

        #[test]
        fn should_stay_dead_once_empty() {
            // given
            let nfa = a_bc_star();
            let dead = StateSet::empty();

            // when && then
            for c in ['a', 'b', 'c', 'z'] {
                assert!(super::super::step(nfa.graph(), &dead, c).is_empty());
            }
        }

        #[test]
        fn should_die_on_unmatched_symbol() {
            // given
            let nfa = a_bc_star();
            let mut sim = Simulator::new(&nfa);

            // when
            sim.feed('d');

            // then
            assert!(sim.is_dead());
            assert!(!sim.is_accepting());
            sim.feed('a');
            assert!(sim.is_dead());
        }
    }

    mod simulator {
        use super::*;

        #[test]
        fn should_accept_after_each_valid_prefix() {
            // given
            let nfa = a_bc_star();
            let mut sim = Simulator::new(&nfa);
            assert!(!sim.is_accepting());

            // when && then
            for c in "acbc".chars() {
                sim.feed(c);
                assert!(sim.is_accepting());
            }
        }

        #[rstest]
        #[case("a", true)]
        #[case("ab", true)]
        #[case("acbc", true)]
        #[case("", false)]
        #[case("b", false)]
        #[case("ad", false)]
        fn should_decide_end_to_end_scenario(#[case] input: &str, #[case] expected: bool) {
            // given
            let nfa = a_bc_star();

            // when
            let accepted = nfa.accepts(input.chars());

            // then
            assert_eq!(accepted, expected);
        }
    }

    mod trace {
        use super::*;

        #[test]
        fn should_record_initial_closure_and_each_step() {
            // given
            let nfa = a_bc_star();

            // when
            let trace = nfa.trace("abc".chars());

            // then
            assert_eq!(trace.steps().len(), 4);
            assert_eq!(trace.consumed(), 3);
            assert!(trace.steps()[3].contains(nfa.accept()));
        }

        #[test]
        fn should_stop_after_dying() {
            // given
            let nfa = a_bc_star();

            // when
            let trace = nfa.trace("xabc".chars());

            // then
            assert_eq!(trace.consumed(), 1);
            assert!(trace.steps()[1].is_empty());
        }

        #[test]
        fn should_find_repeated_configuration() {
            // given
            let nfa = a_bc_star();

            // when
            let trace = nfa.trace("abb".chars());

            // then: a second 'b' lands in the configuration the first one reached
            assert_eq!(trace.first_repeat(), Some((2, 3)));
        }

        #[test]
        fn should_report_no_repeat_for_distinct_configurations() {
            // given
            let nfa = nfa(&[Literal('a'), Literal('b'), Concat]);

            // when
            let trace = nfa.trace("ab".chars());

            // then
            assert_eq!(trace.first_repeat(), None);
        }
    }
}
