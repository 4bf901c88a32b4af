//! Thompson NFA construction and simulation.
//!
//! Patterns are turned into postfix token sequences ([`postfix`]), assembled into an
//! automaton by the [`Builder`] and matched by epsilon-closure subset stepping ([`sim`]).

pub use builder::{Builder, Fragment, Token};
pub use error::{
    Error, InvalidStateError, MalformedPatternError, MalformedPatternKind, SyntaxError,
    SyntaxErrorKind,
};
pub use graph::{LabelFilter, StateGraph, StateId, SymbolLabel, Transition};
pub use nfa::Nfa;
pub use sim::{Simulator, Trace};
pub use state_set::StateSet;

pub mod builder;
mod dot;
pub mod error;
pub mod graph;
mod nfa;
pub mod postfix;
pub mod sim;
mod state_set;
mod token;


#[derive(Debug, Clone)]
pub struct Regex {
    nfa: Nfa,
}

impl Regex {
    /// Compiles infix pattern syntax: literals, `|`, `*`, `?`, parentheses and `\` escapes.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let tokens = postfix::to_postfix(pattern)?;
        Ok(Self::from_postfix(tokens)?)
    }

    pub fn from_postfix<I>(tokens: I) -> Result<Self, MalformedPatternError>
    where
        I: IntoIterator<Item = Token>,
    {
        let nfa = Builder::build(tokens)?;
        Ok(Self { nfa })
    }

    pub fn is_exact_match(&self, s: &str) -> bool {
        self.nfa.accepts_str(s)
    }

    /// Longest prefix of `s` in the pattern's language, anchored at the start of `s`.
    pub fn longest_prefix<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.nfa.longest_prefix(s).map(|len| &s[..len])
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }
}
