use crate::error::{MalformedPatternError, MalformedPatternKind};
use crate::graph::{StateGraph, StateId, SymbolLabel};
use crate::nfa::Nfa;
use log::{debug, trace};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(char),
    Concat,
    Alternate,
    KleeneStar,
    Optional,
    LParen,
    RParen,
}

/// Single-entry, single-exit piece of an automaton under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

/// Thompson construction over a postfix token sequence.
///
/// Every operator pops already finished fragments, wires them with epsilon transitions and
/// pushes the combined fragment back, so a well-formed sequence leaves exactly one fragment.
pub struct Builder {
    graph: StateGraph,
    fragments: Vec<Fragment>,
}

impl Token {
    /// Number of fragments the token consumes from the stack.
    pub fn arity(&self) -> usize {
        match self {
            Token::Literal(_) | Token::LParen | Token::RParen => 0,
            Token::KleeneStar | Token::Optional => 1,
            Token::Concat | Token::Alternate => 2,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Token::KleeneStar | Token::Optional)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(self))
    }
}

impl From<&Token> for char {
    fn from(value: &Token) -> Self {
        match value {
            Token::Literal(c) => *c,
            Token::Concat => '&',
            Token::Alternate => '|',
            Token::KleeneStar => '*',
            Token::Optional => '?',
            Token::LParen => '(',
            Token::RParen => ')',
        }
    }
}

impl From<Token> for char {
    fn from(value: Token) -> Self {
        char::from(&value)
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            graph: StateGraph::new(),
            fragments: Vec::new(),
        }
    }

    /// Builder pre-sized for `token_count` tokens.
    pub fn with_capacity(token_count: usize) -> Self {
        Self {
            graph: StateGraph::with_capacity(token_count * 2),
            fragments: Vec::with_capacity(token_count),
        }
    }

    /// Consumes the whole sequence and returns the automaton, or the first error met.
    pub fn build<I>(tokens: I) -> Result<Nfa, MalformedPatternError>
    where
        I: IntoIterator<Item = Token>,
    {
        let tokens = tokens.into_iter();
        let mut builder = Self::with_capacity(tokens.size_hint().0);

        for (pos, token) in tokens.enumerate() {
            builder.push(token).map_err(|kind| {
                debug!("rejected token '{}' at position {}: {}", token, pos, kind);
                MalformedPatternError::new(kind, pos)
            })?;
        }

        builder.finish()
    }

    /// Applies one token to the fragment stack.
    pub fn push(&mut self, token: Token) -> Result<(), MalformedPatternKind> {
        trace!("token '{}', {} fragment(s) on stack", token, self.fragments.len());

        if self.fragments.len() < token.arity() {
            return Err(MalformedPatternKind::MissingOperand {
                operator: token,
                required: token.arity(),
                found: self.fragments.len(),
            });
        }

        let fragment = match token {
            Token::Literal(c) => self.literal(c)?,
            Token::Concat => {
                let (f, g) = self.pop_two(token)?;
                self.concat(f, g)?
            }
            Token::Alternate => {
                let (f, g) = self.pop_two(token)?;
                self.alternate(f, g)?
            }
            Token::KleeneStar => {
                let f = self.pop_one(token)?;
                self.kleene_star(f)?
            }
            Token::Optional => {
                let f = self.pop_one(token)?;
                self.optional(f)?
            }
            Token::LParen | Token::RParen => {
                return Err(MalformedPatternKind::UnexpectedGroup(token));
            }
        };

        self.fragments.push(fragment);
        Ok(())
    }

    /// Turns the single remaining fragment into the automaton's start/accept pair.
    pub fn finish(mut self) -> Result<Nfa, MalformedPatternError> {
        match self.fragments.len() {
            0 => Err(MalformedPatternError::new_general(
                MalformedPatternKind::EmptyPattern,
            )),
            1 => {
                let Fragment { entry, exit } = self.fragments.remove(0);
                debug!(
                    "built automaton with {} states and {} transitions",
                    self.graph.state_count(),
                    self.graph.transition_count()
                );
                Ok(Nfa::new(self.graph, entry, exit))
            }
            n => Err(MalformedPatternError::new_general(
                MalformedPatternKind::LeftoverFragments(n),
            )),
        }
    }

    fn pop_one(&mut self, operator: Token) -> Result<Fragment, MalformedPatternKind> {
        self.fragments
            .pop()
            .ok_or(MalformedPatternKind::MissingOperand {
                operator,
                required: 1,
                found: 0,
            })
    }

    // returns (f, g) where f was pushed first
    fn pop_two(&mut self, operator: Token) -> Result<(Fragment, Fragment), MalformedPatternKind> {
        let found = self.fragments.len();
        match (self.fragments.pop(), self.fragments.pop()) {
            (Some(g), Some(f)) => Ok((f, g)),
            _ => Err(MalformedPatternKind::MissingOperand {
                operator,
                required: 2,
                found,
            }),
        }
    }

    fn epsilon(&mut self, from: StateId, to: StateId) -> Result<(), MalformedPatternKind> {
        Ok(self.graph.add_transition(from, to, SymbolLabel::Epsilon)?)
    }

    fn new_fragment(&mut self) -> Fragment {
        Fragment {
            entry: self.graph.allocate_state(),
            exit: self.graph.allocate_state(),
        }
    }

    fn literal(&mut self, c: char) -> Result<Fragment, MalformedPatternKind> {
        let fragment = self.new_fragment();
        self.graph
            .add_transition(fragment.entry, fragment.exit, SymbolLabel::Symbol(c))?;
        Ok(fragment)
    }

    fn concat(&mut self, f: Fragment, g: Fragment) -> Result<Fragment, MalformedPatternKind> {
        self.epsilon(f.exit, g.entry)?;
        Ok(Fragment {
            entry: f.entry,
            exit: g.exit,
        })
    }

    fn alternate(&mut self, f: Fragment, g: Fragment) -> Result<Fragment, MalformedPatternKind> {
        let fragment = self.new_fragment();

        // fan out to both branches
        self.epsilon(fragment.entry, f.entry)?;
        self.epsilon(fragment.entry, g.entry)?;

        // and join them again
        self.epsilon(f.exit, fragment.exit)?;
        self.epsilon(g.exit, fragment.exit)?;
        Ok(fragment)
    }

    fn kleene_star(&mut self, f: Fragment) -> Result<Fragment, MalformedPatternKind> {
        let fragment = self.new_fragment();

        self.epsilon(fragment.entry, f.entry)?;
        self.epsilon(fragment.entry, fragment.exit)?;

        // loop back for another repetition
        self.epsilon(f.exit, f.entry)?;
        self.epsilon(f.exit, fragment.exit)?;
        Ok(fragment)
    }

    fn optional(&mut self, f: Fragment) -> Result<Fragment, MalformedPatternKind> {
        let fragment = self.new_fragment();

        self.epsilon(fragment.entry, f.entry)?;
        self.epsilon(fragment.entry, fragment.exit)?;
        self.epsilon(f.exit, fragment.exit)?;
        Ok(fragment)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
