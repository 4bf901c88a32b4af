use crate::builder::Token;
use crate::graph::StateId;
use thiserror::Error;

/// A transition referenced a state the graph never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("state {state} does not belong to this graph ({state_count} states allocated)")]
pub struct InvalidStateError {
    pub state: StateId,
    pub state_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedPatternKind {
    #[error("operator '{operator}' needs {required} operand(s), found {found}")]
    MissingOperand {
        operator: Token,
        required: usize,
        found: usize,
    },
    #[error("{0} fragments left after the last token, expected exactly one")]
    LeftoverFragments(usize),
    #[error("empty token sequence")]
    EmptyPattern,
    #[error("grouping token '{0}' cannot appear in postfix input")]
    UnexpectedGroup(Token),
    #[error("internal error: {0}")]
    Internal(#[from] InvalidStateError),
}

/// The postfix token sequence could not be reduced to a single automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedPatternError {
    kind: MalformedPatternKind,
    position: Option<usize>,
}

impl MalformedPatternError {
    pub fn new(kind: MalformedPatternKind, position: usize) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }

    pub fn new_general(kind: MalformedPatternKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn kind(&self) -> &MalformedPatternKind {
        &self.kind
    }

    /// Index of the offending token in the postfix sequence, when there is one.
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl std::fmt::Display for MalformedPatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "malformed pattern at token {}: {}", pos, self.kind),
            None => write!(f, "malformed pattern: {}", self.kind),
        }
    }
}

impl std::error::Error for MalformedPatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            MalformedPatternKind::Internal(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("empty expression")]
    EmptyExpression,
    #[error("escape character at the end of the pattern")]
    TrailingEscape,
    #[error("'{0}' is missing an operand")]
    MissingOperand(char),
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("'{0}' follows a token that cannot be quantified")]
    NotQuantifiable(char),
}

/// Error raised while turning pattern text into a postfix token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {kind}")]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    position: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Char index into the pattern text.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    MalformedPattern(#[from] MalformedPatternError),
}
