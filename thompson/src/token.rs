use crate::builder::Token;
use crate::error::{SyntaxError, SyntaxErrorKind};

/// Infix pattern tokens, each paired with the char index it starts at.
///
/// Concatenation is implicit in infix text, so the sequence never holds [`Token::Concat`].
#[derive(Clone, Debug)]
pub(crate) struct TokenSequence {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    // char length of the source pattern, used as the position of end-of-input errors
    end: usize,
}

impl TokenSequence {
    pub fn end_position(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn next_enumerated(&mut self) -> Option<(usize, Token)> {
        let item = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(item)
    }

    #[cfg(test)]
    pub fn collect(&mut self) -> Vec<Token> {
        let mut res = Vec::new();
        while let Some((_, tok)) = self.next_enumerated() {
            res.push(tok);
        }
        res
    }
}

impl TryFrom<&str> for TokenSequence {
    type Error = SyntaxError;

    fn try_from(pattern: &str) -> Result<Self, Self::Error> {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut pattern_iter = pattern.chars().enumerate();
        let mut end = 0;

        while let Some((pos, cur)) = pattern_iter.next() {
            end = pos + 1;
            if cur == '\\' {
                match pattern_iter.next() {
                    // the escape keeps the backslash position for error reporting
                    Some((escaped_pos, escaped)) => {
                        end = escaped_pos + 1;
                        tokens.push((pos, Token::Literal(escaped)));
                    }
                    None => return Err(SyntaxError::new(SyntaxErrorKind::TrailingEscape, pos)),
                }
            } else {
                tokens.push((pos, infix_token(cur)));
            }
        }

        Ok(TokenSequence {
            tokens,
            pos: 0,
            end,
        })
    }
}

fn infix_token(c: char) -> Token {
    match c {
        '|' => Token::Alternate,
        '*' => Token::KleeneStar,
        '?' => Token::Optional,
        '(' => Token::LParen,
        ')' => Token::RParen,
        _ => Token::Literal(c),
    }
}
