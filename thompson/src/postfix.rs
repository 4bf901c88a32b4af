//! Pattern text front end: infix syntax to the postfix token order the [`Builder`] consumes.
//!
//! [`Builder`]: crate::builder::Builder

use crate::builder::Token;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::token::TokenSequence;

/// Converts an infix pattern (`ab|c*`, `a(b|c)?`, `\*`) into postfix order with explicit
/// concatenation.
///
/// `*` and `?` bind tightest, then concatenation, then `|`; binary operators associate to
/// the left.
pub fn to_postfix(pattern: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut seq = TokenSequence::try_from(pattern)?;
    if seq.is_empty() {
        return Err(SyntaxError::new(SyntaxErrorKind::EmptyExpression, 0));
    }

    let mut converter = Converter::default();
    while let Some((pos, token)) = seq.next_enumerated() {
        converter.push(pos, token)?;
    }
    converter.finish(seq.end_position())
}

/// Reads postfix notation as printed by [`render`]: `&` concatenates, `|`, `*` and `?` are
/// the other operators and `\` escapes a literal.
pub fn parse_postfix(notation: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::with_capacity(notation.len());
    let mut chars = notation.chars().enumerate();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => Token::Literal(escaped),
                None => return Err(SyntaxError::new(SyntaxErrorKind::TrailingEscape, pos)),
            },
            '&' => Token::Concat,
            '|' => Token::Alternate,
            '*' => Token::KleeneStar,
            '?' => Token::Optional,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => Token::Literal(c),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Prints tokens in postfix notation, escaping literals that look like operators.
pub fn render(tokens: &[Token]) -> String {
    let mut res = String::with_capacity(tokens.len());
    for token in tokens {
        if let Token::Literal(c) = token {
            if matches!(c, '&' | '|' | '*' | '?' | '(' | ')' | '\\') {
                res.push('\\');
            }
        }
        res.push(char::from(token));
    }
    res
}

#[derive(Default)]
struct Converter {
    output: Vec<Token>,
    operators: Vec<(usize, Token)>,
    last: Option<Token>,
}

impl Converter {
    fn precedence(token: Token) -> u8 {
        match token {
            Token::Concat => 2,
            Token::Alternate => 1,
            _ => 0,
        }
    }

    /// Whether the previous token closed an operand, so a following operand concatenates.
    fn ends_operand(&self) -> bool {
        matches!(
            self.last,
            Some(Token::Literal(_) | Token::RParen | Token::KleeneStar | Token::Optional)
        )
    }

    fn push(&mut self, pos: usize, token: Token) -> Result<(), SyntaxError> {
        match token {
            Token::Literal(_) => {
                if self.ends_operand() {
                    self.push_operator(pos, Token::Concat);
                }
                self.output.push(token);
            }
            Token::LParen => {
                if self.ends_operand() {
                    self.push_operator(pos, Token::Concat);
                }
                self.operators.push((pos, token));
            }
            Token::RParen => {
                if !self.ends_operand() {
                    let kind = match self.last {
                        Some(Token::LParen) => SyntaxErrorKind::EmptyExpression,
                        Some(Token::Alternate) => SyntaxErrorKind::MissingOperand('|'),
                        _ => SyntaxErrorKind::UnbalancedParenthesis,
                    };
                    return Err(SyntaxError::new(kind, pos));
                }
                self.close_group(pos)?;
            }
            Token::KleeneStar | Token::Optional => {
                if self.last.is_some_and(|t| t.is_quantifier()) {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::NotQuantifiable(char::from(token)),
                        pos,
                    ));
                }
                if !self.ends_operand() {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::MissingOperand(char::from(token)),
                        pos,
                    ));
                }
                // postfix unary operators apply to the operand just completed
                self.output.push(token);
            }
            Token::Alternate | Token::Concat => {
                if !self.ends_operand() {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::MissingOperand(char::from(token)),
                        pos,
                    ));
                }
                self.push_operator(pos, token);
            }
        }
        self.last = Some(token);
        Ok(())
    }

    fn push_operator(&mut self, pos: usize, token: Token) {
        while let Some(&(_, top)) = self.operators.last() {
            if top == Token::LParen || Self::precedence(top) < Self::precedence(token) {
                break;
            }
            self.output.push(top);
            self.operators.pop();
        }
        self.operators.push((pos, token));
    }

    fn close_group(&mut self, pos: usize) -> Result<(), SyntaxError> {
        while let Some((_, top)) = self.operators.pop() {
            if top == Token::LParen {
                return Ok(());
            }
            self.output.push(top);
        }
        Err(SyntaxError::new(
            SyntaxErrorKind::UnbalancedParenthesis,
            pos,
        ))
    }

    fn finish(mut self, end: usize) -> Result<Vec<Token>, SyntaxError> {
        if let Some(Token::Alternate) = self.last {
            return Err(SyntaxError::new(SyntaxErrorKind::MissingOperand('|'), end));
        }

        while let Some((pos, top)) = self.operators.pop() {
            if top == Token::LParen {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnbalancedParenthesis,
                    pos,
                ));
            }
            self.output.push(top);
        }
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use Token::*;

    mod to_postfix {
        use super::*;

        #[test]
        fn should_insert_explicit_concatenation() {
            // given
            let pattern = "a(b|c)*";

            // when
            let res = super::super::to_postfix(pattern).unwrap();

            // then
            assert_eq!(
                res,
                vec![Literal('a'), Literal('b'), Literal('c'), Alternate, KleeneStar, Concat]
            );
        }

        #[rstest]
        #[case("a", "a")]
        #[case("ab", "ab&")]
        #[case("abc", "ab&c&")]
        #[case("ab|c", "ab&c|")]
        #[case("a|bc", "abc&|")]
        #[case("a|b|c", "ab|c|")]
        #[case("ab*", "ab*&")]
        #[case("(ab)*", "ab&*")]
        #[case("a?b", "a?b&")]
        #[case("(a|b)(c|d)", "ab|cd|&")]
        #[case("((a))", "a")]
        #[case(r"a\*", r"a\*&")]
        #[case("a&b", r"a\&&b&")]
        fn should_respect_precedence(#[case] pattern: &str, #[case] expected: &str) {
            // when
            let res = super::super::to_postfix(pattern).unwrap();

            // then
            assert_eq!(render(&res), expected);
        }

        #[test]
        fn should_render_end_to_end_pattern() {
            let res = super::super::to_postfix("a(b|c)*d?").unwrap();
            insta::assert_snapshot!(render(&res), @"abc|*&d?&");
        }

        #[rstest]
        #[case("", SyntaxErrorKind::EmptyExpression, 0)]
        #[case("()", SyntaxErrorKind::EmptyExpression, 1)]
        #[case("*a", SyntaxErrorKind::MissingOperand('*'), 0)]
        #[case("a|*", SyntaxErrorKind::MissingOperand('*'), 2)]
        #[case("|a", SyntaxErrorKind::MissingOperand('|'), 0)]
        #[case("a||b", SyntaxErrorKind::MissingOperand('|'), 2)]
        #[case("a|", SyntaxErrorKind::MissingOperand('|'), 2)]
        #[case("(a|)", SyntaxErrorKind::MissingOperand('|'), 3)]
        #[case("(a", SyntaxErrorKind::UnbalancedParenthesis, 0)]
        #[case("a)", SyntaxErrorKind::UnbalancedParenthesis, 1)]
        #[case(")", SyntaxErrorKind::UnbalancedParenthesis, 0)]
        #[case("a(b", SyntaxErrorKind::UnbalancedParenthesis, 1)]
        #[case("a**", SyntaxErrorKind::NotQuantifiable('*'), 2)]
        #[case("a*?", SyntaxErrorKind::NotQuantifiable('?'), 2)]
        #[case(r"ab\", SyntaxErrorKind::TrailingEscape, 2)]
        fn should_reject_invalid_syntax(
            #[case] pattern: &str,
            #[case] kind: SyntaxErrorKind,
            #[case] position: usize,
        ) {
            // when
            let err = super::super::to_postfix(pattern).unwrap_err();

            // then
            assert_eq!(err, SyntaxError::new(kind, position));
        }
    }

    mod parse_postfix {
        use super::*;

        #[rstest]
        #[case("abc|*&", vec![Literal('a'), Literal('b'), Literal('c'), Alternate, KleeneStar, Concat])]
        #[case(r"\&\\?", vec![Literal('&'), Literal('\\'), Optional])]
        #[case("a(", vec![Literal('a'), LParen])]
        #[case("", vec![])]
        fn should_read_notation(#[case] notation: &str, #[case] expected: Vec<Token>) {
            // when
            let res = super::super::parse_postfix(notation).unwrap();

            // then
            assert_eq!(res, expected);
        }

        #[test]
        fn should_reject_trailing_escape() {
            // when
            let err = super::super::parse_postfix(r"a\").unwrap_err();

            // then
            assert_eq!(err.kind(), &SyntaxErrorKind::TrailingEscape);
            assert_eq!(err.position(), 1);
        }

        #[test]
        fn should_read_back_rendered_tokens() {
            // given
            let tokens = super::super::to_postfix(r"(\||\()*\?").unwrap();

            // when
            let rendered = render(&tokens);

            // then
            assert_eq!(super::super::parse_postfix(&rendered).unwrap(), tokens);
        }
    }
}
