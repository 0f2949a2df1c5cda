pub mod ast;
pub mod error;
pub mod token;

use cas_error::{Error, ErrorKind};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for calculator input. This is the type to use to parse an arbitrary
/// expression or equation into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// Errors that the parser was able to recover from, such as an unclosed parenthesis. They are
    /// reported together once parsing finishes.
    recoverable_errors: Vec<Error>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            recoverable_errors: Vec::new(),
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Records an error that does not prevent the parser from continuing.
    pub fn add_recoverable(&mut self, error: Error) {
        self.recoverable_errors.push(error);
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next significant token, or the end of the source code if the cursor
    /// is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the span of the most recently consumed token.
    pub fn prev_span(&self) -> Range<usize> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(0..0, |token| token.span.clone())
    }

    /// Returns the next significant (non-whitespace) token without moving the cursor. Returns
    /// [`None`] if there are no more tokens.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the token directly after the cursor, without skipping whitespace.
    pub fn peek_adjacent(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns true if the next significant token is of the given kind.
    pub fn next_is(&self, kind: TokenKind) -> bool {
        self.peek_token().map_or(false, |token| token.kind == kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(error::UnexpectedEof))
    }

    /// Consumes the next token, returning an [`error::UnexpectedToken`] error if it is not of
    /// the expected kind.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span.clone()], error::UnexpectedToken {
                expected,
                found: token.kind,
            }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let recoverable = self.recoverable_errors.len();
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                self.recoverable_errors.truncate(recoverable);
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned. Any recoverable errors encountered along the
    /// way are returned as well.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Vec<Error>> {
        if self.peek_token().is_none() {
            return Err(vec![Error::new(vec![self.eof_span()], error::EmptyInput)]);
        }

        let value = match T::parse(self) {
            Ok(value) => value,
            Err(err) => {
                let mut errors = std::mem::take(&mut self.recoverable_errors);
                errors.push(err);
                return Err(errors);
            },
        };

        if let Some(token) = self.peek_token() {
            let span = token.span.start..self.eof_span().end;
            self.recoverable_errors.push(Error::new(vec![span], error::ExpectedEof));
        }

        if self.recoverable_errors.is_empty() {
            Ok(value)
        } else {
            Err(std::mem::take(&mut self.recoverable_errors))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative: `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative: `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication shares this precedence.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Binary, Call, Equation, Expr, LitFloat, LitInt, LitSym, Literal, Paren, Unary};
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn op(kind: BinOpKind, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit: false, span }
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3 * x * 5");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 0..1)),
                op: op(BinOpKind::Mul, 2..3),
                rhs: Box::new(sym("x", 4..5)),
                span: 0..5,
            })),
            op: op(BinOpKind::Mul, 6..7),
            rhs: Box::new(int("5", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("2 ** 3 ^ 2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: op(BinOpKind::Exp, 2..4),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 5..6)),
                op: op(BinOpKind::Exp, 7..8),
                rhs: Box::new(int("2", 9..10)),
                span: 5..10,
            })),
            span: 0..10,
        }));
    }

    #[test]
    fn binary_mixed_precedence() {
        let mut parser = Parser::new("1 + 2 * 3 - 4 / 5 ^ 6");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr.to_string(), "1+2*3-4/5^6");
        match expr {
            Expr::Binary(Binary { op, rhs, .. }) => {
                assert_eq!(op.kind, BinOpKind::Sub);
                match *rhs {
                    Expr::Binary(Binary { op, .. }) => assert_eq!(op.kind, BinOpKind::Div),
                    other => panic!("expected a division, got {:?}", other),
                }
            },
            other => panic!("expected a subtraction, got {:?}", other),
        }
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        let mut parser = Parser::new("x^-1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr.to_string(), "x^-1");
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("2x^2 + 3(x + 1)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 0..1)),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
                rhs: Box::new(Expr::Binary(Binary {
                    lhs: Box::new(sym("x", 1..2)),
                    op: op(BinOpKind::Exp, 2..3),
                    rhs: Box::new(int("2", 3..4)),
                    span: 1..4,
                })),
                span: 0..4,
            })),
            op: op(BinOpKind::Add, 5..6),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 7..8)),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 8..8 },
                rhs: Box::new(Expr::Paren(Paren {
                    expr: Box::new(Expr::Binary(Binary {
                        lhs: Box::new(sym("x", 9..10)),
                        op: op(BinOpKind::Add, 11..12),
                        rhs: Box::new(int("1", 13..14)),
                        span: 9..14,
                    })),
                    span: 8..15,
                })),
                span: 7..15,
            })),
            span: 0..15,
        }));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("x**3 * cos(x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 0..1)),
                op: op(BinOpKind::Exp, 1..3),
                rhs: Box::new(int("3", 3..4)),
                span: 0..4,
            })),
            op: op(BinOpKind::Mul, 5..6),
            rhs: Box::new(Expr::Call(Call {
                name: LitSym { name: "cos".to_string(), span: 7..10 },
                args: vec![sym("x", 11..12)],
                span: 7..13,
                paren_span: 10..13,
            })),
            span: 0..13,
        }));
    }

    #[test]
    fn equation() {
        let mut parser = Parser::new("x^2 - 5x + 6 = 0");
        let equation = parser.try_parse_full::<Equation>().unwrap();

        assert_eq!(equation.lhs.to_string(), "x^2-5x+6");
        assert_eq!(equation.rhs, Some(int("0", 15..16)));
        assert_eq!(equation.span, 0..16);
    }

    #[test]
    fn chained_equation() {
        let mut parser = Parser::new("x = 1 = 2");
        let errors = parser.try_parse_full::<Equation>().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<error::ChainedEquation>());
        assert_eq!(errors[0].spans, vec![6..7]);
    }

    #[test]
    fn equation_without_rhs() {
        let mut parser = Parser::new("x^2 - 4");
        let equation = parser.try_parse_full::<Equation>().unwrap();

        assert_eq!(equation.rhs, None);
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("sin(x + 1");
        let errors = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<error::UnclosedParenthesis>());
        assert_eq!(errors[0].spans, vec![3..4]);
    }

    #[test]
    fn trailing_garbage() {
        let mut parser = Parser::new("x + 1 )");
        let errors = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].is::<error::ExpectedEof>());
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("x +");
        let errors = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(errors[0].is::<error::UnexpectedEof>());
    }

    #[test]
    fn empty_input() {
        let mut parser = Parser::new("   ");
        let errors = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(errors[0].is::<error::EmptyInput>());
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("2 * ()");
        let errors = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(errors[0].is::<error::EmptyParenthesis>());
    }
}
