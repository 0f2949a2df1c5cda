use cas_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression that can be typed into the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Parses a primary expression: a literal, a function call, or a parenthesized expression.
    pub fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::OpenParen) => Paren::parse(input).map(Self::Paren),
            Some(TokenKind::Name) if Call::is_next(input) => Call::parse(input).map(Self::Call),
            Some(TokenKind::Int | TokenKind::Float | TokenKind::Name) => Literal::parse(input).map(Self::Literal),
            Some(TokenKind::CloseParen) => Err(input.error(error::UnclosedParenthesis { opening: false })),
            Some(found) => Err(input.error(error::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::OpenParen,
                    TokenKind::Sub,
                ],
                found,
            })),
            None => Err(input.error(error::UnexpectedEof)),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
