use cas_error::Error;
use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        token::op::{UnaryOp, UnaryOpKind},
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    ///
    /// Negation binds looser than exponentiation, so `-x^2` parses as `-(x^2)`. A leading `+` is
    /// accepted and dropped.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::Sub) => {
                let token = input.next_token()?;
                let operand = Self::parse_or_lower(input)?;
                let operand = Binary::parse_expr(input, operand, Precedence::Exp)?;
                let span = token.span.start..operand.span().end;
                Ok(Expr::Unary(Self {
                    operand: Box::new(operand),
                    op: UnaryOp { kind: UnaryOpKind::Neg, span: token.span },
                    span,
                }))
            },
            Some(TokenKind::Add) => {
                input.next_token()?;
                let operand = Self::parse_or_lower(input)?;
                Binary::parse_expr(input, operand, Precedence::Exp)
            },
            _ => Expr::parse_primary(input),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}
