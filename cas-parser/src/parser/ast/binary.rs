use cas_error::Error;
use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    token::op::BinOp,
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the given precedence and a right-hand-side.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before we build the corresponding AST
    /// node, we check if the operator after `2` has higher precedence than `+`. If it does, the
    /// expression starting with `2` is parsed first, so that `2 * 3` becomes the right-hand-side
    /// of the `1 +` node. Right-associative operators (`^`) of equal precedence are handled the
    /// same way, so `2^3^2` parses as `2^(3^2)`.
    ///
    /// Implicit multiplication is reported by [`BinOp::peek`] whenever an operand directly
    /// follows another operand. Since parsing the right-hand-side always consumes at least one
    /// token, this cannot loop forever.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = BinOp::peek(input) {
            if op.precedence() < precedence {
                break;
            }

            if !op.implicit {
                input.next_token()?;
            }

            let mut rhs = Unary::parse_or_lower(input)?;
            while let Some(next_op) = BinOp::peek(input) {
                let higher = next_op.precedence() > op.precedence();
                let right_assoc = next_op.precedence() == op.precedence()
                    && next_op.associativity() == Associativity::Right;
                if higher || right_assoc {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                } else {
                    break;
                }
            }

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
