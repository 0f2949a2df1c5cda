use cas_error::Error;
use crate::{
    parser::{ast::expr::Expr, error::ChainedEquation, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation such as `x^2 - 5x + 6 = 0`. The right-hand side is optional; a lone expression
/// is understood to be equal to zero by whoever solves it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation, if an `=` sign was given.
    pub rhs: Option<Expr>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Expr::parse(input)?;
        let rhs = if input.next_is(TokenKind::Eq) {
            input.next_token()?;
            Some(Expr::parse(input)?)
        } else {
            None
        };

        if rhs.is_some() && input.next_is(TokenKind::Eq) {
            let token = input.next_token()?;
            return Err(Error::new(vec![token.span], ChainedEquation));
        }

        let end = rhs.as_ref().map_or(lhs.span().end, |rhs| rhs.span().end);
        Ok(Self {
            span: lhs.span().start..end,
            lhs,
            rhs,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        if let Some(rhs) = &self.rhs {
            write!(f, " = {}", rhs)?;
        }
        Ok(())
    }
}
