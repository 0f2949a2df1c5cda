use cas_error::Error;
use crate::{
    parser::{ast::expr::Expr, error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.expect(&[TokenKind::OpenParen])?;
        if input.next_is(TokenKind::CloseParen) {
            let close_paren = input.next_token()?;
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                error::EmptyParenthesis,
            ));
        }

        let expr = Expr::parse(input)?;
        let end = if input.next_is(TokenKind::CloseParen) {
            input.next_token()?.span.end
        } else {
            // pretend the parenthesis was closed so parsing can continue
            input.add_recoverable(Error::new(
                vec![open_paren.span.clone()],
                error::UnclosedParenthesis { opening: true },
            ));
            expr.span().end
        };

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
