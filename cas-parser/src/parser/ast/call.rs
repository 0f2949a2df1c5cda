use cas_error::Error;
use crate::{
    parser::{ast::{expr::Expr, literal::LitSym}, error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sin(x)` or `log(x, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end.saturating_sub(1)..self.paren_span.end,
        ]
    }

    /// Returns true if the parser is positioned at a function call: a name directly followed by
    /// an opening parenthesis, with no whitespace in between.
    pub fn is_next(input: &Parser) -> bool {
        let mut ahead = input.clone();
        match ahead.next_token() {
            Ok(token) if token.kind == TokenKind::Name => ahead
                .peek_adjacent()
                .map_or(false, |token| token.kind == TokenKind::OpenParen),
            _ => false,
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = LitSym::parse(input)?;
        let open_paren = input.expect(&[TokenKind::OpenParen])?;

        let mut args = Vec::new();
        if !input.next_is(TokenKind::CloseParen) {
            loop {
                args.push(Expr::parse(input)?);
                if input.next_is(TokenKind::Comma) {
                    input.next_token()?;
                } else {
                    break;
                }
            }
        }

        let end = if input.next_is(TokenKind::CloseParen) {
            input.next_token()?.span.end
        } else {
            input.add_recoverable(Error::new(
                vec![open_paren.span.clone()],
                error::UnclosedParenthesis { opening: true },
            ));
            input.prev_span().end
        };

        Ok(Self {
            span: name.span.start..end,
            name,
            args,
            paren_span: open_paren.span.start..end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.fmt(f)?;
        }
        write!(f, ")")
    }
}
