//! Tokenizer and parser for the expressions typed into the calculator.
//!
//! The grammar is intentionally small: numbers, symbols, the arithmetic operators `+`, `-`, `*`,
//! `/`, `^` (also written `**`), unary negation, parentheses, function calls, implicit
//! multiplication (`2x`, `3(x + 1)`, `x sin(x)`), and equations of the form `lhs = rhs`.
//!
//! ```
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x^2 - 4x + 4");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "x^2-4x+4");
//! ```

pub mod parser;
pub mod tokenizer;
