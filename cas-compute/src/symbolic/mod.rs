//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`cas_parser::parser::ast::Expr`] nodes produced by [`cas_parser`], with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`cas_parser::parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! If you have a [`cas_parser::parser::ast::Expr`], you can convert it to a [`SymExpr`] with
//! [`expr::from_ast`]. Conversion fails if the expression calls a function the engine does not
//! know.
//!
//! ```
//! use cas_compute::symbolic::expr::{from_ast, SymExpr};
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr = from_ast(&ast_expr).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Normalization
//!
//! Every operation in this module starts by reducing its input to a canonical form with
//! [`normalize`]. Normalization applies a set of rules in multiple passes until none of them
//! apply. Each rule is simply a function that accepts an expression and returns
//! [`Option<SymExpr>`]; if the rule is applicable to the expression, the rule is applied and the
//! result is returned. The rules are defined in [`simplify::rules`].
//!
//! # Operations
//!
//! | Operation | Function |
//! |---|---|
//! | Differentiation | [`differentiate`] |
//! | Integration | [`integrate`], [`integrate_definite`] |
//! | Limits | [`limit`] |
//! | Taylor series | [`series`], [`taylor_terms`] |
//! | Equations | [`solve`] |
//! | Finite sums | [`summation`] |
//! | Laplace transforms | [`laplace`], [`inverse_laplace`] |
//! | LaTeX | [`fmt::Latex`] |
//!
//! Operations that can fail return a [`cas_error::Error`] whose kind is one of the types in
//! [`error`].

pub mod derivative;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod integrate;
pub mod laplace;
pub mod limit;
pub mod partial_fraction;
pub mod poly;
pub mod series;
pub mod simplify;
pub mod solve;
pub mod step_collector;
pub mod summation;

pub use derivative::differentiate;
pub use expr::SymExpr;
pub use integrate::{integrate, integrate_definite};
pub use laplace::{inverse_laplace, laplace};
pub use limit::{limit, Direction};
pub use series::{series, taylor_terms};
pub use simplify::{normalize, simplify};
pub use solve::solve;
pub use summation::summation;
