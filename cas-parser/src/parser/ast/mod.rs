//! The abstract syntax tree produced by the parser.

pub mod binary;
pub mod call;
pub mod equation;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use equation::Equation;
pub use expr::Expr;
pub use literal::{LitFloat, LitInt, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;
