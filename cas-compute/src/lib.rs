//! The computer algebra engine behind the calculator.
//!
//! [`symbolic`] contains the exact engine: the expression model, normalization, calculus,
//! equation solving and transforms. [`numerical`] evaluates expressions with arbitrary-precision
//! floats, which the symbolic engine uses for sign analysis, numeric fallbacks and approximations.

pub mod consts;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
