//! Step-by-step explanations of symbolic calculations.
//!
//! Given an [`OperationRequest`], this crate produces a [`Walkthrough`]: the ordered steps a
//! student would write when working the problem by hand, each a line of prose with an optional
//! LaTeX formula, followed by the answer.
//!
//! ```
//! use cas_steps::{execute, OperationRequest, StepConfig};
//!
//! let request = OperationRequest::Derivative {
//!     expr: "x^3*cos(x)".to_string(),
//!     variable: "x".to_string(),
//!     order: 1,
//! };
//! let walkthrough = execute(&request, &StepConfig::default()).unwrap();
//! assert_eq!(walkthrough.steps[0].narrative, "Derivative");
//! assert!(walkthrough.to_string().contains("product rule"));
//! ```
//!
//! The builders never manipulate expressions themselves: every derivative, primitive, limit and
//! so on comes from a [`Cas`], by default the [`SymbolicEngine`] backed by [`cas_compute`]. What
//! this crate decides is which rule applies to an expression ([`classify`]), whether a limit is an
//! indeterminate form ([`detect`]), and how each intermediate result is written ([`format`]).
//!
//! A walkthrough is built completely before it is returned. If any step fails, the request fails
//! with a single [`Error`] and no steps.

pub mod builders;
pub mod cas;
pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod request;
pub mod step;

pub use cas::{Cas, SymbolicEngine};
pub use classify::{classify, Category, Classification};
pub use config::{StepConfig, APPROXIMATION_DIGITS};
pub use detect::{detect, Detection, Form};
pub use error::Error;
pub use request::{execute, execute_with, ArithmeticOp, Direction, OperationRequest, TransformDirection};
pub use step::{Answer, Outcome, Rendered, Role, Step, Walkthrough};
