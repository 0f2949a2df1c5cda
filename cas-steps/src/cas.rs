//! The capabilities the walkthrough builders need from a computer algebra system.
//!
//! The builders never manipulate expressions themselves. They ask a [`Cas`] for every derivative,
//! primitive, limit and so on, and only decide which of those results to show. [`SymbolicEngine`]
//! implements the trait with [`cas_compute`].

use cas_compute::numerical::eval_at;
use cas_compute::primitive::float;
use cas_compute::symbolic::{
    self,
    expr::{from_ast, from_equation},
    fmt::Latex,
    simplify::{as_numer_denom, normalize},
    SymExpr,
};
use cas_parser::parser::{
    ast::{equation::Equation, expr::Expr as AstExpr},
    Parser,
};
use crate::error::Error;
use crate::request::Direction;

/// The operations a computer algebra system provides to the walkthrough builders.
///
/// Every method is a pure function of its arguments.
pub trait Cas {
    /// Parses an expression.
    fn parse(&self, text: &str) -> Result<SymExpr, Error>;

    /// Parses an equation `lhs = rhs`. A lone expression is equated to zero.
    fn parse_equation(&self, text: &str) -> Result<(SymExpr, SymExpr), Error>;

    /// Computes the derivative of the given order.
    fn differentiate(&self, expr: &SymExpr, var: &str, order: usize) -> Result<SymExpr, Error>;

    /// Computes a primitive, without the constant of integration.
    fn integrate(&self, expr: &SymExpr, var: &str) -> Result<SymExpr, Error>;

    /// Evaluates a primitive at a bound of a definite integral, taking a one-sided limit if the
    /// bound is infinite or the primitive is undefined there.
    fn evaluate_bound(&self, primitive: &SymExpr, var: &str, bound: &SymExpr, direction: Direction) -> Result<SymExpr, Error>;

    /// Replaces `var` with `value` and normalizes the result.
    fn substitute(&self, expr: &SymExpr, var: &str, value: &SymExpr) -> SymExpr;

    /// Computes a limit.
    fn limit(&self, expr: &SymExpr, var: &str, point: &SymExpr, direction: Direction) -> Result<SymExpr, Error>;

    /// Computes the Taylor polynomial of the given order.
    fn series(&self, expr: &SymExpr, var: &str, point: &SymExpr, order: usize) -> Result<SymExpr, Error>;

    /// Finds the real solutions of `lhs = rhs`.
    fn solve(&self, lhs: &SymExpr, rhs: &SymExpr, var: &str) -> Result<Vec<SymExpr>, Error>;

    /// Computes a finite sum.
    fn summation(&self, expr: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, Error>;

    /// Computes the Laplace transform.
    fn laplace(&self, expr: &SymExpr, time: &str, frequency: &str) -> Result<SymExpr, Error>;

    /// Computes the inverse Laplace transform.
    fn inverse_laplace(&self, expr: &SymExpr, frequency: &str, time: &str) -> Result<SymExpr, Error>;

    /// Simplifies an expression.
    fn simplify(&self, expr: &SymExpr) -> SymExpr;

    /// Splits an expression into numerator and denominator.
    fn numer_denom(&self, expr: &SymExpr) -> (SymExpr, SymExpr);

    /// Evaluates an expression numerically, with `var` bound to `value`.
    fn evaluate(&self, expr: &SymExpr, var: &str, value: f64) -> Option<f64>;

    /// Renders an expression as LaTeX.
    fn latex(&self, expr: &SymExpr) -> String;
}

/// The [`Cas`] backed by [`cas_compute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicEngine;

/// Wraps an engine error with the text of the expression that caused it.
fn engine_error(expr: &SymExpr) -> impl FnOnce(cas_error::Error) -> Error + '_ {
    move |err| Error::from_engine(&expr.to_string(), err)
}

impl Cas for SymbolicEngine {
    fn parse(&self, text: &str) -> Result<SymExpr, Error> {
        let parse_error = |errors| Error::Parse { input: text.to_string(), errors };
        let ast = Parser::new(text).try_parse_full::<AstExpr>().map_err(parse_error)?;
        let expr = from_ast(&ast).map_err(|err| parse_error(vec![err]))?;
        Ok(normalize(&expr))
    }

    fn parse_equation(&self, text: &str) -> Result<(SymExpr, SymExpr), Error> {
        let parse_error = |errors| Error::Parse { input: text.to_string(), errors };
        let equation = Parser::new(text).try_parse_full::<Equation>().map_err(parse_error)?;
        let (lhs, rhs) = from_equation(&equation).map_err(|err| parse_error(vec![err]))?;
        Ok((normalize(&lhs), rhs.map_or_else(SymExpr::zero, |rhs| normalize(&rhs))))
    }

    fn differentiate(&self, expr: &SymExpr, var: &str, order: usize) -> Result<SymExpr, Error> {
        symbolic::differentiate(expr, var, order).map_err(engine_error(expr))
    }

    fn integrate(&self, expr: &SymExpr, var: &str) -> Result<SymExpr, Error> {
        symbolic::integrate(expr, var).map_err(engine_error(expr))
    }

    fn evaluate_bound(&self, primitive: &SymExpr, var: &str, bound: &SymExpr, direction: Direction) -> Result<SymExpr, Error> {
        symbolic::integrate::evaluate_bound(primitive, var, bound, direction.into())
            .map_err(engine_error(primitive))
    }

    fn substitute(&self, expr: &SymExpr, var: &str, value: &SymExpr) -> SymExpr {
        normalize(&expr.substitute(var, value))
    }

    fn limit(&self, expr: &SymExpr, var: &str, point: &SymExpr, direction: Direction) -> Result<SymExpr, Error> {
        symbolic::limit(expr, var, point, direction.into()).map_err(engine_error(expr))
    }

    fn series(&self, expr: &SymExpr, var: &str, point: &SymExpr, order: usize) -> Result<SymExpr, Error> {
        symbolic::series(expr, var, point, order).map_err(engine_error(expr))
    }

    fn solve(&self, lhs: &SymExpr, rhs: &SymExpr, var: &str) -> Result<Vec<SymExpr>, Error> {
        symbolic::solve(lhs, rhs, var).map_err(engine_error(lhs))
    }

    fn summation(&self, expr: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, Error> {
        symbolic::summation(expr, var, lower, upper).map_err(engine_error(expr))
    }

    fn laplace(&self, expr: &SymExpr, time: &str, frequency: &str) -> Result<SymExpr, Error> {
        symbolic::laplace(expr, time, frequency).map_err(engine_error(expr))
    }

    fn inverse_laplace(&self, expr: &SymExpr, frequency: &str, time: &str) -> Result<SymExpr, Error> {
        symbolic::inverse_laplace(expr, frequency, time).map_err(engine_error(expr))
    }

    fn simplify(&self, expr: &SymExpr) -> SymExpr {
        symbolic::simplify(expr)
    }

    fn numer_denom(&self, expr: &SymExpr) -> (SymExpr, SymExpr) {
        let (num, den) = as_numer_denom(expr);
        (normalize(&num), normalize(&den))
    }

    fn evaluate(&self, expr: &SymExpr, var: &str, value: f64) -> Option<f64> {
        eval_at(expr, var, &float(value)).map(|value| value.to_f64())
    }

    fn latex(&self, expr: &SymExpr) -> String {
        expr.to_latex()
    }
}
