//! Symbolic derivatives of the elementary functions, combined with the chain rule.

use cas_error::Error;
use crate::symbolic::{error::UnsupportedDerivative, expr::SymExpr};
use super::{derivative, MultBuilder};

/// Returns `f'(u)` for the function `f`, or [`None`] if the derivative is not known.
fn outer_derivative(func: &str, u: &SymExpr) -> Option<SymExpr> {
    let call = |name: &str| SymExpr::call1(name, u.clone());
    let one = SymExpr::one;
    let value = match func {
        "sin" => call("cos"),
        "cos" => -call("sin"),
        "tan" => one() + call("tan").pow(SymExpr::integer(2)),
        "sec" => call("sec") * call("tan"),
        "csc" => -(call("csc") * call("cot")),
        "cot" => -(one() + call("cot").pow(SymExpr::integer(2))),
        "asin" => (one() - u.clone().pow(SymExpr::integer(2))).pow(SymExpr::fraction(-1, 2)),
        "acos" => -(one() - u.clone().pow(SymExpr::integer(2))).pow(SymExpr::fraction(-1, 2)),
        "atan" => (one() + u.clone().pow(SymExpr::integer(2))).recip(),
        "sinh" => call("cosh"),
        "cosh" => call("sinh"),
        "tanh" => one() - call("tanh").pow(SymExpr::integer(2)),
        "exp" => call("exp"),
        "ln" => u.clone().recip(),
        "abs" => u.clone() * call("abs").recip(),
        _ => return None,
    };
    Some(value)
}

/// Computes the derivative of a supported function and performs the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let unsupported = || Error::unspanned(UnsupportedDerivative { function: func.to_string() });
    let [arg] = args else {
        return Err(unsupported());
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer_derivative(func, arg).ok_or_else(unsupported)?);
    mult_group.mult(derivative(arg, var)?);
    Ok(mult_group.into())
}
