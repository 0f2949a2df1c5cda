//! Primitives of single factors: powers of linear expressions, exponentials, and the elementary
//! functions of linear arguments.

use rug::Rational;
use crate::symbolic::{
    expr::SymExpr,
    poly::{as_linear, Poly},
};

fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call1(name, arg.clone())
}

/// `∫ f(a x + b) dx` for the elementary functions `f` with an elementary primitive.
fn function(name: &str, u: &SymExpr, a: &SymExpr) -> Option<SymExpr> {
    let scale = a.clone().recip();
    let primitive = match name {
        "sin" => -call("cos", u),
        "cos" => call("sin", u),
        "tan" => -call("ln", &call("cos", u)),
        "cot" => call("ln", &call("sin", u)),
        "exp" => call("exp", u),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "tanh" => call("ln", &call("cosh", u)),
        "ln" => u.clone() * call("ln", u) - u.clone(),
        "asin" => {
            u.clone() * call("asin", u)
                + (SymExpr::one() - u.clone().pow(SymExpr::integer(2))).sqrt()
        },
        "acos" => {
            u.clone() * call("acos", u)
                - (SymExpr::one() - u.clone().pow(SymExpr::integer(2))).sqrt()
        },
        "atan" => {
            u.clone() * call("atan", u)
                - SymExpr::fraction(1, 2) * call("ln", &(SymExpr::one() + u.clone().pow(SymExpr::integer(2))))
        },
        _ => return None,
    };
    Some(primitive * scale)
}

/// `∫ f(a x + b)^n dx` for the squared trigonometric functions.
fn trig_power(name: &str, u: &SymExpr, a: &SymExpr, exp: &SymExpr) -> Option<SymExpr> {
    let scale = a.clone().recip();
    let two_u = SymExpr::integer(2) * u.clone();
    let quarter = SymExpr::fraction(1, 4);
    let primitive = match (name, exp.as_integer()?.to_i32()?) {
        // sin^2 = (1 - cos(2u)) / 2
        ("sin", 2) => SymExpr::fraction(1, 2) * u.clone() - quarter * call("sin", &two_u),
        // cos^2 = (1 + cos(2u)) / 2
        ("cos", 2) => SymExpr::fraction(1, 2) * u.clone() + quarter * call("sin", &two_u),
        ("sec", 2) | ("cos", -2) => call("tan", u),
        ("csc", 2) | ("sin", -2) => -call("cot", u),
        ("tan", 2) => call("tan", u) - u.clone(),
        _ => return None,
    };
    Some(primitive * scale)
}

/// `∫ (r - p x^2)^(-1/2) dx = asin(x sqrt(p/r)) / sqrt(p)` for positive rationals `p`, `r`.
fn inverse_sine(base: &SymExpr, exp: &SymExpr, var: &str) -> Option<SymExpr> {
    if exp.as_rational()? != Rational::from((-1, 2)) {
        return None;
    }
    let poly = Poly::from_expr(base, var)?;
    if poly.degree() != 2 || !poly.coeff(1).is_zero() {
        return None;
    }
    let r = poly.coeff(0);
    let p = -poly.coeff(2);
    if r <= 0 || p <= 0 {
        return None;
    }

    let scale = SymExpr::rational(p.clone() / r).sqrt();
    Some(call("asin", &(scale * SymExpr::symbol(var))) * SymExpr::rational(p).sqrt().recip())
}

/// Finds the primitive of an expression that is a single factor, if it appears in the table.
pub(super) fn single(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    if expr.as_symbol() == Some(var) {
        return Some(SymExpr::fraction(1, 2) * expr.clone().pow(SymExpr::integer(2)));
    }

    match expr {
        SymExpr::Exp(base, exp) => {
            if exp.is_free_of(var) {
                // (a x + b)^n
                if let Some((a, _)) = as_linear(base, var) {
                    if exp.as_integer().is_some_and(|n| *n == -1) {
                        return Some(call("ln", base) * a.recip());
                    }
                    let raised = exp.as_ref().clone() + SymExpr::one();
                    return Some(
                        base.as_ref().clone().pow(raised.clone()) * (raised * a).recip(),
                    );
                }

                if let Some((name, u)) = base.as_call1() {
                    let (a, _) = as_linear(u, var)?;
                    return trig_power(name, u, &a, exp);
                }

                return inverse_sine(base, exp, var);
            }

            // c^(a x + b)
            if base.is_free_of(var) {
                let (a, _) = as_linear(exp, var)?;
                return Some(expr.clone() * (a * call("ln", base)).recip());
            }
            None
        },
        _ => {
            let (name, u) = expr.as_call1()?;
            let (a, _) = as_linear(u, var)?;
            function(name, u, &a)
        },
    }
}
