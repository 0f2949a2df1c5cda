//! Limits of expressions.
//!
//! A one-sided limit is found by trying, in order:
//!
//! 1. Direct substitution, if it produces a finite value.
//! 2. Taking the limit of every term, factor, base / exponent or function argument and combining
//!    the results, if the combination is determinate. Poles such as `1/x` or `ln(x)` at `0` get
//!    their sign from sampling the expression next to the point.
//! 3. Splitting the expression into a numerator and denominator and applying L'Hôpital's rule to
//!    `0/0` and `oo/oo` forms. Products of the form `0 * oo` are rearranged into `oo / oo` first.
//! 4. Estimating the limit numerically from two samples closer and closer to the point.
//!
//! Limits at `oo` and `-oo` substitute `x = 1/u` (or `x = -1/u`) and take the limit as `u`
//! approaches `0` from the right. A two-sided limit exists only if both one-sided limits agree.

use cas_error::Error;
use rug::Float;
use std::cmp::Ordering;
use crate::consts::{CONVERGENCE_TOLERANCE, DIVERGENCE_BOUND};
use crate::numerical::{approx::recognize, eval_at, eval_constant};
use crate::primitive::float;
use crate::symbolic::{
    derivative::derivative,
    error::{InvalidLimitPoint, LimitDoesNotExist, LimitNotFound},
    expr::{Primary, Special, SymExpr},
    simplify::{as_numer_denom, equivalent, normalize},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The maximum nesting of L'Hôpital's rule and exponential rewrites.
const MAX_DEPTH: usize = 12;

/// Distances from the limit point at which the expression is sampled.
const SAMPLE_OFFSETS: [f64; 2] = [1e-10, 1e-14];

/// The side from which the limit point is approached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Both sides, which must agree.
    #[default]
    TwoSided,

    /// From values less than the point.
    Left,

    /// From values greater than the point.
    Right,
}

/// A variable approaching a finite point from one side.
struct Approach<'a> {
    var: &'a str,
    point: &'a SymExpr,

    /// The numerical value of the point, if it has one.
    value: Option<Float>,

    /// `true` when approaching from the left.
    from_left: bool,
}

impl<'a> Approach<'a> {
    fn new(var: &'a str, point: &'a SymExpr, from_left: bool) -> Self {
        Self { var, point, value: eval_constant(point), from_left }
    }

    /// Evaluates the expression at the given distance from the point, on the approach side.
    fn sample(&self, expr: &SymExpr, offset: f64) -> Option<Float> {
        let value = self.value.as_ref()?;
        let x = if self.from_left {
            value.clone() - offset
        } else {
            value.clone() + offset
        };
        eval_at(expr, self.var, &x)
    }

    /// The sign of the expression right next to the point.
    fn sign_near(&self, expr: &SymExpr) -> Option<Ordering> {
        self.sample(expr, SAMPLE_OFFSETS[1])?.cmp0()
    }
}

/// Returns true if the value is a finite expression or a signed infinity.
fn is_determinate(value: &SymExpr) -> bool {
    value.is_finite() || matches!(value.as_special(), Some(Special::Infinity | Special::NegInfinity))
}

fn signed_infinity(sign: Ordering) -> Option<SymExpr> {
    match sign {
        Ordering::Greater => Some(SymExpr::Special(Special::Infinity)),
        Ordering::Less => Some(SymExpr::Special(Special::NegInfinity)),
        Ordering::Equal => None,
    }
}

/// Takes the limit of every part and combines the results with `build`.
fn combine(
    parts: &[SymExpr],
    approach: &Approach,
    depth: usize,
    build: fn(Vec<SymExpr>) -> SymExpr,
) -> Option<SymExpr> {
    let values = parts.iter()
        .map(|part| one_sided(part, approach, depth))
        .collect::<Option<Vec<_>>>()?;
    Some(normalize(&build(values)))
}

/// `lim f^g`
fn power_limit(base: &SymExpr, exp: &SymExpr, approach: &Approach, depth: usize) -> Option<SymExpr> {
    if exp.is_free_of(approach.var) {
        let base_limit = one_sided(base, approach, depth)?;
        let value = normalize(&base_limit.clone().pow(exp.clone()));
        if is_determinate(&value) {
            return Some(value);
        }

        // `1/0` has the sign of the expression next to the point
        if base_limit.is_zero() && value.as_special() == Some(Special::ComplexInfinity) {
            return signed_infinity(approach.sign_near(&base.clone().pow(exp.clone()))?);
        }
        return None;
    }

    // f^g = exp(g ln(f))
    let rewritten = normalize(&SymExpr::call1(
        "exp",
        exp.clone() * SymExpr::call1("ln", base.clone()),
    ));
    one_sided(&rewritten, approach, depth + 1)
}

/// `lim f(u)`
fn call_limit(name: &str, args: &[SymExpr], approach: &Approach, depth: usize) -> Option<SymExpr> {
    let [arg] = args else {
        return None;
    };
    let inner = one_sided(arg, approach, depth)?;
    let value = normalize(&SymExpr::call1(name, inner.clone()));
    if is_determinate(&value) {
        return Some(value);
    }

    // a pole of the function, such as `ln(0)` or `tan(pi/2)`
    if inner.is_finite() && value.as_special() == Some(Special::ComplexInfinity) {
        return signed_infinity(approach.sign_near(&SymExpr::call1(name, arg.clone()))?);
    }
    None
}

/// Rearranges a product of the form `0 * oo` into the quotient `oo / (1 / 0)`.
fn split_product(factors: &[SymExpr], approach: &Approach, depth: usize) -> Option<(SymExpr, SymExpr)> {
    let mut infinite = Vec::new();
    let mut vanishing = Vec::new();
    for factor in factors {
        let value = one_sided(factor, approach, depth)?;
        if value.is_zero() {
            vanishing.push(factor.clone().recip());
        } else {
            infinite.push(factor.clone());
        }
    }
    if vanishing.is_empty() || infinite.is_empty() {
        return None;
    }
    Some((normalize(&SymExpr::Mul(infinite)), normalize(&SymExpr::Mul(vanishing))))
}

/// Resolves an indeterminate form with L'Hôpital's rule.
fn indeterminate(expr: &SymExpr, approach: &Approach, depth: usize) -> Option<SymExpr> {
    let (num, den) = match as_numer_denom(expr) {
        (num, den) if !den.is_one() => (num, den),
        _ => match expr {
            SymExpr::Mul(factors) => split_product(factors, approach, depth)?,
            _ => return None,
        },
    };

    let num_limit = one_sided(&num, approach, depth + 1)?;
    let den_limit = one_sided(&den, approach, depth + 1)?;
    tracing::trace!(
        target: "limit",
        num = %num,
        den = %den,
        num_limit = %num_limit,
        den_limit = %den_limit,
        "quotient"
    );

    let both_zero = num_limit.is_zero() && den_limit.is_zero();
    let both_infinite = num_limit.is_infinite() && den_limit.is_infinite();
    if both_zero || both_infinite {
        let num_derivative = derivative(&num, approach.var).ok()?;
        let den_derivative = derivative(&den, approach.var).ok()?;
        let ratio = normalize(&(num_derivative * den_derivative.recip()));
        tracing::debug!(target: "limit", ratio = %ratio, depth, "lhopital");
        return one_sided(&ratio, approach, depth + 1);
    }

    if den_limit.is_zero() && num_limit.is_finite() {
        return signed_infinity(approach.sign_near(expr)?);
    }
    if den_limit.is_infinite() && num_limit.is_finite() {
        return Some(SymExpr::zero());
    }

    let value = normalize(&(num_limit * den_limit.recip()));
    is_determinate(&value).then_some(value)
}

/// Estimates the limit from samples next to the point.
fn numerical(expr: &SymExpr, approach: &Approach) -> Option<SymExpr> {
    let near = approach.sample(expr, SAMPLE_OFFSETS[0])?;
    let nearer = approach.sample(expr, SAMPLE_OFFSETS[1])?;

    let magnitude = nearer.clone().abs();
    if magnitude > *DIVERGENCE_BOUND && magnitude > near.clone().abs() {
        return signed_infinity(nearer.cmp0()?);
    }
    if float(&near - &nearer).abs() > *CONVERGENCE_TOLERANCE {
        return None;
    }

    tracing::debug!(target: "limit", estimate = %nearer, "numerical_estimate");
    Some(recognize(&nearer, &CONVERGENCE_TOLERANCE).unwrap_or_else(|| SymExpr::float(nearer)))
}

/// Takes the one-sided limit of the expression. Returns [`None`] if no method succeeds.
fn one_sided(expr: &SymExpr, approach: &Approach, depth: usize) -> Option<SymExpr> {
    if expr.is_free_of(approach.var) {
        return Some(expr.clone());
    }
    if depth > MAX_DEPTH {
        return None;
    }

    let substituted = normalize(&expr.substitute(approach.var, approach.point));
    if substituted.is_finite() {
        return Some(substituted);
    }

    let structural = match expr {
        SymExpr::Add(terms) => combine(terms, approach, depth, SymExpr::Add),
        SymExpr::Mul(factors) => combine(factors, approach, depth, SymExpr::Mul),
        SymExpr::Exp(base, exp) => power_limit(base, exp, approach, depth),
        SymExpr::Primary(Primary::Call(name, args)) => call_limit(name, args, approach, depth),
        SymExpr::Primary(_) | SymExpr::Special(_) => None,
    };
    if let Some(value) = structural.filter(is_determinate) {
        return Some(value);
    }

    indeterminate(expr, approach, depth)
        .filter(is_determinate)
        .or_else(|| numerical(expr, approach))
}

/// Returns true if two one-sided limits are the same value.
fn agree(left: &SymExpr, right: &SymExpr) -> bool {
    if left == right {
        return true;
    }
    if !left.is_finite() || !right.is_finite() {
        return false;
    }
    match (eval_constant(left), eval_constant(right)) {
        (Some(l), Some(r)) => float(&l - &r).abs() < *CONVERGENCE_TOLERANCE,
        _ => equivalent(left, right),
    }
}

/// Returns a symbol name that does not appear in the expression.
fn fresh_symbol(expr: &SymExpr, var: &str) -> String {
    let mut name = format!("{}'", var);
    while expr.contains_symbol(&name) {
        name.push('\'');
    }
    name
}

/// Computes the limit of `expr` as `var` approaches `point` from the given direction.
///
/// The point may be any expression free of `var`, `oo` or `-oo`. The direction is ignored for
/// infinite points.
pub fn limit(expr: &SymExpr, var: &str, point: &SymExpr, direction: Direction) -> Result<SymExpr, Error> {
    let expr = normalize(expr);
    let point = normalize(point);
    tracing::debug!(target: "limit", expr = %expr, var, point = %point, ?direction, "limit");

    let not_found = || Error::unspanned(LimitNotFound { expr: expr.to_string() });
    let invalid_point = || Error::unspanned(InvalidLimitPoint { point: point.to_string() });

    match point.as_special() {
        Some(special @ (Special::Infinity | Special::NegInfinity)) => {
            let direct = normalize(&expr.substitute(var, &point));
            if is_determinate(&direct) {
                return Ok(direct);
            }

            let u = fresh_symbol(&expr, var);
            let reciprocal = SymExpr::symbol(u.as_str()).recip();
            let replacement = if special == Special::Infinity { reciprocal } else { -reciprocal };
            let transformed = normalize(&expr.substitute(var, &replacement));
            let zero = SymExpr::zero();
            one_sided(&transformed, &Approach::new(&u, &zero, false), 0).ok_or_else(not_found)
        },
        Some(_) => Err(invalid_point()),
        None if point.contains_symbol(var) => Err(invalid_point()),
        None => match direction {
            Direction::Left => one_sided(&expr, &Approach::new(var, &point, true), 0).ok_or_else(not_found),
            Direction::Right => one_sided(&expr, &Approach::new(var, &point, false), 0).ok_or_else(not_found),
            Direction::TwoSided => {
                let left = one_sided(&expr, &Approach::new(var, &point, true), 0).ok_or_else(not_found)?;
                let right = one_sided(&expr, &Approach::new(var, &point, false), 0).ok_or_else(not_found)?;
                if agree(&left, &right) {
                    Ok(right)
                } else {
                    tracing::debug!(target: "limit", left = %left, right = %right, "sides_disagree");
                    Err(Error::unspanned(LimitDoesNotExist {
                        left: left.to_string(),
                        right: right.to_string(),
                    }))
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn lim(input: &str, point: &str, direction: Direction) -> Result<SymExpr, Error> {
        limit(&parse(input), "x", &parse(point), direction)
    }

    fn two_sided(input: &str, point: &str) -> SymExpr {
        lim(input, point, Direction::TwoSided).unwrap()
    }

    #[test]
    fn direct_substitution() {
        assert_eq!(two_sided("x^2 + 1", "2"), SymExpr::integer(5));
        assert_eq!(two_sided("sin(x)", "pi/2"), SymExpr::one());
        assert_eq!(two_sided("a*x", "3"), parse("3a"));
    }

    #[test]
    fn removable_singularities() {
        assert_eq!(two_sided("sin(x)/x", "0"), SymExpr::one());
        assert_eq!(two_sided("(x^2 - 1)/(x - 1)", "1"), SymExpr::integer(2));
        assert_eq!(two_sided("(1 - cos(x))/x^2", "0"), SymExpr::fraction(1, 2));
        assert_eq!(two_sided("(exp(x) - 1)/x", "0"), SymExpr::one());
    }

    #[test]
    fn one_sided_poles() {
        assert_eq!(lim("1/x", "0", Direction::Right).unwrap(), SymExpr::Special(Special::Infinity));
        assert_eq!(lim("1/x", "0", Direction::Left).unwrap(), SymExpr::Special(Special::NegInfinity));
        assert_eq!(lim("ln(x)", "0", Direction::Right).unwrap(), SymExpr::Special(Special::NegInfinity));
        assert_eq!(two_sided("1/x^2", "0"), SymExpr::Special(Special::Infinity));
    }

    #[test]
    fn sides_disagree() {
        let err = lim("1/x", "0", Direction::TwoSided).unwrap_err();
        let kind = err.downcast_ref::<LimitDoesNotExist>().unwrap();
        assert_eq!(kind.left, "-oo");
        assert_eq!(kind.right, "oo");
    }

    #[test]
    fn zero_times_infinity() {
        assert_eq!(lim("x*ln(x)", "0", Direction::Right).unwrap(), SymExpr::zero());
    }

    #[test]
    fn at_infinity() {
        assert_eq!(two_sided("1/x", "oo"), SymExpr::zero());
        assert_eq!(two_sided("x^2", "-oo"), SymExpr::Special(Special::Infinity));
        assert_eq!(two_sided("exp(-x)", "oo"), SymExpr::zero());
        assert_eq!(two_sided("(x + 1)/(2x + 3)", "oo"), SymExpr::fraction(1, 2));
        assert_eq!(two_sided("x*exp(-x)", "oo"), SymExpr::zero());
        assert_eq!(two_sided("atan(x)", "oo"), parse("pi/2"));
    }

    #[test]
    fn exponential_forms() {
        assert_eq!(two_sided("(1 + 1/x)^x", "oo"), parse("e"));
        assert_eq!(lim("x^x", "0", Direction::Right).unwrap(), SymExpr::one());
    }

    #[test]
    fn invalid_points() {
        assert!(lim("x", "x + 1", Direction::TwoSided).unwrap_err().is::<InvalidLimitPoint>());
        assert!(lim("x", "0/0", Direction::TwoSided).unwrap_err().is::<InvalidLimitPoint>());
    }

    #[test]
    fn oscillating() {
        assert!(lim("sin(x)", "oo", Direction::TwoSided).unwrap_err().is::<LimitNotFound>());
    }
}
