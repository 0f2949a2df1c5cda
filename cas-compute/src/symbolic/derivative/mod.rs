//! Symbolic differentiation.
//!
//! [`derivative`] applies the sum, product, power and chain rules structurally and returns an
//! expression that is correct but not normalized. [`differentiate`] is the entry point used by
//! the rest of the engine: it differentiates repeatedly and normalizes after every order.

use cas_error::Error;
use crate::symbolic::{expr::{Primary, SymExpr}, simplify::normalize};

mod function;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up the
/// output of the differentiation rules and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        _ => e.is_zero(),
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => is_trivially_zero(exp) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => e.is_one(),
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::zero()];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a sum of expressions. Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..factors.len() {
        // factors free of the variable have a zero derivative, so their product term vanishes
        if factors[derivative_index].is_free_of(var) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, factor) in factors.iter().enumerate() {
            let term = if derivative_index == term_index {
                derivative(factor, var)?
            } else {
                factor.clone()
            };

            inner_mult.mult(term);
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`.
///
/// - `(u^n)' = n u^(n-1) u'` if `n` is constant
/// - `(a^v)' = a^v ln(a) v'` if `a` is constant
/// - `(u^v)' = u^v (v' ln(u) + v u' / u)` otherwise
fn power_rule(base: &SymExpr, exp: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    let mut mult_group = MultBuilder::default();
    if exp.is_free_of(var) {
        mult_group.mult(exp.clone());
        mult_group.mult(base.clone().pow(exp.clone() - SymExpr::one()));
        mult_group.mult(derivative(base, var)?);
    } else if base.is_free_of(var) {
        mult_group.mult(base.clone().pow(exp.clone()));
        mult_group.mult(SymExpr::call1("ln", base.clone()));
        mult_group.mult(derivative(exp, var)?);
    } else {
        let mut inner = SumBuilder::default();
        inner.add(derivative(exp, var)? * SymExpr::call1("ln", base.clone()));
        inner.add(exp.clone() * derivative(base, var)? * base.clone().recip());
        mult_group.mult(base.clone().pow(exp.clone()));
        mult_group.mult(inner.into());
    }
    Ok(mult_group.into())
}

/// Computes the derivative of the given expression with respect to `var`. The result is not
/// normalized. Returns [`Err`] if the expression contains a function whose derivative is not
/// known.
pub fn derivative(f: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    if f.is_free_of(var) {
        return Ok(SymExpr::zero());
    }

    let expr = match f {
        SymExpr::Primary(Primary::Call(name, args)) => function::function_derivative(name, args, var)?,
        // the only other primary that contains `var` is `var` itself
        SymExpr::Primary(_) => SymExpr::one(),
        SymExpr::Add(terms) => sum_rule(terms, var)?,
        SymExpr::Mul(factors) => product_rule(factors, var)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, var)?,
        SymExpr::Special(_) => SymExpr::zero(),
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::zero())
    } else {
        Ok(expr)
    }
}

/// Computes the `order`-th derivative of the expression with respect to `var`, normalizing the
/// result after every differentiation.
///
/// An `order` of zero returns the normalized expression itself.
pub fn differentiate(expr: &SymExpr, var: &str, order: usize) -> Result<SymExpr, Error> {
    let mut current = normalize(expr);
    for i in 1..=order {
        current = normalize(&derivative(&current, var)?);
        tracing::trace!(target: "derivative", order = i, result = %current, "differentiated");
    }
    Ok(current)
}
