//! Integration of rational functions by partial fractions.

use rug::Rational;
use crate::symbolic::{
    expr::SymExpr,
    partial_fraction::decompose,
    poly::Poly,
    simplify::as_numer_denom,
};

/// `∫ p(x) dx` for a polynomial `p`.
fn polynomial(poly: &Poly, var: &str) -> SymExpr {
    let x = SymExpr::symbol(var);
    SymExpr::Add(
        (0..=poly.degree())
            .filter(|&i| !poly.coeff(i).is_zero())
            .map(|i| {
                let power = Rational::from(i + 1);
                SymExpr::rational(poly.coeff(i) / power) * x.clone().pow(SymExpr::integer(i + 1))
            })
            .collect(),
    )
}

/// Integrates a quotient of polynomials with rational coefficients.
///
/// - `∫ A / (x - r) dx = A ln(x - r)`
/// - `∫ A / (x - r)^k dx = -A / ((k - 1) (x - r)^(k - 1))`
/// - `∫ (B x + C) / ((x + h)^2 + k) dx = B/2 ln((x + h)^2 + k) + (C - B h) / sqrt(k) atan((x + h) / sqrt(k))`
pub(super) fn rational_function(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    let (num, den) = as_numer_denom(expr);
    let numerator = Poly::from_expr(&num, var)?;
    let denominator = Poly::from_expr(&den, var)?;
    let fractions = decompose(&numerator, &denominator)?;

    let x = SymExpr::symbol(var);
    let mut terms = vec![polynomial(&fractions.polynomial, var)];
    for pole in &fractions.poles {
        let factor = x.clone() - SymExpr::rational(pole.root.clone());
        let coefficient = SymExpr::rational(pole.coefficient.clone());
        if pole.power == 1 {
            terms.push(coefficient * SymExpr::call1("ln", factor));
        } else {
            let k = pole.power as i64 - 1;
            terms.push(
                -coefficient
                    * SymExpr::integer(k).recip()
                    * factor.pow(SymExpr::integer(-k)),
            );
        }
    }

    if let Some(quadratic) = &fractions.quadratic {
        let (h, k) = quadratic.completed_square();
        let shifted = x.clone() + SymExpr::rational(h.clone());
        let root_k = SymExpr::rational(k.clone()).sqrt();
        let denominator = shifted.clone().pow(SymExpr::integer(2)) + SymExpr::rational(k);
        let log_coefficient = quadratic.linear.clone() / Rational::from(2);
        let atan_coefficient = quadratic.constant.clone() - quadratic.linear.clone() * h;

        terms.push(SymExpr::rational(log_coefficient) * SymExpr::call1("ln", denominator));
        terms.push(
            SymExpr::rational(atan_coefficient)
                * root_k.clone().recip()
                * SymExpr::call1("atan", shifted * root_k.recip()),
        );
    }

    Some(SymExpr::Add(terms))
}
