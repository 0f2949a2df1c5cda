//! Notation used by the walkthroughs.
//!
//! Expressions themselves are rendered by [`Cas::latex`]; the functions here build the notation
//! around them, such as derivative operators, integral signs and limits. All of them are pure.

use crate::cas::Cas;
use crate::config::APPROXIMATION_DIGITS;
use crate::request::Direction;
use cas_compute::symbolic::SymExpr;

/// Renders an expression.
pub fn render(cas: &impl Cas, expr: &SymExpr) -> String {
    cas.latex(expr)
}

/// Renders an expression in parentheses if it is a sum, so that it can be multiplied or raised to
/// a power.
pub fn grouped(cas: &impl Cas, expr: &SymExpr) -> String {
    match expr {
        SymExpr::Add(_) => format!("\\left({}\\right)", cas.latex(expr)),
        _ => cas.latex(expr),
    }
}

/// The operator `d/dx`, or `d^n/dx^n` for higher orders.
pub fn derivative_operator(var: &str, order: usize) -> String {
    if order == 1 {
        format!("\\frac{{d}}{{d{}}}", var)
    } else {
        format!("\\frac{{d^{{{order}}}}}{{d{var}^{{{order}}}}}", order = order, var = var)
    }
}

/// The name of the `order`-th derivative of `f`: `f'`, `f''`, `f'''`, then `f^{(n)}`.
pub fn derivative_name(order: usize) -> String {
    match order {
        0 => "f".to_string(),
        1..=3 => format!("f{}", "'".repeat(order)),
        _ => format!("f^{{({})}}", order),
    }
}

/// An integral sign with its differential around `integrand`.
pub fn integral(integrand: &str, var: &str, bounds: Option<(&str, &str)>) -> String {
    match bounds {
        Some((lower, upper)) => format!("\\int_{{{}}}^{{{}}} {} \\, d{}", lower, upper, integrand, var),
        None => format!("\\int {} \\, d{}", integrand, var),
    }
}

/// The limit operator `\lim_{x \to p}`, with a superscript for one-sided limits.
pub fn limit_operator(var: &str, point: &str, direction: Direction) -> String {
    format!("\\lim_{{{} \\to {}{}}}", var, point, direction.superscript())
}

/// The summation operator `\sum_{n = a}^{b}`.
pub fn sum_operator(var: &str, lower: &str, upper: &str) -> String {
    format!("\\sum_{{{} = {}}}^{{{}}}", var, lower, upper)
}

/// Rounds a value to [`APPROXIMATION_DIGITS`] fractional digits.
pub fn approximate(value: f64) -> String {
    let text = format!("{:.*}", APPROXIMATION_DIGITS, value);

    // avoid `-0.000000`
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        format!("{:.*}", APPROXIMATION_DIGITS, 0.0)
    } else {
        text
    }
}

/// Renders a number, without a fractional part if it is an integer.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use pretty_assertions::assert_eq;

    #[test]
    fn derivative_notation() {
        assert_eq!(derivative_operator("x", 1), "\\frac{d}{dx}");
        assert_eq!(derivative_operator("t", 3), "\\frac{d^{3}}{dt^{3}}");
        assert_eq!(derivative_name(2), "f''");
        assert_eq!(derivative_name(5), "f^{(5)}");
    }

    #[test]
    fn integral_notation() {
        assert_eq!(integral("x^{2}", "x", None), "\\int x^{2} \\, dx");
        assert_eq!(integral("x^{2}", "x", Some(("0", "3"))), "\\int_{0}^{3} x^{2} \\, dx");
    }

    #[test]
    fn limit_notation() {
        assert_eq!(limit_operator("x", "0", Direction::TwoSided), "\\lim_{x \\to 0}");
        assert_eq!(limit_operator("x", "0", Direction::Right), "\\lim_{x \\to 0^+}");
        assert_eq!(limit_operator("x", "\\infty", Direction::Left), "\\lim_{x \\to \\infty^-}");
    }

    #[test]
    fn sum_notation() {
        assert_eq!(sum_operator("n", "1", "10"), "\\sum_{n = 1}^{10}");
    }

    #[test]
    fn approximations() {
        assert_eq!(approximate(9.0), "9.000000");
        assert_eq!(approximate(std::f64::consts::PI), "3.141593");
        assert_eq!(approximate(-1e-9), "0.000000");
    }

    #[test]
    fn numbers() {
        assert_eq!(number(3.5), "3.5");
        assert_eq!(number(-4.0), "-4");
        assert_eq!(number(0.1), "0.1");
    }

    #[test]
    fn grouping() {
        let engine = SymbolicEngine;
        let sum = engine.parse("x + 1").unwrap();
        assert_eq!(grouped(&engine, &sum), format!("\\left({}\\right)", engine.latex(&sum)));

        let power = engine.parse("x^2").unwrap();
        assert_eq!(grouped(&engine, &power), "x^{2}");
    }

    #[test]
    fn idempotent() {
        let engine = SymbolicEngine;
        let expr = engine.parse("sin(x)/x + sqrt(x^2 + 1)").unwrap();
        assert_eq!(render(&engine, &expr), render(&engine, &expr));
    }
}
