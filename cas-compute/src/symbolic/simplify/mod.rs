//! Reduction of expressions to a canonical form.
//!
//! [`normalize`] applies the rules in [`rules`] bottom-up: every child of a node is normalized
//! first, then the rules are applied to the node itself until none of them applies. The result is
//! a canonical form in which like terms and factors are combined, numbers are folded exactly,
//! powers and known function values are evaluated, and terms / factors appear in a fixed order.
//! Two expressions that normalize to strictly equal forms are semantically equal.
//!
//! [`simplify`] goes further and also considers the expanded form of the expression, returning
//! whichever candidate has the lowest [complexity](SymExpr::complexity).

pub mod expand;
pub mod fraction;
pub(crate) mod number;
pub mod rules;
pub mod step;

use crate::symbolic::{expr::{Primary, SymExpr}, step_collector::StepCollector};
use step::Step;

pub use expand::expand;
pub use fraction::as_numer_denom;

/// The maximum number of rewrites applied to a single node.
const MAX_REWRITES: usize = 64;

/// Normalizes the children of the expression, without applying rules to the expression itself.
fn normalize_children(expr: SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => SymExpr::call(
            name,
            args.iter().map(|arg| normalize_with(arg, step_collector)).collect(),
        ),
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter().map(|term| normalize_with(term, step_collector)).collect(),
        ),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter().map(|factor| normalize_with(factor, step_collector)).collect(),
        ),
        SymExpr::Exp(base, exp) => {
            normalize_with(&base, step_collector).pow(normalize_with(&exp, step_collector))
        },
        SymExpr::Primary(_) | SymExpr::Special(_) => expr,
    }
}

/// Normalizes the expression, reporting every rewrite to the given [`StepCollector`].
pub fn normalize_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut expr = normalize_children(expr.clone(), step_collector);
    for _ in 0..MAX_REWRITES {
        match rules::all(&expr, step_collector) {
            // a rule can produce children that are not normalized yet
            Some(rewritten) => expr = normalize_children(rewritten, step_collector),
            None => return expr,
        }
    }

    tracing::warn!(
        target: "simplify",
        expr = %expr,
        budget = MAX_REWRITES,
        "rewrite_budget_exceeded"
    );
    expr
}

/// Normalizes the expression and returns the steps taken.
pub fn normalize_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let normalized = normalize_with(expr, &mut steps);
    (normalized, steps)
}

/// Reduces the expression to its canonical form.
///
/// ```
/// use cas_compute::symbolic::{expr::SymExpr, simplify::normalize};
///
/// let x = SymExpr::symbol("x");
/// let expr = x.clone() + x.clone() + SymExpr::integer(2) * x;
/// assert_eq!(normalize(&expr).to_string(), "4*x");
/// ```
pub fn normalize(expr: &SymExpr) -> SymExpr {
    normalize_with(expr, &mut ())
}

/// Simplifies the expression, returning the least complex of its normalized and expanded forms.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    let normalized = normalize(expr);
    let expanded = expand(&normalized);
    tracing::debug!(
        target: "simplify",
        normalized_nodes = normalized.complexity(),
        expanded_nodes = expanded.complexity(),
        "simplify_candidates"
    );
    if expanded.complexity() < normalized.complexity() {
        expanded
    } else {
        normalized
    }
}

/// Returns true if the two expressions normalize to strictly equal forms.
pub fn equivalent(lhs: &SymExpr, rhs: &SymExpr) -> bool {
    let difference = normalize(&(lhs.clone() - rhs.clone()));
    difference.is_zero() || expand(&difference).is_zero()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::symbolic::expr::{from_ast, Special};
    use cas_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;

    /// Parses and normalizes an expression.
    pub(crate) fn parse(input: &str) -> SymExpr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        normalize(&from_ast(&ast).unwrap())
    }

    /// Parses an expression without normalizing it.
    pub(crate) fn parse_raw(input: &str) -> SymExpr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        from_ast(&ast).unwrap()
    }

    fn norm(input: &str) -> String {
        parse(input).to_string()
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(norm("x + x + x"), "3*x");
        assert_eq!(norm("2x + 3x - 5x"), "0");
        assert_eq!(norm("x + 1 + x^2 + 2"), "x^2 + x + 3");
    }

    #[test]
    fn fold_rationals() {
        assert_eq!(norm("1/2 + 1/3"), "5*6^(-1)");
        assert_eq!(parse("1/2 + 1/3"), SymExpr::fraction(5, 6));
        assert_eq!(parse("6/4"), SymExpr::fraction(3, 2));
        assert_eq!(parse("2^-2"), SymExpr::fraction(1, 4));
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(norm("x * x^2"), "x^3");
        assert_eq!(norm("x / x"), "1");
        assert_eq!(norm("x^2 / x"), "x");
        assert_eq!(norm("2 * x * 3"), "6*x");
    }

    #[test]
    fn distribute_numeric_coefficient() {
        assert_eq!(norm("2(x + 1)"), "2*x + 2");
        assert_eq!(norm("-(x - 1)"), "-x + 1");
    }

    #[test]
    fn roots() {
        assert_eq!(parse("sqrt(4)"), SymExpr::integer(2));
        assert_eq!(norm("sqrt(8)"), "2*2^(2^(-1))");
        assert_eq!(parse("sqrt(2) * sqrt(2)"), SymExpr::integer(2));
        assert_eq!(parse("sqrt(x)^2"), SymExpr::symbol("x"));
    }

    #[test]
    fn function_values() {
        assert_eq!(parse("sin(0)"), SymExpr::zero());
        assert_eq!(parse("cos(pi)"), SymExpr::integer(-1));
        assert_eq!(parse("sin(pi/6)"), SymExpr::fraction(1, 2));
        assert_eq!(parse("ln(e)"), SymExpr::one());
        assert_eq!(parse("exp(ln(x))"), SymExpr::symbol("x"));
        assert_eq!(parse("exp(0)"), SymExpr::one());
        assert_eq!(parse("cos(-x)"), parse("cos(x)"));
        assert_eq!(parse("sin(-x)"), parse("-sin(x)"));
    }

    #[test]
    fn exponentials_combine() {
        assert_eq!(parse("exp(x) * exp(2x)"), parse("exp(3x)"));
        assert_eq!(parse("e^x"), parse("exp(x)"));
        assert_eq!(parse("e^x * e^-x"), SymExpr::one());
    }

    #[test]
    fn infinities() {
        assert_eq!(parse("oo + 1"), SymExpr::Special(Special::Infinity));
        assert_eq!(parse("-oo"), SymExpr::Special(Special::NegInfinity));
        assert_eq!(parse("oo - oo"), SymExpr::Special(Special::Undefined));
        assert_eq!(parse("0 * oo"), SymExpr::Special(Special::Undefined));
        assert_eq!(parse("1/0"), SymExpr::Special(Special::ComplexInfinity));
        assert_eq!(parse("exp(-oo)"), SymExpr::zero());
        assert_eq!(parse("1/oo"), SymExpr::zero());
    }

    #[test]
    fn idempotent() {
        for input in ["x^2 - 4x + 4", "sin(x)^2 + cos(x)/x", "(x + 1)^3 / 2", "3exp(-2t) + t"] {
            let once = parse(input);
            assert_eq!(normalize(&once), once, "{input}");
        }
    }

    #[test]
    fn simplify_prefers_expanded_form() {
        let simplified = simplify(&parse_raw("(x + 1)^2 - x^2"));
        assert_eq!(simplified, parse("2x + 1"));
    }

    #[test]
    fn equivalence() {
        assert!(equivalent(&parse("(x + 1)^2"), &parse("x^2 + 2x + 1")));
        assert!(!equivalent(&parse("(x + 1)^2"), &parse("x^2 + 1")));
    }

    #[test]
    fn steps_are_collected() {
        let (normalized, steps) = normalize_with_steps(&parse_raw("x + x"));
        assert_eq!(normalized.to_string(), "2*x");
        assert!(steps.contains(&Step::CombineLikeTerms));
    }
}
