use cas_compute::symbolic::SymExpr;
use crate::cas::Cas;
use crate::classify::{classify, Classification, Outer};
use crate::config::StepConfig;
use crate::error::Error;
use crate::format::{derivative_name, derivative_operator, grouped, render};
use crate::step::{Answer, Walkthrough, WalkthroughBuilder};
use super::{check_order, check_variable, ordinal, rendered};

/// Compares the product rule combination with the derivative computed by the engine at the sample
/// points of the configuration. A mismatch is logged; the engine's derivative stays authoritative.
fn cross_check(cas: &impl Cas, config: &StepConfig, combination: &SymExpr, derivative: &SymExpr, var: &str) {
    for &point in &config.cross_check_points {
        let (Some(expected), Some(actual)) = (
            cas.evaluate(derivative, var, point),
            cas.evaluate(combination, var, point),
        ) else {
            continue;
        };
        let tolerance = 1e-9 * expected.abs().max(1.0);
        if (expected - actual).abs() > tolerance {
            tracing::warn!(%combination, %derivative, point, expected, actual, "product_rule_mismatch");
        }
    }
}

/// Explains the rule that applies to `current`, the expression differentiated in iteration `i` of
/// `order`. `next` is its derivative, computed by the engine.
fn explain_rule(
    cas: &impl Cas,
    config: &StepConfig,
    walkthrough: &mut WalkthroughBuilder,
    current: &SymExpr,
    next: &SymExpr,
    var: &str,
    i: usize,
    order: usize,
) -> Result<(), Error> {
    let label = format!("**{} derivative:**", ordinal(i));
    match classify(current, var) {
        Classification::Sum(terms) => {
            walkthrough.explain(format!("{} apply the sum rule: $(u + v)' = u' + v'$.", label));
            for term in terms {
                let term_derivative = cas.differentiate(term, var, 1)?;
                walkthrough.formula("", format!(
                    "{} {} = {}",
                    derivative_operator(var, 1),
                    grouped(cas, term),
                    render(cas, &term_derivative),
                ));
            }
        },
        Classification::Product(u, v) => {
            let du = cas.differentiate(u, var, 1)?;
            let dv = cas.differentiate(v, var, 1)?;
            walkthrough.explain(format!(
                "{} apply the product rule: $(u \\cdot v)' = u' \\cdot v + u \\cdot v'$.",
                label,
            ));
            walkthrough.formula("Where:", format!(
                "u = {}, \\quad u' = {}, \\quad v = {}, \\quad v' = {}",
                render(cas, u),
                render(cas, &du),
                render(cas, v),
                render(cas, &dv),
            ));

            let combination = du.clone() * v.clone() + u.clone() * dv.clone();
            cross_check(cas, config, &combination, next, var);
            let formula = format!(
                "{}({}) = {} \\cdot {} + {} \\cdot {}",
                derivative_name(i),
                var,
                grouped(cas, &du),
                grouped(cas, v),
                grouped(cas, u),
                grouped(cas, &dv),
            );
            if order == 1 {
                walkthrough.result("Substituting into the formula:", formula);
            } else {
                walkthrough.formula("Substituting into the formula:", formula);
            }
        },
        Classification::Power { .. } => {
            walkthrough.explain(format!(
                "{} apply the power rule: $(u^n)' = n \\cdot u^{{n-1}} \\cdot u'$.",
                label,
            ));
        },
        Classification::Chain { outer: Outer::Power(_), inner } => {
            walkthrough.explain(format!(
                "{} apply the exponential rule and the chain rule, with exponent ${}$.",
                label,
                render(cas, inner),
            ));
        },
        Classification::Chain { outer: Outer::Call(name), inner } => {
            walkthrough.explain(format!(
                "{} apply the chain rule to $\\mathrm{{{}}}$: $(f(g))' = f'(g) \\cdot g'$, with $g = {}$.",
                label,
                name,
                render(cas, inner),
            ));
        },
        Classification::Leaf => {},
    }
    Ok(())
}

/// Explains the derivative of the given order.
///
/// Every iteration classifies the current expression afresh, since the engine may restructure it
/// between orders. The derivative shown as the result comes from a single call to
/// [`Cas::differentiate`] with the full order.
pub fn derivative(
    cas: &impl Cas,
    config: &StepConfig,
    input: &str,
    var: &str,
    order: usize,
) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    check_order(order, config)?;
    let expr = cas.parse(input)?;

    let mut walkthrough = Walkthrough::builder("Derivative");
    walkthrough.explain(format!("We compute the derivative of order {} of the function:", order));
    walkthrough.formula("", format!("f({}) = {}", var, render(cas, &expr)));

    let mut current = expr.clone();
    for i in 1..=order {
        let next = cas.differentiate(&current, var, 1)?;
        explain_rule(cas, config, &mut walkthrough, &current, &next, var, i, order)?;

        if order > 1 && i < order {
            walkthrough.result(
                format!("The {} derivative is:", ordinal(i)),
                format!("{} f({}) = {}", derivative_operator(var, i), var, render(cas, &next)),
            );
        }
        current = next;
    }

    let result = cas.differentiate(&expr, var, order)?;
    walkthrough.result(
        "**Final result:**",
        format!("{}({}) = {}", derivative_name(order), var, render(cas, &result)),
    );

    let simplified = cas.simplify(&result);
    if simplified != result {
        walkthrough.result(
            "Simplified:",
            format!("{}({}) = {}", derivative_name(order), var, render(cas, &simplified)),
        );
    }

    tracing::debug!(%expr, var, order, %simplified, "derivative_walkthrough");
    Ok(walkthrough.finish(Answer::Expr(rendered(cas, &simplified))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use crate::step::Role;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    fn answer(walkthrough: &Walkthrough) -> SymExpr {
        match &walkthrough.answer {
            Answer::Expr(rendered) => SymbolicEngine.parse(&rendered.text).unwrap(),
            other => panic!("expected an expression, got {:?}", other),
        }
    }

    fn explanations(walkthrough: &Walkthrough) -> Vec<&str> {
        walkthrough
            .steps_with_role(Role::Explanation)
            .map(|step| step.narrative.as_str())
            .collect()
    }

    #[test]
    fn sum_rule() {
        let config = StepConfig::default();
        let walkthrough = derivative(&SymbolicEngine, &config, "x^3 + 2*x", "x", 1).unwrap();
        assert!(explanations(&walkthrough).iter().any(|line| line.contains("sum rule")));

        // one formula per addend besides the function itself
        assert_eq!(walkthrough.steps_with_role(Role::Formula).count(), 3);
        assert_eq!(answer(&walkthrough), SymbolicEngine.parse("3*x^2 + 2").unwrap());
    }

    #[test]
    fn product_rule() {
        let config = StepConfig::default();
        let walkthrough = derivative(&SymbolicEngine, &config, "x^3*cos(x)", "x", 1).unwrap();
        let lines = explanations(&walkthrough);
        assert!(lines.iter().any(|line| line.contains("product rule")));
        assert!(walkthrough
            .steps_with_role(Role::Formula)
            .any(|step| step.narrative == "Where:"
                && step.formula.as_deref().is_some_and(|f| f.starts_with("u = ") && f.contains("v' = "))));
        assert!(walkthrough
            .steps_with_role(Role::Result)
            .any(|step| step.narrative == "Substituting into the formula:"));

        // at higher orders the combination is an intermediate formula
        let walkthrough = derivative(&SymbolicEngine, &config, "x^3*cos(x)", "x", 2).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Formula)
            .any(|step| step.narrative == "Substituting into the formula:"));

        let result = answer(&walkthrough);
        let engine = SymbolicEngine;
        for x in [0.3, 1.1, 2.0] {
            let expected = 3.0 * x * x * f64::cos(x) - x * x * x * f64::sin(x);
            assert_float_absolute_eq!(engine.evaluate(&result, "x", x).unwrap(), expected, 1e-9);
        }
    }

    #[test]
    fn power_and_chain() {
        let config = StepConfig::default();
        let walkthrough = derivative(&SymbolicEngine, &config, "x^5", "x", 1).unwrap();
        assert!(explanations(&walkthrough).iter().any(|line| line.contains("power rule")));

        let walkthrough = derivative(&SymbolicEngine, &config, "sin(x^2)", "x", 1).unwrap();
        assert!(explanations(&walkthrough).iter().any(|line| line.contains("chain rule")));

        let walkthrough = derivative(&SymbolicEngine, &config, "2^x", "x", 1).unwrap();
        assert!(explanations(&walkthrough).iter().any(|line| line.contains("exponential rule")));
    }

    #[test]
    fn intermediate_results() {
        let config = StepConfig::default();
        let walkthrough = derivative(&SymbolicEngine, &config, "x^4", "x", 3).unwrap();
        let results = walkthrough.steps_with_role(Role::Result).collect::<Vec<_>>();

        // 1st and 2nd intermediate derivatives, then the final result
        assert_eq!(results[0].narrative, "The 1st derivative is:");
        assert!(results[1].formula.as_deref().unwrap().starts_with("\\frac{d^{2}}{dx^{2}} f(x) = "));
        assert_eq!(results[2].narrative, "**Final result:**");
        assert_eq!(answer(&walkthrough), SymbolicEngine.parse("24*x").unwrap());
    }

    #[test]
    fn orders_compose() {
        let config = StepConfig::default();
        let engine = SymbolicEngine;
        for f in ["x^3*cos(x)", "exp(2*x) + ln(x)", "x^6 - 3*x^2"] {
            for n in 1..4 {
                let higher = derivative(&engine, &config, f, "x", n + 1).unwrap();
                let lower = derivative(&engine, &config, f, "x", n).unwrap();
                let once_more = engine.differentiate(&answer(&lower), "x", 1).unwrap();
                for x in [0.4, 1.7] {
                    assert_float_absolute_eq!(
                        engine.evaluate(&answer(&higher), "x", x).unwrap(),
                        engine.evaluate(&once_more, "x", x).unwrap(),
                        1e-6
                    );
                }
            }
        }
    }

    #[test]
    fn polynomial_round_trip() {
        let config = StepConfig::default();
        let engine = SymbolicEngine;
        let p = engine.parse("4*x^3 - 2*x^2 + 7*x - 5").unwrap();
        let walkthrough = derivative(&engine, &config, "4*x^3 - 2*x^2 + 7*x - 5", "x", 1).unwrap();
        let primitive = engine.integrate(&answer(&walkthrough), "x").unwrap();
        let restored = primitive + SymExpr::integer(-5);
        for x in [-1.5, 0.0, 0.8, 2.25] {
            assert_float_absolute_eq!(
                engine.evaluate(&restored, "x", x).unwrap(),
                engine.evaluate(&p, "x", x).unwrap(),
                1e-9
            );
        }
    }

    #[test]
    fn simplified_step() {
        let config = StepConfig::default();
        let simplified = |walkthrough: &Walkthrough| walkthrough
            .steps_with_role(Role::Result)
            .filter(|step| step.narrative == "Simplified:")
            .count();

        // `3(x + 1)^2 - 3x^2` expands to `6x + 3`
        let walkthrough = derivative(&SymbolicEngine, &config, "(x + 1)^3 - x^3", "x", 1).unwrap();
        assert_eq!(simplified(&walkthrough), 1);
        assert_eq!(walkthrough.steps.last().unwrap().narrative, "Simplified:");
        assert_eq!(answer(&walkthrough), SymbolicEngine.parse("6*x + 3").unwrap());

        let walkthrough = derivative(&SymbolicEngine, &config, "x^5", "x", 1).unwrap();
        assert_eq!(simplified(&walkthrough), 0);
        assert_eq!(walkthrough.steps.last().unwrap().narrative, "**Final result:**");
    }

    #[test]
    fn invalid_order() {
        let config = StepConfig::default();
        let err = derivative(&SymbolicEngine, &config, "x^2", "x", 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn parse_error() {
        let config = StepConfig::default();
        let err = derivative(&SymbolicEngine, &config, "x^2 +", "x", 1).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
