use crate::cas::Cas;
use crate::classify::{classify, Classification};
use crate::error::Error;
use crate::format::{approximate, integral as integral_sign, render};
use crate::request::Direction;
use crate::step::{Answer, Walkthrough};
use super::{check_variable, rendered};

/// Explains the indefinite integral of `input`, or the definite integral between `bounds`.
///
/// The bounds may be infinite (`oo`, `-oo`); the primitive is then evaluated with a one-sided
/// limit towards the inside of the interval.
pub fn integral(
    cas: &impl Cas,
    input: &str,
    var: &str,
    bounds: Option<(&str, &str)>,
) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    let expr = cas.parse(input)?;
    let bounds = match bounds {
        Some((lower, upper)) => Some((cas.parse(lower)?, cas.parse(upper)?)),
        None => None,
    };

    let mut walkthrough = Walkthrough::builder("Integral");
    let integrand = render(cas, &expr);
    walkthrough.explain("We compute the integral of the function:");
    walkthrough.formula("", format!("f({}) = {}", var, integrand));

    if let Classification::Sum(terms) = classify(&expr, var) {
        walkthrough.explain(format!(
            "Apply the sum rule for integrals: $\\int (u + v) \\, d{v} = \\int u \\, d{v} + \\int v \\, d{v}$.",
            v = var,
        ));
        for term in terms {
            let primitive = cas.integrate(term, var)?;
            walkthrough.formula("", format!(
                "{} = {}",
                integral_sign(&render(cas, term), var, None),
                render(cas, &primitive),
            ));
        }
    }

    let primitive = cas.integrate(&expr, var)?;
    let rendered_primitive = render(cas, &primitive);
    walkthrough.result(
        "The primitive (indefinite integral) of the function is:",
        format!("F({}) = {} = {}", var, integral_sign(&integrand, var, None), rendered_primitive),
    );

    let Some((lower, upper)) = bounds else {
        walkthrough.result(
            "**Final result (indefinite integral):**",
            format!("{} = {} + C", integral_sign(&integrand, var, None), rendered_primitive),
        );
        tracing::debug!(%expr, var, %primitive, "indefinite_integral_walkthrough");
        return Ok(walkthrough.finish(Answer::Expr(rendered(cas, &primitive))));
    };

    let at_upper = cas.evaluate_bound(&primitive, var, &upper, Direction::Left)?;
    let at_lower = cas.evaluate_bound(&primitive, var, &lower, Direction::Right)?;
    let result = cas.simplify(&(at_upper.clone() - at_lower.clone()));

    let (lower_text, upper_text) = (render(cas, &lower), render(cas, &upper));
    let definite = integral_sign(&format!("f({})", var), var, Some((&lower_text, &upper_text)));
    walkthrough.formula(
        "For the definite integral, apply the fundamental theorem of calculus:",
        format!("{} = F({}) - F({})", definite, upper_text, lower_text),
    );
    walkthrough.formula(
        "Evaluating the primitive at the bounds:",
        format!("F({}) = {}", upper_text, render(cas, &at_upper)),
    );
    walkthrough.formula("", format!("F({}) = {}", lower_text, render(cas, &at_lower)));
    walkthrough.result(
        "**Final result (definite integral):**",
        format!("{} = {}", definite, render(cas, &result)),
    );

    if result.free_symbols().is_empty() {
        if let Some(value) = cas.evaluate(&result, var, 0.0) {
            walkthrough.result("", format!("\\approx {}", approximate(value)));
        }
    }

    tracing::debug!(%expr, var, %lower, %upper, %result, "definite_integral_walkthrough");
    Ok(walkthrough.finish(Answer::Expr(rendered(cas, &result))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use crate::step::{Rendered, Role};
    use pretty_assertions::assert_eq;

    fn answer_text(walkthrough: &Walkthrough) -> &str {
        match &walkthrough.answer {
            Answer::Expr(Rendered { text, .. }) => text,
            other => panic!("expected an expression, got {:?}", other),
        }
    }

    #[test]
    fn indefinite() {
        let walkthrough = integral(&SymbolicEngine, "x^2 + sin(x)", "x", None).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative.starts_with("Apply the sum rule")));

        // the function, then one formula per addend
        assert_eq!(walkthrough.steps_with_role(Role::Formula).count(), 3);

        let last = walkthrough.steps.last().unwrap();
        assert_eq!(last.role, Role::Result);
        assert!(last.formula.as_deref().unwrap().ends_with(" + C"));
    }

    #[test]
    fn definite() {
        let walkthrough = integral(&SymbolicEngine, "x^2", "x", Some(("0", "3"))).unwrap();
        assert_eq!(answer_text(&walkthrough), "9");

        let last = walkthrough.steps.last().unwrap();
        assert_eq!(last.formula.as_deref(), Some("\\approx 9.000000"));
        assert!(walkthrough
            .steps_with_role(Role::Formula)
            .any(|step| step.formula.as_deref() == Some("F(3) = 9")));
    }

    #[test]
    fn logarithm_on_negative_interval() {
        let walkthrough = integral(&SymbolicEngine, "1/x", "x", Some(("-2", "-1"))).unwrap();
        assert_eq!(
            SymbolicEngine.parse(answer_text(&walkthrough)).unwrap(),
            SymbolicEngine.parse("-ln(2)").unwrap(),
        );
        assert_eq!(
            walkthrough.steps.last().unwrap().formula.as_deref(),
            Some("\\approx -0.693147"),
        );
    }

    #[test]
    fn infinite_bound() {
        let walkthrough = integral(&SymbolicEngine, "exp(-x)", "x", Some(("0", "oo"))).unwrap();
        assert_eq!(answer_text(&walkthrough), "1");
    }

    #[test]
    fn symbolic_bound_has_no_approximation() {
        let walkthrough = integral(&SymbolicEngine, "2*x", "x", Some(("0", "a"))).unwrap();
        assert_eq!(answer_text(&walkthrough), "a^2");
        assert!(!walkthrough.steps.last().unwrap().formula.as_deref().unwrap().starts_with("\\approx"));
    }

    #[test]
    fn unsupported() {
        let err = integral(&SymbolicEngine, "exp(x^2)", "x", None).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
