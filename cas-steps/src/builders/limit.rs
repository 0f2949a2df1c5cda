use crate::cas::Cas;
use crate::detect::{detect, Detection, Form};
use crate::error::Error;
use crate::format::{limit_operator, render};
use crate::request::Direction;
use crate::step::{Answer, Walkthrough};
use super::{check_variable, rendered};

/// Explains the limit of `input` as `var` approaches `point` from `direction`.
///
/// The detector only selects the narrative. The value always comes from [`Cas::limit`].
pub fn limit(
    cas: &impl Cas,
    input: &str,
    var: &str,
    point: &str,
    direction: Direction,
) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    let expr = cas.parse(input)?;
    let point = cas.parse(point)?;

    let point_text = render(cas, &point);
    let operator = format!("{} {}", limit_operator(var, &point_text, direction), render(cas, &expr));

    let mut walkthrough = Walkthrough::builder("Limit");
    walkthrough.explain(format!(
        "We compute the limit of the function as ${}$ approaches ${}$:",
        var,
        point_text,
    ));
    walkthrough.formula("", format!("f({}) = {}", var, render(cas, &expr)));
    walkthrough.formula("", operator.clone());

    match detect(cas, &expr, var, &point, direction) {
        Detection::Indeterminate(form) => {
            match form {
                Form::ZeroOverZero | Form::InfinityOverInfinity => walkthrough.explain(format!(
                    "Direct substitution gives the indeterminate form ${}$.",
                    form,
                )),
                Form::Undefined => walkthrough.explain(
                    "Direct substitution involves an infinite or undefined value, an indeterminate form.",
                ),
            }
            walkthrough.explain(
                "The limit is resolved with analytic techniques, such as L'Hôpital's rule.",
            );
        },
        Detection::Determinate { substituted: Some(value) } => {
            walkthrough.formula(
                "Trying direct substitution:",
                format!("f({}) = {}", point_text, render(cas, &value)),
            );
        },
        Detection::Determinate { substituted: None } => {
            walkthrough.explain("Direct substitution does not give a finite value.");
        },
        Detection::Unknown => {
            walkthrough.explain(
                "Direct substitution is not straightforward. The limit is computed directly.",
            );
        },
    }

    let result = cas.limit(&expr, var, &point, direction)?;
    walkthrough.result("**Final result:**", format!("{} = {}", operator, render(cas, &result)));

    tracing::debug!(%expr, var, %point, ?direction, %result, "limit_walkthrough");
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
    fn sin_x_over_x() {
        let walkthrough = limit(&SymbolicEngine, "sin(x)/x", "x", "0", Direction::TwoSided).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative == "Direct substitution gives the indeterminate form $\\frac{0}{0}$."));
        assert_eq!(answer_text(&walkthrough), "1");
    }

    #[test]
    fn direct_substitution() {
        let walkthrough = limit(&SymbolicEngine, "x^2 + 1", "x", "2", Direction::TwoSided).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Formula)
            .any(|step| step.formula.as_deref() == Some("f(2) = 5")));
        assert_eq!(answer_text(&walkthrough), "5");
    }

    #[test]
    fn one_sided() {
        let walkthrough = limit(&SymbolicEngine, "1/x", "x", "0", Direction::Right).unwrap();
        assert_eq!(answer_text(&walkthrough), "oo");
        let last = walkthrough.steps.last().unwrap();
        assert!(last.formula.as_deref().unwrap().starts_with("\\lim_{x \\to 0^+}"));

        let walkthrough = limit(&SymbolicEngine, "1/x", "x", "0", Direction::Left).unwrap();
        assert_eq!(answer_text(&walkthrough), "-oo");
    }

    #[test]
    fn at_infinity() {
        let walkthrough = limit(&SymbolicEngine, "(2*x^2 + 1)/(x^2 + 3)", "x", "oo", Direction::TwoSided).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative.contains("\\frac{\\infty}{\\infty}")));
        assert_eq!(answer_text(&walkthrough), "2");
    }

    #[test]
    fn two_sided_disagreement() {
        let err = limit(&SymbolicEngine, "1/x", "x", "0", Direction::TwoSided).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn sub_limit_fails() {
        let walkthrough = limit(&SymbolicEngine, "sin(x)/x", "x", "oo", Direction::TwoSided).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative.starts_with("Direct substitution is not straightforward.")));
        assert_eq!(answer_text(&walkthrough), "0");
    }

    #[test]
    fn substitution_not_finite() {
        let walkthrough = limit(&SymbolicEngine, "x*ln(x)", "x", "0", Direction::Right).unwrap();
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative == "Direct substitution does not give a finite value."));
        assert!(!walkthrough
            .steps_with_role(Role::Formula)
            .any(|step| step.narrative == "Trying direct substitution:"));
        assert_eq!(answer_text(&walkthrough), "0");
    }
}
