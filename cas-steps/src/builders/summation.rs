use cas_compute::symbolic::SymExpr;
use crate::cas::Cas;
use crate::config::StepConfig;
use crate::error::Error;
use crate::format::{render, sum_operator};
use crate::step::{Answer, Walkthrough};
use super::{check_variable, rendered};

/// Explains the finite sum of `input` for `var` from `lower` to `upper`.
///
/// The terms are listed one by one if `upper - lower` is below
/// [`StepConfig::expansion_threshold`].
pub fn summation(
    cas: &impl Cas,
    config: &StepConfig,
    input: &str,
    var: &str,
    lower: &str,
    upper: &str,
) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    let expr = cas.parse(input)?;
    let lower = cas.parse(lower)?;
    let upper = cas.parse(upper)?;
    let value = cas.summation(&expr, var, &lower, &upper)?;

    let (lower_text, upper_text) = (render(cas, &lower), render(cas, &upper));
    let operator = format!("{} {}", sum_operator(var, &lower_text, &upper_text), render(cas, &expr));

    let mut walkthrough = Walkthrough::builder("Summation");
    walkthrough.explain(format!(
        "We compute the sum of ${}$ from ${v} = {}$ to ${v} = {}$.",
        render(cas, &expr),
        lower_text,
        upper_text,
        v = var,
    ));
    walkthrough.formula("", operator.clone());

    let range = lower
        .as_integer()
        .and_then(|n| n.to_i64())
        .zip(upper.as_integer().and_then(|n| n.to_i64()));
    if let Some((first, last)) = range {
        let threshold = i64::try_from(config.expansion_threshold).unwrap_or(i64::MAX);
        if first <= last && last - first < threshold {
            walkthrough.explain("Expanding the terms of the sum:");
            for k in first..=last {
                let term = cas.substitute(&expr, var, &SymExpr::from(k));
                walkthrough.formula("", format!(
                    "\\text{{For }} {} = {}: {}",
                    var,
                    k,
                    render(cas, &term),
                ));
            }
        }
    }

    walkthrough.result("The value of the sum is:", format!("{} = {}", operator, render(cas, &value)));
    tracing::debug!(%expr, var, %lower, %upper, %value, "summation_walkthrough");
    Ok(walkthrough.finish(Answer::Expr(rendered(cas, &value))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use crate::step::{Rendered, Role};
    use pretty_assertions::assert_eq;

    fn terms(walkthrough: &Walkthrough) -> usize {
        walkthrough
            .steps_with_role(Role::Formula)
            .filter(|step| step.formula.as_deref().is_some_and(|f| f.starts_with("\\text{For }")))
            .count()
    }

    #[test]
    fn squares() {
        let walkthrough = summation(&SymbolicEngine, &StepConfig::default(), "k^2", "k", "1", "10").unwrap();
        assert_eq!(walkthrough.answer, Answer::Expr(Rendered {
            text: "385".to_string(),
            latex: "385".to_string(),
        }));
        assert_eq!(terms(&walkthrough), 10);
        assert_eq!(
            walkthrough.steps.last().and_then(|step| step.formula.as_deref()),
            Some("\\sum_{k = 1}^{10} k^{2} = 385"),
        );
    }

    #[test]
    fn long_sums_are_not_expanded() {
        let walkthrough = summation(&SymbolicEngine, &StepConfig::default(), "n", "n", "1", "100").unwrap();
        assert_eq!(terms(&walkthrough), 0);
        assert_eq!(walkthrough.steps.last().and_then(|step| step.formula.as_deref()), Some("\\sum_{n = 1}^{100} n = 5050"));
    }

    #[test]
    fn exact_rationals() {
        let walkthrough = summation(&SymbolicEngine, &StepConfig::default(), "1/k", "k", "1", "3").unwrap();
        let Answer::Expr(Rendered { text, .. }) = &walkthrough.answer else {
            panic!("expected an expression");
        };
        assert_eq!(SymbolicEngine.parse(text).unwrap(), SymExpr::fraction(11, 6));
    }

    #[test]
    fn non_integer_bound() {
        let err = summation(&SymbolicEngine, &StepConfig::default(), "k", "k", "1/2", "3").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
