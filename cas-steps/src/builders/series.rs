use crate::cas::Cas;
use crate::config::StepConfig;
use crate::error::Error;
use crate::format::render;
use crate::request::Direction;
use crate::step::{Answer, Walkthrough};
use super::{check_order, check_variable, rendered};

/// Explains the Taylor polynomial of `input` around `point`, up to the term of degree `order`.
///
/// At most [`StepConfig::series_narrative_terms`] derivatives are shown; the polynomial itself
/// always has all `order + 1` terms.
pub fn series(
    cas: &impl Cas,
    config: &StepConfig,
    input: &str,
    var: &str,
    point: &str,
    order: usize,
) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    check_order(order, config)?;
    let expr = cas.parse(input)?;
    let point = cas.parse(point)?;
    let point_text = render(cas, &point);

    let mut walkthrough = Walkthrough::builder("Taylor Series");
    walkthrough.explain(format!(
        "We expand $f({v}) = {}$ in a Taylor series around ${v}_0 = {}$ up to order {}.",
        render(cas, &expr),
        point_text,
        order,
        v = var,
    ));
    walkthrough.formula(
        "The Taylor series formula is:",
        format!(
            "f({v}) \\approx \\sum_{{k=0}}^{{n}} \\frac{{f^{{(k)}}({v}_0)}}{{k!}}({v} - {v}_0)^k",
            v = var,
        ),
    );
    walkthrough.explain(format!("Computing the derivatives and their values at ${}_0$:", var));

    let shown = config
        .series_narrative_terms
        .map_or(order + 1, |terms| terms.min(order + 1));
    let mut derivative = expr.clone();
    for k in 0..shown {
        if k > 0 {
            derivative = cas.differentiate(&derivative, var, 1)?;
        }
        let mut value = cas.substitute(&derivative, var, &point);
        if !value.is_finite() {
            value = cas.limit(&derivative, var, &point, Direction::TwoSided)?;
        }
        walkthrough.formula("", format!(
            "f^{{({k})}}({v}) = {} \\implies f^{{({k})}}({}) = {}",
            render(cas, &derivative),
            point_text,
            render(cas, &value),
            k = k,
            v = var,
        ));
    }
    if shown < order + 1 {
        walkthrough.explain(format!(
            "The remaining derivatives, up to $f^{{({})}}$, are computed the same way.",
            order,
        ));
    }

    let result = cas.series(&expr, var, &point, order)?;
    walkthrough.result(
        format!("**Taylor series result (order {}):**", order),
        format!("f({}) \\approx {}", var, render(cas, &result)),
    );

    tracing::debug!(%expr, var, %point, order, shown, %result, "series_walkthrough");
    Ok(walkthrough.finish(Answer::Expr(rendered(cas, &result))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use crate::step::{Rendered, Role};
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    fn derivative_formulas(walkthrough: &Walkthrough) -> usize {
        walkthrough
            .steps_with_role(Role::Formula)
            .filter(|step| step.formula.as_deref().is_some_and(|f| f.contains("\\implies")))
            .count()
    }

    #[test]
    fn exponential() {
        let engine = SymbolicEngine;
        let walkthrough = series(&engine, &StepConfig::default(), "exp(x)", "x", "0", 4).unwrap();
        assert_eq!(derivative_formulas(&walkthrough), 5);

        let Answer::Expr(Rendered { text, .. }) = &walkthrough.answer else {
            panic!("expected an expression");
        };
        let result = engine.parse(text).unwrap();
        let expected = engine.parse("1 + x + x^2/2 + x^3/6 + x^4/24").unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn narrative_cap() {
        let engine = SymbolicEngine;
        let walkthrough = series(&engine, &StepConfig::default(), "sin(x)", "x", "0", 7).unwrap();
        assert_eq!(derivative_formulas(&walkthrough), 5);
        assert!(walkthrough
            .steps_with_role(Role::Explanation)
            .any(|step| step.narrative.starts_with("The remaining derivatives")));

        let config = StepConfig { series_narrative_terms: None, ..StepConfig::default() };
        let walkthrough = series(&engine, &config, "sin(x)", "x", "0", 7).unwrap();
        assert_eq!(derivative_formulas(&walkthrough), 8);
    }

    #[test]
    fn around_a_point() {
        let engine = SymbolicEngine;
        let walkthrough = series(&engine, &StepConfig::default(), "ln(x)", "x", "1", 3).unwrap();
        let Answer::Expr(Rendered { text, .. }) = &walkthrough.answer else {
            panic!("expected an expression");
        };
        let result = engine.parse(text).unwrap();
        let x: f64 = 1.2;
        let expected = (x - 1.0) - (x - 1.0).powi(2) / 2.0 + (x - 1.0).powi(3) / 3.0;
        assert_float_absolute_eq!(engine.evaluate(&result, "x", x).unwrap(), expected, 1e-12);
    }

    #[test]
    fn invalid_order() {
        let err = series(&SymbolicEngine, &StepConfig::default(), "exp(x)", "x", "0", 11).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
