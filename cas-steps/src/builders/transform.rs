use crate::cas::Cas;
use crate::error::Error;
use crate::format::render;
use crate::request::TransformDirection;
use crate::step::{Answer, Walkthrough};
use super::{check_variable, rendered};

/// Explains the Laplace transform of `input`, a function of `from`, as a function of `to`. For
/// [`TransformDirection::Inverse`], `from` is the frequency and `to` the time.
///
/// The walkthrough is always the defining relation followed by the result; transforms are not
/// decomposed.
pub fn transform(
    cas: &impl Cas,
    input: &str,
    from: &str,
    to: &str,
    direction: TransformDirection,
) -> Result<Walkthrough, Error> {
    check_variable(from)?;
    check_variable(to)?;
    let expr = cas.parse(input)?;

    let (kind, walkthrough) = match direction {
        TransformDirection::Forward => {
            let result = cas.laplace(&expr, from, to)?;
            let mut walkthrough = Walkthrough::builder("Laplace Transform");
            walkthrough.explain(format!(
                "We compute the Laplace transform of $f({}) = {}$:",
                from,
                render(cas, &expr),
            ));
            walkthrough.formula("", format!(
                "\\mathcal{{L}}\\{{f({t})\\}} = F({s}) = \\int_0^{{\\infty}} f({t}) e^{{-{s}{t}}} \\, d{t}",
                t = from,
                s = to,
            ));
            walkthrough.result("**Result:**", format!("F({}) = {}", to, render(cas, &result)));
            ("laplace", walkthrough.finish(Answer::Expr(rendered(cas, &result))))
        },
        TransformDirection::Inverse => {
            let result = cas.inverse_laplace(&expr, from, to)?;
            let mut walkthrough = Walkthrough::builder("Inverse Laplace Transform");
            walkthrough.explain(format!(
                "We compute the inverse Laplace transform of $F({}) = {}$:",
                from,
                render(cas, &expr),
            ));
            walkthrough.formula("", format!(
                "\\mathcal{{L}}^{{-1}}\\{{F({s})\\}} = f({t})",
                s = from,
                t = to,
            ));
            walkthrough.result("**Result:**", format!("f({}) = {}", to, render(cas, &result)));
            ("inverse_laplace", walkthrough.finish(Answer::Expr(rendered(cas, &result))))
        },
    };

    tracing::debug!(%expr, from, to, kind, "transform_walkthrough");
    Ok(walkthrough)
}
