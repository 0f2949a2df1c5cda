use crate::cas::Cas;
use crate::error::Error;
use crate::format::render;
use crate::step::{Answer, Walkthrough};
use super::{check_variable, rendered};

/// Explains the real solutions of an equation. Without `=`, the expression is equated to zero.
///
/// An equation without real solutions is not an error: the walkthrough explains it and its answer
/// is an empty list of roots.
pub fn solve(cas: &impl Cas, input: &str, var: &str) -> Result<Walkthrough, Error> {
    check_variable(var)?;
    let (lhs, rhs) = cas.parse_equation(input)?;

    let mut walkthrough = Walkthrough::builder("Equation Solving");
    let equation = format!("{} = {}", render(cas, &lhs), render(cas, &rhs));
    if input.contains('=') {
        walkthrough.formula("The given equation is:", equation);
    } else {
        walkthrough.formula("Assuming the expression equals zero:", equation);
    }

    let roots = cas.solve(&lhs, &rhs, var)?;
    tracing::debug!(%lhs, %rhs, var, count = roots.len(), "solve_walkthrough");
    if roots.is_empty() {
        walkthrough.explain("The equation has no solutions in the real numbers.");
        return Ok(walkthrough.finish(Answer::Roots(Vec::new())));
    }

    walkthrough.explain(format!("The solutions for the variable ${}$ are:", var));
    for (i, root) in roots.iter().enumerate() {
        walkthrough.result("", format!("{}_{{{}}} = {}", var, i + 1, render(cas, root)));
    }
    let roots = roots.iter().map(|root| rendered(cas, root)).collect();
    Ok(walkthrough.finish(Answer::Roots(roots)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::SymbolicEngine;
    use crate::step::{Outcome, Role};
    use pretty_assertions::assert_eq;

    fn roots(walkthrough: &Walkthrough) -> Vec<&str> {
        match &walkthrough.answer {
            Answer::Roots(roots) => roots.iter().map(|root| root.text.as_str()).collect(),
            other => panic!("expected roots, got {:?}", other),
        }
    }

    #[test]
    fn quadratic() {
        let walkthrough = solve(&SymbolicEngine, "x^2 - 4 = 0", "x").unwrap();
        let mut found = roots(&walkthrough);
        found.sort_unstable();
        assert_eq!(found, ["-2", "2"]);
        assert_eq!(walkthrough.steps_with_role(Role::Result).count(), 2);
        assert_eq!(walkthrough.steps[1].narrative, "The given equation is:");
        assert_eq!(walkthrough.outcome(), Outcome::Solved);
    }

    #[test]
    fn assumes_zero() {
        let walkthrough = solve(&SymbolicEngine, "2*x - 6", "x").unwrap();
        assert_eq!(walkthrough.steps[1].narrative, "Assuming the expression equals zero:");
        assert_eq!(roots(&walkthrough), ["3"]);
        assert_eq!(
            walkthrough.steps.last().and_then(|step| step.formula.as_deref()),
            Some("x_{1} = 3"),
        );
    }

    #[test]
    fn no_real_solution() {
        let walkthrough = solve(&SymbolicEngine, "x^2 + 1 = 0", "x").unwrap();
        assert_eq!(walkthrough.outcome(), Outcome::NoRealSolution);
        assert_eq!(walkthrough.steps_with_role(Role::Result).count(), 0);
        assert_eq!(
            walkthrough.steps.last().map(|step| step.narrative.as_str()),
            Some("The equation has no solutions in the real numbers."),
        );
    }

    #[test]
    fn malformed() {
        let err = solve(&SymbolicEngine, "x^2 - = 4", "x").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
