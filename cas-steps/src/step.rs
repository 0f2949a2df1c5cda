//! The steps of a walkthrough.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a [`Step`] contributes to the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// The title of the walkthrough.
    Heading,

    /// A line of prose, such as the name of the rule being applied.
    Explanation,

    /// An intermediate formula.
    Formula,

    /// A result: an intermediate derivative, a root, or the final answer.
    Result,
}

/// One line of a walkthrough: a narrative with an optional LaTeX formula.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// What the step contributes.
    pub role: Role,

    /// The prose of the step. Inline math is delimited with `$`.
    pub narrative: String,

    /// A display formula, in LaTeX.
    pub formula: Option<String>,
}

impl Step {
    /// Creates a heading.
    pub fn heading(title: impl Into<String>) -> Self {
        Self { role: Role::Heading, narrative: title.into(), formula: None }
    }

    /// Creates a line of prose.
    pub fn explanation(narrative: impl Into<String>) -> Self {
        Self { role: Role::Explanation, narrative: narrative.into(), formula: None }
    }

    /// Creates an intermediate formula with an optional caption.
    pub fn formula(narrative: impl Into<String>, formula: impl Into<String>) -> Self {
        Self { role: Role::Formula, narrative: narrative.into(), formula: Some(formula.into()) }
    }

    /// Creates a result with an optional caption.
    pub fn result(narrative: impl Into<String>, formula: impl Into<String>) -> Self {
        Self { role: Role::Result, narrative: narrative.into(), formula: Some(formula.into()) }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Heading => write!(f, "## {}", self.narrative)?,
            _ => write!(f, "{}", self.narrative)?,
        }
        if let Some(formula) = &self.formula {
            if !self.narrative.is_empty() {
                writeln!(f)?;
            }
            write!(f, "$${}$$", formula)?;
        }
        Ok(())
    }
}

/// An expression in the answer of a walkthrough, in calculator syntax and in LaTeX.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rendered {
    /// The expression in calculator syntax, which can be parsed back.
    pub text: String,

    /// The expression in LaTeX.
    pub latex: String,
}

/// The authoritative answer of a walkthrough.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Answer {
    /// A single expression, such as a derivative or a limit.
    Expr(Rendered),

    /// The real solutions of an equation. An empty list is the "no real solution" outcome.
    Roots(Vec<Rendered>),

    /// The result of basic arithmetic.
    Number(f64),
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation produced an answer.
    Solved,

    /// The equation has no real solution. This is not an error; the walkthrough explains it.
    NoRealSolution,
}

/// The ordered steps of a calculation together with its answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Walkthrough {
    /// The title, also carried by the first step.
    pub title: String,

    /// The steps, in the order they were produced.
    pub steps: Vec<Step>,

    /// The answer.
    pub answer: Answer,
}

impl Walkthrough {
    /// Starts a walkthrough with the given title. The heading is the first step.
    pub(crate) fn builder(title: impl Into<String>) -> WalkthroughBuilder {
        let title = title.into();
        WalkthroughBuilder {
            steps: vec![Step::heading(title.clone())],
            title,
        }
    }

    /// Returns the steps with the given role.
    pub fn steps_with_role(&self, role: Role) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |step| step.role == role)
    }

    /// Returns how the operation ended.
    pub fn outcome(&self) -> Outcome {
        match &self.answer {
            Answer::Roots(roots) if roots.is_empty() => Outcome::NoRealSolution,
            _ => Outcome::Solved,
        }
    }
}

impl fmt::Display for Walkthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.steps.iter();
        if let Some(step) = iter.next() {
            write!(f, "{}", step)?;
            for step in iter {
                write!(f, "\n\n{}", step)?;
            }
        }
        Ok(())
    }
}

/// Collects the steps of a walkthrough. Steps are only ever appended.
#[derive(Debug)]
pub(crate) struct WalkthroughBuilder {
    title: String,
    steps: Vec<Step>,
}

impl WalkthroughBuilder {
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn explain(&mut self, narrative: impl Into<String>) {
        self.push(Step::explanation(narrative));
    }

    pub(crate) fn formula(&mut self, narrative: impl Into<String>, formula: impl Into<String>) {
        self.push(Step::formula(narrative, formula));
    }

    pub(crate) fn result(&mut self, narrative: impl Into<String>, formula: impl Into<String>) {
        self.push(Step::result(narrative, formula));
    }

    pub(crate) fn finish(self, answer: Answer) -> Walkthrough {
        Walkthrough { title: self.title, steps: self.steps, answer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_comes_first() {
        let mut builder = Walkthrough::builder("Derivative");
        builder.explain("Apply the sum rule.");
        builder.result("", "f'(x) = 1");
        let walkthrough = builder.finish(Answer::Number(1.0));

        assert_eq!(walkthrough.steps[0], Step::heading("Derivative"));
        assert_eq!(walkthrough.steps_with_role(Role::Result).count(), 1);
        assert_eq!(walkthrough.outcome(), Outcome::Solved);
    }

    #[test]
    fn empty_roots_are_no_real_solution() {
        let walkthrough = Walkthrough::builder("Solve").finish(Answer::Roots(Vec::new()));
        assert_eq!(walkthrough.outcome(), Outcome::NoRealSolution);
    }

    #[test]
    fn display() {
        let mut builder = Walkthrough::builder("Limit");
        builder.formula("Direct substitution:", "f(0) = 1");
        let walkthrough = builder.finish(Answer::Number(1.0));
        assert_eq!(walkthrough.to_string(), "## Limit\n\nDirect substitution:\n$$f(0) = 1$$");
    }
}
