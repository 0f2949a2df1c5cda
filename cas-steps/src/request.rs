//! Operation requests.
//!
//! A request is an immutable description of one calculation: the kind of operation, the text of
//! its expression, and the parameters that kind needs. [`execute`] turns it into a
//! [`Walkthrough`].

use cas_compute::symbolic::limit::Direction as LimitDirection;
use crate::builders;
use crate::cas::{Cas, SymbolicEngine};
use crate::config::StepConfig;
use crate::error::Error;
use crate::step::Walkthrough;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The side from which a limit is approached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Both sides, which must agree.
    #[default]
    TwoSided,

    /// From below.
    Left,

    /// From above.
    Right,
}

impl Direction {
    /// The superscript written after the limit point, such as the `^+` in `x \to 0^+`.
    pub fn superscript(self) -> &'static str {
        match self {
            Self::TwoSided => "",
            Self::Left => "^-",
            Self::Right => "^+",
        }
    }
}

impl From<Direction> for LimitDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::TwoSided => Self::TwoSided,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

/// An operation of basic arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl ArithmeticOp {
    /// Applies the operation. Returns [`None`] for division by zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Self::Add => Some(lhs + rhs),
            Self::Sub => Some(lhs - rhs),
            Self::Mul => Some(lhs * rhs),
            Self::Div if rhs == 0.0 => None,
            Self::Div => Some(lhs / rhs),
            Self::Pow => Some(lhs.powf(rhs)),
        }
    }

    /// The LaTeX operator.
    pub fn latex(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "\\times",
            Self::Div => "\\div",
            Self::Pow => "^",
        }
    }
}

/// Which Laplace transform is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransformDirection {
    Forward,
    Inverse,
}

/// A calculation to explain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperationRequest {
    /// `lhs op rhs` on plain numbers.
    Arithmetic {
        lhs: f64,
        op: ArithmeticOp,
        rhs: f64,
    },

    /// The real solutions of an equation such as `x^2 - 4 = 0`. Without `=`, the expression is
    /// equated to zero.
    Solve {
        equation: String,
        variable: String,
    },

    /// `sum_{variable = lower}^{upper} expr`
    Summation {
        expr: String,
        variable: String,
        lower: String,
        upper: String,
    },

    /// The derivative of the given order.
    Derivative {
        expr: String,
        variable: String,
        order: usize,
    },

    /// The indefinite integral, or the definite integral between `(lower, upper)`.
    Integral {
        expr: String,
        variable: String,
        bounds: Option<(String, String)>,
    },

    /// The limit as `variable` approaches `point` from `direction`.
    Limit {
        expr: String,
        variable: String,
        point: String,
        direction: Direction,
    },

    /// The Taylor polynomial of the given order around `point`.
    Series {
        expr: String,
        variable: String,
        point: String,
        order: usize,
    },

    /// The Laplace transform of a function of `time`.
    Laplace {
        expr: String,
        time: String,
        frequency: String,
    },

    /// The inverse Laplace transform of a function of `frequency`.
    InverseLaplace {
        expr: String,
        frequency: String,
        time: String,
    },
}

impl OperationRequest {
    /// A short name for the kind of operation.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Arithmetic { .. } => "arithmetic",
            Self::Solve { .. } => "solve",
            Self::Summation { .. } => "summation",
            Self::Derivative { .. } => "derivative",
            Self::Integral { .. } => "integral",
            Self::Limit { .. } => "limit",
            Self::Series { .. } => "series",
            Self::Laplace { .. } => "laplace",
            Self::InverseLaplace { .. } => "inverse_laplace",
        }
    }
}

/// Builds the walkthrough for a request with the [`SymbolicEngine`].
pub fn execute(request: &OperationRequest, config: &StepConfig) -> Result<Walkthrough, Error> {
    execute_with(&SymbolicEngine, request, config)
}

/// Builds the walkthrough for a request with the given [`Cas`].
///
/// The walkthrough is built completely before it is returned; if any step fails, only the error
/// is returned.
pub fn execute_with(cas: &impl Cas, request: &OperationRequest, config: &StepConfig) -> Result<Walkthrough, Error> {
    tracing::debug!(kind = request.kind(), ?request, "execute");
    let result = match request {
        OperationRequest::Arithmetic { lhs, op, rhs } => builders::arithmetic(*lhs, *op, *rhs),
        OperationRequest::Solve { equation, variable } => builders::solve(cas, equation, variable),
        OperationRequest::Summation { expr, variable, lower, upper } => {
            builders::summation(cas, config, expr, variable, lower, upper)
        },
        OperationRequest::Derivative { expr, variable, order } => {
            builders::derivative(cas, config, expr, variable, *order)
        },
        OperationRequest::Integral { expr, variable, bounds } => {
            let bounds = bounds.as_ref().map(|(lower, upper)| (lower.as_str(), upper.as_str()));
            builders::integral(cas, expr, variable, bounds)
        },
        OperationRequest::Limit { expr, variable, point, direction } => {
            builders::limit(cas, expr, variable, point, *direction)
        },
        OperationRequest::Series { expr, variable, point, order } => {
            builders::series(cas, config, expr, variable, point, *order)
        },
        OperationRequest::Laplace { expr, time, frequency } => {
            builders::transform(cas, expr, time, frequency, TransformDirection::Forward)
        },
        OperationRequest::InverseLaplace { expr, frequency, time } => {
            builders::transform(cas, expr, frequency, time, TransformDirection::Inverse)
        },
    };

    if let Err(err) = &result {
        tracing::debug!(kind = request.kind(), error = %err, "execute_failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{Answer, Outcome, Role};
    use pretty_assertions::assert_eq;

    fn expr(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn dispatch() {
        let config = StepConfig::default();
        let requests = [
            OperationRequest::Arithmetic { lhs: 7.0, op: ArithmeticOp::Div, rhs: 2.0 },
            OperationRequest::Solve { equation: expr("x^2 - 4 = 0"), variable: expr("x") },
            OperationRequest::Summation {
                expr: expr("k^2"),
                variable: expr("k"),
                lower: expr("1"),
                upper: expr("10"),
            },
            OperationRequest::Derivative { expr: expr("x^3*cos(x)"), variable: expr("x"), order: 2 },
            OperationRequest::Integral {
                expr: expr("x^2"),
                variable: expr("x"),
                bounds: Some((expr("0"), expr("3"))),
            },
            OperationRequest::Limit {
                expr: expr("sin(x)/x"),
                variable: expr("x"),
                point: expr("0"),
                direction: Direction::TwoSided,
            },
            OperationRequest::Series { expr: expr("exp(x)"), variable: expr("x"), point: expr("0"), order: 4 },
            OperationRequest::Laplace { expr: expr("t*exp(-a*t)"), time: expr("t"), frequency: expr("s") },
            OperationRequest::InverseLaplace { expr: expr("1/(s - 3)"), frequency: expr("s"), time: expr("t") },
        ];

        for request in &requests {
            let walkthrough = execute(request, &config).unwrap();
            assert_eq!(walkthrough.steps[0].role, Role::Heading, "{}", request.kind());
            assert!(walkthrough.steps_with_role(Role::Result).count() >= 1, "{}", request.kind());
            assert_eq!(walkthrough.outcome(), Outcome::Solved);
        }
    }

    #[test]
    fn arithmetic_answer() {
        let request = OperationRequest::Arithmetic { lhs: 7.0, op: ArithmeticOp::Div, rhs: 2.0 };
        let walkthrough = execute(&request, &StepConfig::default()).unwrap();
        assert_eq!(walkthrough.answer, Answer::Number(3.5));
    }

    #[test]
    fn failures_carry_no_steps() {
        let config = StepConfig::default();
        let request = OperationRequest::Arithmetic { lhs: 7.0, op: ArithmeticOp::Div, rhs: 0.0 };
        assert!(matches!(execute(&request, &config), Err(Error::DivisionByZero(_))));

        let request = OperationRequest::Integral { expr: expr("sin(x)/x"), variable: expr("x"), bounds: None };
        assert!(matches!(execute(&request, &config), Err(Error::Unsupported(_))));

        let request = OperationRequest::Derivative { expr: expr("x^2"), variable: expr("x"), order: 0 };
        assert!(matches!(execute(&request, &config), Err(Error::InvalidParameter(_))));

        let request = OperationRequest::Limit {
            expr: expr("sin(x"),
            variable: expr("x"),
            point: expr("0"),
            direction: Direction::Left,
        };
        assert!(matches!(execute(&request, &config), Err(Error::Parse { .. })));
    }

    #[test]
    fn directions() {
        assert_eq!(Direction::default(), Direction::TwoSided);
        assert_eq!(Direction::Left.superscript(), "^-");
        assert_eq!(LimitDirection::from(Direction::Right), LimitDirection::Right);
    }
}
