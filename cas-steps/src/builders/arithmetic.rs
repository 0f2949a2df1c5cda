use crate::error::{DivisionByZero, Error, NonRealResult};
use crate::format::number;
use crate::request::ArithmeticOp;
use crate::step::{Answer, Walkthrough};

/// Renders an operand, in parentheses if it is negative.
fn operand(value: f64) -> String {
    if value < 0.0 {
        format!("\\left({}\\right)", number(value))
    } else {
        number(value)
    }
}

/// Explains `lhs op rhs` on plain numbers.
pub fn arithmetic(lhs: f64, op: ArithmeticOp, rhs: f64) -> Result<Walkthrough, Error> {
    let result = op
        .apply(lhs, rhs)
        .ok_or_else(|| Error::DivisionByZero(cas_error::Error::unspanned(DivisionByZero)))?;
    if !result.is_finite() {
        return Err(Error::Unsupported(cas_error::Error::unspanned(NonRealResult)));
    }

    let formula = match op {
        ArithmeticOp::Div => format!("\\frac{{{}}}{{{}}} = {}", number(lhs), number(rhs), number(result)),
        ArithmeticOp::Pow => format!("{}^{{{}}} = {}", operand(lhs), number(rhs), number(result)),
        _ => format!("{} {} {} = {}", number(lhs), op.latex(), operand(rhs), number(result)),
    };

    let mut walkthrough = Walkthrough::builder("Basic Arithmetic");
    walkthrough.explain("Computing the operation:");
    walkthrough.result("", formula);
    Ok(walkthrough.finish(Answer::Number(result)))
}
