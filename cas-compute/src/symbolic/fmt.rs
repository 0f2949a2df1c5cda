//! LaTeX rendering of symbolic expressions.
//!
//! [`SymExpr`] implements [`std::fmt::Display`] in calculator syntax, which can be parsed back.
//! The [`Latex`] trait renders the same expression as LaTeX math for typesetting: negative powers
//! become fractions, rational powers with unit numerator become roots, and `exp(u)` becomes
//! `e^{u}`.

use std::fmt::{Display, Formatter, Result};
use super::expr::{Primary, Special, SymExpr, PI};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }

    /// Formats the value as a LaTeX string.
    fn to_latex(&self) -> String {
        self.as_display().to_string()
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Functions with a LaTeX operator of their own.
const OPERATORS: [(&str, &str); 13] = [
    ("sin", "\\sin"),
    ("cos", "\\cos"),
    ("tan", "\\tan"),
    ("sec", "\\sec"),
    ("csc", "\\csc"),
    ("cot", "\\cot"),
    ("asin", "\\arcsin"),
    ("acos", "\\arccos"),
    ("atan", "\\arctan"),
    ("sinh", "\\sinh"),
    ("cosh", "\\cosh"),
    ("tanh", "\\tanh"),
    ("ln", "\\ln"),
];

impl Latex for Special {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Infinity => write!(f, "\\infty"),
            Self::NegInfinity => write!(f, "-\\infty"),
            Self::ComplexInfinity => write!(f, "\\tilde{{\\infty}}"),
            Self::Undefined => write!(f, "\\text{{NaN}}"),
        }
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Integer(_) | Self::Float(_) => write!(f, "{}", self),
            Self::Symbol(sym) if sym == PI => write!(f, "\\pi"),
            Self::Symbol(sym) => {
                if sym.trim_end_matches('\'').chars().count() <= 1 {
                    write!(f, "{}", sym)
                } else {
                    write!(f, "\\mathrm{{{}}}", sym)
                }
            },
            Self::Call(name, args) => match (name.as_str(), args.as_slice()) {
                ("exp", [arg]) if arg.is_one() => write!(f, "e"),
                ("exp", [arg]) => {
                    write!(f, "e^{{")?;
                    arg.fmt_latex(f)?;
                    write!(f, "}}")
                },
                ("abs", [arg]) => {
                    write!(f, "\\left|")?;
                    arg.fmt_latex(f)?;
                    write!(f, "\\right|")
                },
                _ => {
                    match OPERATORS.iter().find(|(function, _)| *function == name.as_str()) {
                        Some((_, operator)) => write!(f, "{}", operator)?,
                        None => write!(f, "\\mathrm{{{}}}", name)?,
                    }
                    write!(f, "\\left(")?;
                    let mut iter = args.iter();
                    if let Some(arg) = iter.next() {
                        arg.fmt_latex(f)?;
                        for arg in iter {
                            write!(f, ", ")?;
                            arg.fmt_latex(f)?;
                        }
                    }
                    write!(f, "\\right)")
                },
            },
        }
    }
}

/// If the factor is a power with a negative numeric exponent, returns the same power with the
/// exponent negated, so that it can be written in a denominator.
fn reciprocal(factor: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = factor else {
        return None;
    };
    let exp = exp.as_rational()?;
    if exp >= 0 {
        return None;
    }
    let positive = -exp;
    if positive == 1 {
        Some((**base).clone())
    } else {
        Some((**base).clone().pow(SymExpr::rational(positive)))
    }
}

/// Returns true if the expression is written as a power with a superscript, such as `e^{x}`.
fn is_superscripted(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Exp(..) => true,
        _ => expr.as_call1().is_some_and(|(name, arg)| name == "exp" && !arg.is_one()),
    }
}

/// Returns true if the expression starts with a minus sign when written.
fn is_signed(expr: &SymExpr) -> bool {
    expr.strip_negative().is_some() || expr.as_special() == Some(Special::NegInfinity)
}

fn fmt_parenthesized(expr: &SymExpr, f: &mut Formatter) -> Result {
    write!(f, "\\left(")?;
    expr.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// Formats a list of factors written next to each other.
fn fmt_factors(factors: &[SymExpr], f: &mut Formatter) -> Result {
    if let [factor] = factors {
        return factor.fmt_latex(f);
    }

    let mut previous: Option<&SymExpr> = None;
    for factor in factors {
        if let Some(previous) = previous {
            if factor.is_number() {
                write!(f, " \\cdot ")?;
            } else if !previous.is_number() {
                write!(f, " ")?;
            }
        }
        if matches!(factor, SymExpr::Add(_)) || (previous.is_some() && is_signed(factor)) {
            fmt_parenthesized(factor, f)?;
        } else {
            factor.fmt_latex(f)?;
        }
        previous = Some(factor);
    }
    Ok(())
}

fn fmt_product(expr: &SymExpr, f: &mut Formatter) -> Result {
    if let Some(positive) = expr.strip_negative() {
        write!(f, "-")?;
        return if matches!(positive, SymExpr::Add(_)) {
            fmt_parenthesized(&positive, f)
        } else {
            positive.fmt_latex(f)
        };
    }

    let SymExpr::Mul(factors) = expr else {
        return expr.fmt_latex(f);
    };
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match reciprocal(factor) {
            Some(positive) => denominator.push(positive),
            None => numerator.push(factor.clone()),
        }
    }

    if denominator.is_empty() {
        return fmt_factors(&numerator, f);
    }
    write!(f, "\\frac{{")?;
    if numerator.is_empty() {
        write!(f, "1")?;
    } else {
        fmt_factors(&numerator, f)?;
    }
    write!(f, "}}{{")?;
    fmt_factors(&denominator, f)?;
    write!(f, "}}")
}

fn fmt_power(expr: &SymExpr, base: &SymExpr, exp: &SymExpr, f: &mut Formatter) -> Result {
    if let Some(r) = exp.as_rational() {
        if r < 0 {
            write!(f, "\\frac{{1}}{{")?;
            reciprocal(expr).unwrap_or_else(|| expr.clone()).fmt_latex(f)?;
            return write!(f, "}}");
        }
        if *r.numer() == 1 && *r.denom() > 1 {
            if *r.denom() == 2 {
                write!(f, "\\sqrt{{")?;
            } else {
                write!(f, "\\sqrt[{}]{{", r.denom())?;
            }
            base.fmt_latex(f)?;
            return write!(f, "}}");
        }
    }

    let needs_parens = matches!(base, SymExpr::Add(_) | SymExpr::Mul(_))
        || is_superscripted(base)
        || is_signed(base);
    if needs_parens {
        fmt_parenthesized(base, f)?;
    } else {
        base.fmt_latex(f)?;
    }
    write!(f, "^{{")?;
    exp.fmt_latex(f)?;
    write!(f, "}}")
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Special(special) => special.fmt_latex(f),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    term.fmt_latex(f)?;
                    for term in iter {
                        match term.strip_negative() {
                            Some(positive) => {
                                write!(f, " - ")?;
                                positive.fmt_latex(f)?;
                            },
                            None => {
                                write!(f, " + ")?;
                                term.fmt_latex(f)?;
                            },
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(_) => fmt_product(self, f),
            Self::Exp(base, exp) => fmt_power(self, base, exp, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn latex(input: &str) -> String {
        parse(input).to_latex()
    }

    #[test]
    fn polynomials() {
        assert_eq!(latex("x^2 + 2x + 1"), "x^{2} + 2x + 1");
        assert_eq!(latex("x - y"), "x - y");
        assert_eq!(latex("3x^3 - 5"), "3x^{3} - 5");
    }

    #[test]
    fn fractions() {
        assert_eq!(latex("3/4"), "\\frac{3}{4}");
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("-x/2"), "-\\frac{x}{2}");
        assert_eq!(latex("1/(x + 1)^2"), "\\frac{1}{\\left(x + 1\\right)^{2}}");
    }

    #[test]
    fn roots() {
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("x^(1/3)"), "\\sqrt[3]{x}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(latex("atan(x)"), "\\arctan\\left(x\\right)");
        assert_eq!(latex("exp(x)"), "e^{x}");
        assert_eq!(latex("e"), "e");
        assert_eq!(latex("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex("sin(x)^2"), "\\sin\\left(x\\right)^{2}");
    }

    #[test]
    fn symbols() {
        assert_eq!(latex("pi"), "\\pi");
        assert_eq!(latex("theta"), "\\mathrm{theta}");
    }

    #[test]
    fn special_values() {
        assert_eq!(latex("oo"), "\\infty");
        assert_eq!(latex("-oo"), "-\\infty");
        assert_eq!(latex("1/0"), "\\tilde{\\infty}");
        assert_eq!(latex("0/0"), "\\text{NaN}");
    }

    #[test]
    fn idempotent() {
        let expr = parse("x^2*exp(-x)/(x + 1) + sqrt(2)*ln(x)");
        assert_eq!(expr.to_latex(), expr.to_latex());
    }
}
