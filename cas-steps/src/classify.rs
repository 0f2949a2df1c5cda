//! Classification of an expression by the calculus rule that applies to its top level.

use cas_compute::symbolic::expr::{Primary, SymExpr};
use std::fmt;

/// The category of a [`Classification`], without its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Sum,
    Product,
    Power,
    Chain,
    Leaf,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Product => write!(f, "product"),
            Self::Power => write!(f, "power"),
            Self::Chain => write!(f, "chain"),
            Self::Leaf => write!(f, "leaf"),
        }
    }
}

/// The rule that applies to the top level of an expression, together with the operands the rule
/// works on.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification<'a> {
    /// An addition of at least two terms.
    Sum(&'a [SymExpr]),

    /// A multiplication of exactly two factors.
    Product(&'a SymExpr, &'a SymExpr),

    /// A power whose base depends on the variable and whose exponent does not.
    Power {
        base: &'a SymExpr,
        exp: &'a SymExpr,
    },

    /// A power with an exponent that depends on the variable, or a function applied to an argument
    /// that depends on the variable.
    Chain {
        /// The outer function: the base of the power, or the name of the function.
        outer: Outer<'a>,

        /// The inner expression.
        inner: &'a SymExpr,
    },

    /// Nothing to decompose. Products of more than two factors also land here.
    Leaf,
}

/// The outer function of a [`Classification::Chain`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outer<'a> {
    /// `base^inner`
    Power(&'a SymExpr),

    /// `name(inner, ..)`
    Call(&'a str),
}

impl Classification<'_> {
    /// Returns the category.
    pub fn category(&self) -> Category {
        match self {
            Self::Sum(_) => Category::Sum,
            Self::Product(..) => Category::Product,
            Self::Power { .. } => Category::Power,
            Self::Chain { .. } => Category::Chain,
            Self::Leaf => Category::Leaf,
        }
    }
}

/// Classifies `expr` with respect to `var`. Every expression has exactly one classification.
pub fn classify<'a>(expr: &'a SymExpr, var: &str) -> Classification<'a> {
    let classification = match expr {
        SymExpr::Add(terms) if terms.len() >= 2 => Classification::Sum(terms),
        SymExpr::Mul(factors) if factors.len() == 2 => Classification::Product(&factors[0], &factors[1]),
        SymExpr::Exp(base, exp) if exp.contains_symbol(var) => Classification::Chain {
            outer: Outer::Power(base),
            inner: exp,
        },
        SymExpr::Exp(base, exp) if base.contains_symbol(var) => Classification::Power { base, exp },
        SymExpr::Primary(Primary::Call(name, args)) => args
            .iter()
            .find(|arg| arg.contains_symbol(var))
            .map_or(Classification::Leaf, |inner| Classification::Chain {
                outer: Outer::Call(name),
                inner,
            }),
        _ => Classification::Leaf,
    };
    tracing::trace!(%expr, var, category = %classification.category(), "classify");
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cas::{Cas, SymbolicEngine};
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> SymExpr {
        SymbolicEngine.parse(input).unwrap()
    }

    fn category(input: &str) -> Category {
        classify(&parse(input), "x").category()
    }

    #[test]
    fn sum() {
        let expr = parse("x^2 + 3*x + 1");
        match classify(&expr, "x") {
            Classification::Sum(terms) => assert_eq!(terms.len(), 3),
            other => panic!("expected a sum, got {:?}", other),
        }
    }

    #[test]
    fn product() {
        assert_eq!(category("x*sin(x)"), Category::Product);
        assert_eq!(category("3*x"), Category::Product);

        // three factors fall through to direct handling
        assert_eq!(category("x*sin(x)*exp(x)"), Category::Leaf);
    }

    #[test]
    fn power() {
        let expr = parse("x^3");
        match classify(&expr, "x") {
            Classification::Power { base, exp } => {
                assert_eq!(base, &SymExpr::symbol("x"));
                assert_eq!(exp, &SymExpr::integer(3));
            },
            other => panic!("expected a power, got {:?}", other),
        }
        assert_eq!(category("sqrt(x)"), Category::Power);
    }

    #[test]
    fn chain() {
        assert_eq!(category("sin(x^2)"), Category::Chain);
        assert_eq!(category("exp(3*x)"), Category::Chain);
        assert_eq!(category("2^x"), Category::Chain);
        assert_eq!(category("x^x"), Category::Chain);
    }

    #[test]
    fn leaf() {
        assert_eq!(category("x"), Category::Leaf);
        assert_eq!(category("5"), Category::Leaf);
        assert_eq!(category("sin(y)"), Category::Leaf);
        assert_eq!(category("y^2"), Category::Leaf);
    }

    #[test]
    fn total() {
        let cases = [
            ("oo", Category::Leaf),
            ("1/0", Category::Leaf),
            ("a*b*c", Category::Leaf),
            ("ln(x) + 1", Category::Sum),
            ("x^(-1)", Category::Power),
            ("exp(1)", Category::Leaf),
            ("pi", Category::Leaf),
        ];
        for (input, expected) in cases {
            assert_eq!(category(input), expected, "{input}");
        }
    }
}
