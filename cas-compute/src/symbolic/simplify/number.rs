//! Numbers appearing as terms or factors, exact or approximate.

use rug::{Float, Rational};
use crate::primitive::float;
use crate::symbolic::expr::SymExpr;

/// A numeric value extracted from an expression.
///
/// Arithmetic between an exact and an approximate number is approximate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Exact(Rational),
    Approx(Float),
}

impl Number {
    /// Extracts the value of a numeric expression.
    pub fn from_expr(expr: &SymExpr) -> Option<Self> {
        match expr.as_float() {
            Some(f) => Some(Self::Approx(f.clone())),
            None => expr.as_rational().map(Self::Exact),
        }
    }

    pub fn one() -> Self {
        Self::Exact(Rational::from(1))
    }

    pub fn zero() -> Self {
        Self::Exact(Rational::new())
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Approx(f) => f.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Self::Exact(r) => *r == 1,
            Self::Approx(f) => *f == 1,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_negative(),
            Self::Approx(f) => f.is_sign_negative() && !f.is_zero(),
        }
    }

    pub fn to_float(&self) -> Float {
        match self {
            Self::Exact(r) => float(r),
            Self::Approx(f) => f.clone(),
        }
    }

    pub fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a + b),
            (a, b) => Self::Approx(a.to_float() + b.to_float()),
        }
    }

    pub fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a * b),
            (a, b) => Self::Approx(a.to_float() * b.to_float()),
        }
    }

    pub fn into_expr(self) -> SymExpr {
        match self {
            Self::Exact(r) => SymExpr::rational(r),
            Self::Approx(f) => SymExpr::float(f),
        }
    }
}
