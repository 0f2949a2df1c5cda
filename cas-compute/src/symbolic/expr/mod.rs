//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::ast::expr::Expr) type from `cas_parser` is a recursive `enum`
//! that represents the AST of a mathematical expression. It's convenient for parsing, but not so
//! much for algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], which simplifies the AST by recursively flattening
//! it into a list of terms or factors, depending on the operation. Subtraction becomes addition of
//! a negated term, division becomes multiplication by a power with exponent `-1`, and a square
//! root becomes a power with exponent `1/2`.
//!
//! Rational numbers have no node of their own. The fraction `3/4` is the product of the integer
//! `3` and the power `4^-1`; see [`SymExpr::rational`] and [`SymExpr::as_rational`].
//!
//! # Strict equality
//!
//! A common problem that arises in symbolic computation is determining if two expressions are
//! semantically / mathematically equal, in order to determine if terms / factors are similar
//! enough to be combined, for example. However, this is extremely difficult to do, because there
//! are an infinite number of ways to represent the same expression.
//!
//! Consider pairs of expressions such as `x^2 + 2x + 1` and `(x + 1)^2`, or `cos(2x)` and
//! `cos(x)^2 - sin(x)^2`. Both pairs are semantically equal, but this is not immediately obvious
//! without first applying expansion / factoring / simplification.
//!
//! To alleviate these issues, we define a subset of semantic equality for expressions, called
//! **strict equality**. We define two expressions to be strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`] or [`SymExpr::Special`], both expressions must have
//! strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can **never** report false positives. If two expressions are strictly equal,
//! then they must be semantically equal. Combined with the canonical form produced by
//! [`normalize`](crate::symbolic::simplify::normalize), it is also how the engine decides whether
//! two results agree.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**,
//! not semantic equality.

mod convert;
mod iter;
mod order;

pub use convert::{from_ast, from_equation, FUNCTIONS};
pub use iter::ExprIter;
pub use order::{cmp_factors, cmp_terms};

use crate::primitive::{int, rational};
use rug::{ops::Pow, Float, Integer, Rational};
use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub},
};

/// Name of the symbol for the circle constant.
pub const PI: &str = "pi";

/// Integer powers with a larger exponent are not evaluated exactly.
pub(crate) const MAX_EXACT_EXPONENT: u32 = 4096;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`. This module **must never** produce
    /// non-finite [`Float`]s; those are represented by [`Special`] values instead.
    Float(Float),

    /// A variable or named constant, such as `x` or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)`.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually since [`Float`] does not implement it. Floats stored in a
/// [`Primary`] are always finite, so the comparison is reflexive.
impl Eq for Primary {}

/// Values that are not finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    /// Positive infinity, written `oo`.
    Infinity,

    /// Negative infinity.
    NegInfinity,

    /// An infinity with no definite sign, such as the value of `1/0`.
    ComplexInfinity,

    /// An indeterminate value, such as `0/0` or `oo - oo`.
    Undefined,
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "oo"),
            Self::NegInfinity => write!(f, "-oo"),
            Self::ComplexInfinity => write!(f, "zoo"),
            Self::Undefined => write!(f, "nan"),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`cas_parser::parser::ast::Expr`] type, which is
/// produced by [`cas_parser`]. The main difference is that this type **flattens** out the tree
/// structure. For example, the expression `x + (y + z)` would be represented internally as a
/// single [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),

    /// A value that is not a finite number.
    Special(Special),
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn integer(n: impl Into<Integer>) -> Self {
        Self::Primary(Primary::Integer(n.into()))
    }

    /// Creates the integer `0`.
    pub fn zero() -> Self {
        Self::integer(0)
    }

    /// Creates the integer `1`.
    pub fn one() -> Self {
        Self::integer(1)
    }

    /// Creates a floating-point expression. Non-finite values become [`Special`] values.
    pub fn float(f: Float) -> Self {
        if f.is_nan() {
            Self::Special(Special::Undefined)
        } else if f.is_infinite() {
            if f.is_sign_positive() {
                Self::Special(Special::Infinity)
            } else {
                Self::Special(Special::NegInfinity)
            }
        } else {
            Self::Primary(Primary::Float(f))
        }
    }

    /// Creates a symbol expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a call to the function with the given name.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates a call to a function of one argument.
    pub fn call1(name: impl Into<String>, arg: SymExpr) -> Self {
        Self::call(name, vec![arg])
    }

    /// Creates the canonical representation of a rational number: an integer, the reciprocal of
    /// an integer, or the product of both.
    pub fn rational(r: Rational) -> Self {
        let (num, den) = r.into_numer_denom();
        if den == 1 {
            Self::Primary(Primary::Integer(num))
        } else {
            let recip = Self::Exp(
                Box::new(Self::Primary(Primary::Integer(den))),
                Box::new(Self::integer(-1)),
            );
            if num == 1 {
                recip
            } else {
                Self::Mul(vec![Self::Primary(Primary::Integer(num)), recip])
            }
        }
    }

    /// Creates the fraction `num / den` of two integers.
    pub fn fraction(num: impl Into<Integer>, den: impl Into<Integer>) -> Self {
        Self::rational(rational(num, den))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the reciprocal of this expression. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::integer(-1))
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::fraction(1, 2))
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(f)) => Some(f),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// If the expression represents a rational number, returns its value.
    ///
    /// Integers, integer powers of integers and products of those are recognized.
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Self::Primary(Primary::Integer(n)) => Some(Rational::from(n)),
            Self::Exp(base, exp) => {
                let base = base.as_integer()?;
                let exp = exp.as_integer()?.to_i32()?;
                if (base.is_zero() && exp < 0) || exp.unsigned_abs() > MAX_EXACT_EXPONENT {
                    return None;
                }
                let magnitude = Rational::from(base.clone().pow(exp.unsigned_abs()));
                if exp < 0 {
                    Some(magnitude.recip())
                } else {
                    Some(magnitude)
                }
            },
            Self::Mul(factors) => factors.iter().try_fold(Rational::from(1), |acc, factor| {
                Some(acc * factor.as_rational()?)
            }),
            _ => None,
        }
    }

    /// Returns true if the expression is a rational or floating-point number.
    pub fn is_number(&self) -> bool {
        self.is_float() || self.as_rational().is_some()
    }

    /// Returns true if the expression is a number equal to zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => n.is_zero(),
            Self::Primary(Primary::Float(f)) => f.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is a number equal to one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(n)) => *n == 1,
            Self::Primary(Primary::Float(f)) => *f == 1,
            _ => false,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a call to a function of one argument, returns the function name and
    /// the argument.
    pub fn as_call1(&self) -> Option<(&str, &SymExpr)> {
        match self {
            Self::Primary(Primary::Call(name, args)) if args.len() == 1 => Some((name, &args[0])),
            _ => None,
        }
    }

    /// If the expression is a [`SymExpr::Special`], returns the contained value.
    pub fn as_special(&self) -> Option<Special> {
        match self {
            Self::Special(special) => Some(*special),
            _ => None,
        }
    }

    /// Returns true if the expression is positive, negative or unsigned infinity.
    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            Self::Special(Special::Infinity | Special::NegInfinity | Special::ComplexInfinity)
        )
    }

    /// Returns true if no part of the expression is a [`Special`] value.
    pub fn is_finite(&self) -> bool {
        !self.post_order_iter().any(|expr| matches!(expr, Self::Special(_)))
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if the expression does not depend on the symbol with the given name.
    pub fn is_free_of(&self, name: &str) -> bool {
        !self.contains_symbol(name)
    }

    /// Returns the names of the free symbols of the expression, excluding named constants, in
    /// order of first appearance.
    pub fn free_symbols(&self) -> Vec<&str> {
        let mut symbols = Vec::new();
        for expr in self.post_order_iter() {
            if let Some(sym) = expr.as_symbol() {
                if sym != PI && !symbols.contains(&sym) {
                    symbols.push(sym);
                }
            }
        }
        symbols
    }

    /// Replaces every occurrence of the symbol `var` with `value`. No simplification is done.
    pub fn substitute(&self, var: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == var => value.clone(),
            Self::Primary(Primary::Call(name, args)) => Self::call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(var, value)).collect(),
            ),
            Self::Primary(_) | Self::Special(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|t| t.substitute(var, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|f| f.substitute(var, value)).collect()),
            Self::Exp(base, exp) => base.substitute(var, value).pow(exp.substitute(var, value)),
        }
    }

    /// Returns the number of nodes in the expression tree, used to compare candidate forms of the
    /// same expression.
    pub fn complexity(&self) -> usize {
        self.post_order_iter().count()
    }

    /// If this expression is a product with a negative numeric coefficient (or a negative number),
    /// returns the expression with that sign flipped. Used for printing `a - b` instead of
    /// `a + -1*b`.
    pub fn strip_negative(&self) -> Option<SymExpr> {
        match self {
            Self::Primary(Primary::Integer(n)) if *n < 0 => Some(Self::integer(-n.clone())),
            Self::Primary(Primary::Float(f)) if f.is_sign_negative() && !f.is_zero() => {
                Some(Self::Primary(Primary::Float(-f.clone())))
            },
            Self::Mul(factors) => {
                let (first, rest) = factors.split_first()?;
                let flipped = first.strip_negative()?;
                if flipped.is_one() {
                    Some(Self::Mul(rest.to_vec()).downgrade())
                } else {
                    let mut new_factors = vec![flipped];
                    new_factors.extend(rest.iter().cloned());
                    Some(Self::Mul(new_factors))
                }
            },
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). Arguments of function calls are visited before the call itself.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the binding strength of the expression when printed, used to decide where
    /// parentheses are needed.
    fn print_precedence(&self) -> u8 {
        match self {
            Self::Add(_) => 1,
            Self::Mul(_) => 2,
            Self::Exp(..) => 3,
            Self::Primary(Primary::Integer(n)) if *n < 0 => 1,
            Self::Primary(Primary::Float(f)) if f.is_sign_negative() => 1,
            Self::Special(Special::NegInfinity) => 1,
            Self::Primary(_) | Self::Special(_) => 4,
        }
    }

    /// Formats `expr`, wrapping it in parentheses if it binds more loosely than `min`.
    fn fmt_operand(expr: &SymExpr, min: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if expr.print_precedence() < min {
            write!(f, "({})", expr)
        } else {
            write!(f, "{}", expr)
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Special(special) => write!(f, "{}", special),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        match term.strip_negative() {
                            Some(positive) => {
                                write!(f, " - ")?;
                                Self::fmt_operand(&positive, 2, f)?;
                            },
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                if let Some(positive) = self.strip_negative() {
                    write!(f, "-")?;
                    return Self::fmt_operand(&positive, 2, f);
                }
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    Self::fmt_operand(factor, 2, f)?;
                    for factor in iter {
                        write!(f, "*")?;
                        Self::fmt_operand(factor, 2, f)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                Self::fmt_operand(base, 4, f)?;
                write!(f, "^")?;
                Self::fmt_operand(exp, 4, f)
            },
        }
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Special(lhs), Self::Special(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }
                let mut matched = vec![false; rhs.len()];
                lhs.iter().all(|l| {
                    match rhs.iter().enumerate().position(|(i, r)| !matched[i] && l == r) {
                        Some(i) => {
                            matched[i] = true;
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Hash for Primary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(n) => n.hash(state),
            // `0.0` and `-0.0` compare equal
            Self::Float(f) if f.is_zero() => 0u64.hash(state),
            Self::Float(f) => f.to_f64().to_bits().hash(state),
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            },
        }
    }
}

/// Hashes consistently with strict equality: the hashes of the terms / factors of a sum / product
/// are combined independently of their order.
impl Hash for SymExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Primary(primary) => primary.hash(state),
            Self::Special(special) => special.hash(state),
            Self::Add(children) | Self::Mul(children) => {
                let combined = children.iter().fold(0u64, |acc, child| {
                    let mut hasher = DefaultHasher::new();
                    child.hash(&mut hasher);
                    acc.wrapping_add(hasher.finish())
                });
                children.len().hash(state);
                combined.hash(state);
            },
            Self::Exp(base, exp) => {
                base.hash(state);
                exp.hash(state);
            },
        }
    }
}

impl Default for SymExpr {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for SymExpr {
    fn from(n: i64) -> Self {
        Self::integer(int(n))
    }
}

impl From<Rational> for SymExpr {
    fn from(r: Rational) -> Self {
        Self::rational(r)
    }
}

/// Adds two expressions together, flattening nested sums. No simplification is done.
impl Add for SymExpr {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::take(self);
        let mut terms = match lhs {
            Self::Add(terms) => terms,
            other => vec![other],
        };
        match rhs {
            Self::Add(rhs_terms) => terms.extend(rhs_terms),
            other => terms.push(other),
        }
        *self = Self::Add(terms);
    }
}

/// Multiplies two expressions together, flattening nested products. No simplification is done.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self::Output {
        self *= rhs;
        self
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::take(self);
        let mut factors = match lhs {
            Self::Mul(factors) => factors,
            other => vec![other],
        };
        match rhs {
            Self::Mul(rhs_factors) => factors.extend(rhs_factors),
            other => factors.push(other),
        }
        *self = Self::Mul(factors);
    }
}

/// Negates the expression by multiplying it by `-1`. No simplification is done.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::integer(-1) * self
    }
}

/// `a - b = a + (-1)*b`. No simplification is done.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// `a / b = a * b^-1`. No simplification is done.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rational_representation() {
        assert_eq!(SymExpr::fraction(6, 3), SymExpr::integer(2));
        assert_eq!(SymExpr::fraction(1, 2), SymExpr::integer(2).recip());
        assert_eq!(
            SymExpr::fraction(-3, 4),
            SymExpr::Mul(vec![SymExpr::integer(-3), SymExpr::integer(4).recip()]),
        );
        assert_eq!(SymExpr::fraction(-3, 4).as_rational(), Some(rational(-3, 4)));
    }

    #[test]
    fn strict_equality_ignores_order() {
        let x = SymExpr::symbol("x");
        let y = SymExpr::symbol("y");
        assert_eq!(x.clone() + y.clone(), y.clone() + x.clone());
        assert_ne!(x.clone() + x.clone() + y.clone(), x.clone() + y.clone() + y);
    }

    #[test]
    fn hash_ignores_order() {
        use std::collections::HashSet;

        let x = SymExpr::symbol("x");
        let y = SymExpr::symbol("y");
        let mut set = HashSet::new();
        set.insert(x.clone() * y.clone() + SymExpr::integer(1));
        assert!(set.contains(&(SymExpr::integer(1) + y.clone() * x.clone())));
        assert!(!set.contains(&(x + y)));
    }

    #[test]
    fn operators_flatten() {
        let x = SymExpr::symbol("x");
        let sum = x.clone() + x.clone() + x.clone();
        assert_eq!(sum, SymExpr::Add(vec![x.clone(), x.clone(), x.clone()]));
        let product = SymExpr::integer(2) * x.clone() * x.clone();
        assert_eq!(product, SymExpr::Mul(vec![SymExpr::integer(2), x.clone(), x]));
    }

    #[test]
    fn free_symbols_skip_constants() {
        let expr = SymExpr::symbol("x") * SymExpr::symbol(PI) + SymExpr::symbol("a");
        assert_eq!(expr.free_symbols(), vec!["x", "a"]);
    }

    #[test]
    fn display_subtraction() {
        let x = SymExpr::symbol("x");
        let expr = x.clone().pow(SymExpr::integer(2)) - SymExpr::integer(4) * x;
        assert_eq!(expr.to_string(), "x^2 - 4*x");
    }

    #[test]
    fn specials_are_not_finite() {
        let expr = SymExpr::symbol("x") + SymExpr::Special(Special::Infinity);
        assert!(!expr.is_finite());
        assert!(SymExpr::float(crate::primitive::float(1) / 0).is_infinite());
    }
}
