//! Univariate polynomials with exact rational coefficients.
//!
//! Polynomials are extracted from expressions with [`Poly::from_expr`] after expansion. They are
//! used by the equation solver, by partial fraction decomposition in the integrator, and by the
//! inverse Laplace transform.

use rug::{Integer, Rational};
use std::fmt;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{expand, normalize},
};

/// The largest number of trial divisions done when enumerating the divisors of a coefficient.
const MAX_TRIAL_DIVISIONS: u64 = 1_000_000;

/// If the term is `c * var^n` for an expression `c` free of `var` and a non-negative integer `n`,
/// returns `(c, n)`.
fn split_monomial(term: &SymExpr, var: &str) -> Option<(SymExpr, usize)> {
    let degree_of = |factor: &SymExpr| -> Option<usize> {
        if factor.as_symbol() == Some(var) {
            return Some(1);
        }
        match factor {
            SymExpr::Exp(base, exp) if base.as_symbol() == Some(var) => exp.as_integer()?.to_usize(),
            _ => None,
        }
    };

    match term {
        SymExpr::Mul(factors) => {
            let mut coefficient = Vec::new();
            let mut degree = 0;
            for factor in factors {
                if factor.is_free_of(var) {
                    coefficient.push(factor.clone());
                } else {
                    degree += degree_of(factor)?;
                }
            }
            Some((SymExpr::Mul(coefficient).downgrade(), degree))
        },
        _ if term.is_free_of(var) => Some((term.clone(), 0)),
        _ => Some((SymExpr::one(), degree_of(term)?)),
    }
}

/// Returns the coefficients of the expression as a polynomial in `var`, in ascending order of
/// degree. The coefficients may contain other symbols. Returns [`None`] if the expression is not
/// a polynomial in `var`.
///
/// `a x^2 + 3x` -> `[0, 3, a]`
pub fn coefficients(expr: &SymExpr, var: &str) -> Option<Vec<SymExpr>> {
    let expanded = expand(expr);
    let terms = match expanded {
        SymExpr::Add(terms) => terms,
        other => vec![other],
    };

    let mut coefficients: Vec<Vec<SymExpr>> = Vec::new();
    for term in &terms {
        let (coefficient, degree) = split_monomial(term, var)?;
        if coefficients.len() <= degree {
            coefficients.resize(degree + 1, Vec::new());
        }
        coefficients[degree].push(coefficient);
    }

    let mut result = coefficients.into_iter()
        .map(|parts| normalize(&SymExpr::Add(parts).downgrade()))
        .collect::<Vec<_>>();
    while result.last().is_some_and(SymExpr::is_zero) {
        result.pop();
    }
    Some(result)
}

/// If the expression is `a var + b` with `a` nonzero and `a`, `b` free of `var`, returns
/// `(a, b)`.
pub fn as_linear(expr: &SymExpr, var: &str) -> Option<(SymExpr, SymExpr)> {
    match coefficients(expr, var)?.as_slice() {
        [b, a] => Some((a.clone(), b.clone())),
        _ => None,
    }
}

/// Returns the positive divisors of `n`, or [`None`] if `n` is zero or too large to factor.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs();
    if n.is_zero() {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = Integer::from(1);
    let mut iterations = 0;
    while i.clone() * &i <= n {
        iterations += 1;
        if iterations > MAX_TRIAL_DIVISIONS {
            return None;
        }
        if n.is_divisible(&i) {
            let pair = Integer::from(&n / &i);
            if pair != i {
                large.push(pair);
            }
            small.push(i.clone());
        }
        i += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

/// A polynomial with rational coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    /// Coefficients in ascending order of degree. The last coefficient is never zero.
    coeffs: Vec<Rational>,
}

impl Poly {
    /// Creates a polynomial from its coefficients in ascending order of degree.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Extracts a polynomial in `var` from the expression. Returns [`None`] if the expression is
    /// not a polynomial in `var` with rational coefficients.
    pub fn from_expr(expr: &SymExpr, var: &str) -> Option<Self> {
        let coeffs = coefficients(expr, var)?
            .iter()
            .map(SymExpr::as_rational)
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(coeffs))
    }

    /// The polynomial `x - root`.
    pub fn linear_factor(root: &Rational) -> Self {
        Self::new(vec![-root.clone(), Rational::from(1)])
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The coefficient of `x^i`.
    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    /// The coefficient of the highest power.
    pub fn leading(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    /// Evaluates the polynomial with Horner's method.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter().rev().fold(Rational::new(), |acc, c| acc * x + c)
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs.iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c.clone() * Rational::from(i))
                .collect(),
        )
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::new(Vec::new());
        }
        let mut coeffs = vec![Rational::new(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += Rational::from(a * b);
            }
        }
        Self::new(coeffs)
    }

    /// Divides by `divisor`, returning the quotient and remainder. Returns [`None`] if the divisor
    /// is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }

        let mut remainder = self.coeffs.clone();
        let divisor_degree = divisor.degree();
        let lead = divisor.leading();
        if remainder.len() <= divisor_degree {
            return Some((Self::new(Vec::new()), self.clone()));
        }

        let mut quotient = vec![Rational::new(); remainder.len() - divisor_degree];
        for i in (0..quotient.len()).rev() {
            let factor = Rational::from(&remainder[i + divisor_degree] / &lead);
            for (j, c) in divisor.coeffs.iter().enumerate() {
                remainder[i + j] -= Rational::from(&factor * c);
            }
            quotient[i] = factor;
        }
        remainder.truncate(divisor_degree);
        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// Divides by `x - root`, assuming `root` is a root of the polynomial.
    pub fn deflate(&self, root: &Rational) -> Self {
        match self.div_rem(&Self::linear_factor(root)) {
            Some((quotient, _)) => quotient,
            None => self.clone(),
        }
    }

    /// Finds the rational roots of the polynomial with the rational root theorem, together with
    /// their multiplicities, in ascending order. Returns the roots and the polynomial left after
    /// dividing them out.
    pub fn rational_roots(&self) -> (Vec<(Rational, usize)>, Self) {
        let mut roots: Vec<(Rational, usize)> = Vec::new();
        let mut rest = self.clone();
        if rest.is_zero() {
            return (roots, rest);
        }

        // x = 0
        let zeros = rest.coeffs.iter().take_while(|c| c.is_zero()).count();
        if zeros > 0 {
            rest = Self::new(rest.coeffs[zeros..].to_vec());
            roots.push((Rational::new(), zeros));
        }

        // scale to integer coefficients
        let denominator_lcm = rest.coeffs.iter()
            .fold(Integer::from(1), |acc, c| acc.lcm(c.denom()));
        let integer_coeffs = rest.coeffs.iter()
            .map(|c| Integer::from((c.clone() * Rational::from(denominator_lcm.clone())).numer()))
            .collect::<Vec<_>>();

        let candidates = match (
            integer_coeffs.first().and_then(divisors),
            integer_coeffs.last().and_then(divisors),
        ) {
            (Some(ps), Some(qs)) => {
                let mut candidates = Vec::new();
                for p in &ps {
                    for q in &qs {
                        let candidate = Rational::from((p.clone(), q.clone()));
                        for signed in [candidate.clone(), -candidate] {
                            if !candidates.contains(&signed) {
                                candidates.push(signed);
                            }
                        }
                    }
                }
                candidates
            },
            _ => Vec::new(),
        };

        for candidate in candidates {
            let mut multiplicity = 0;
            while rest.degree() > 0 && rest.eval(&candidate).is_zero() {
                rest = rest.deflate(&candidate);
                multiplicity += 1;
            }
            if multiplicity > 0 {
                roots.push((candidate, multiplicity));
            }
        }

        roots.sort_by(|a, b| a.0.cmp(&b.0));
        (roots, rest)
    }

    /// Converts the polynomial into a normalized expression in `var`.
    pub fn to_expr(&self, var: &str) -> SymExpr {
        let terms = self.coeffs.iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| {
                SymExpr::rational(c.clone()) * SymExpr::symbol(var).pow(SymExpr::integer(i))
            })
            .collect();
        normalize(&SymExpr::Add(terms))
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr("x"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::simplify::tests::parse;
    use pretty_assertions::assert_eq;

    fn poly(input: &str) -> Poly {
        Poly::from_expr(&parse(input), "x").unwrap()
    }

    fn r(num: i64, den: i64) -> Rational {
        Rational::from((num, den))
    }

    #[test]
    fn extract() {
        let p = poly("2x^3 - x/2 + 7");
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coeff(0), r(7, 1));
        assert_eq!(p.coeff(1), r(-1, 2));
        assert_eq!(p.coeff(2), r(0, 1));
        assert_eq!(p.leading(), r(2, 1));
        assert_eq!(poly("(x + 1)^2"), Poly::new(vec![r(1, 1), r(2, 1), r(1, 1)]));
    }

    #[test]
    fn not_polynomials() {
        assert_eq!(Poly::from_expr(&parse("sin(x) + 1"), "x"), None);
        assert_eq!(Poly::from_expr(&parse("1/x"), "x"), None);
        assert_eq!(Poly::from_expr(&parse("a*x"), "x"), None);
    }

    #[test]
    fn symbolic_coefficients() {
        let coeffs = coefficients(&parse("a*x^2 + b*x + a"), "x").unwrap();
        assert_eq!(coeffs, vec![parse("a"), parse("b"), parse("a")]);
    }

    #[test]
    fn division() {
        let (q, r0) = poly("x^3 - 1").div_rem(&poly("x - 1")).unwrap();
        assert_eq!(q, poly("x^2 + x + 1"));
        assert!(r0.is_zero());

        let (q, rem) = poly("x^2 + 1").div_rem(&poly("x + 1")).unwrap();
        assert_eq!(q, poly("x - 1"));
        assert_eq!(rem, poly("2"));
    }

    #[test]
    fn roots() {
        let (roots, rest) = poly("x^2 - 4").rational_roots();
        assert_eq!(roots, vec![(r(-2, 1), 1), (r(2, 1), 1)]);
        assert_eq!(rest.degree(), 0);

        let (roots, rest) = poly("2x^3 - 3x^2 + x").rational_roots();
        assert_eq!(roots, vec![(r(0, 1), 1), (r(1, 2), 1), (r(1, 1), 1)]);
        assert_eq!(rest.degree(), 0);

        let (roots, _) = poly("(x - 1)^3").rational_roots();
        assert_eq!(roots, vec![(r(1, 1), 3)]);

        let (roots, rest) = poly("x^3 - 2x").rational_roots();
        assert_eq!(roots, vec![(r(0, 1), 1)]);
        assert_eq!(rest, poly("x^2 - 2"));
    }

    #[test]
    fn to_expr_round_trip() {
        assert_eq!(poly("3x^2 - x + 1/2").to_expr("x"), parse("3x^2 - x + 1/2"));
    }
}
