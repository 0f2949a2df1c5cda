//! Partial fraction decomposition of rational functions with rational coefficients.
//!
//! The denominator is factored over the rationals with [`Poly::rational_roots`]. After the
//! rational roots are divided out, at most one irreducible quadratic factor may remain; anything
//! of higher degree is not decomposed.

use rug::Rational;
use crate::symbolic::{expr::SymExpr, poly::Poly, simplify::normalize};

/// The term `coefficient / (x - root)^power`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoleTerm {
    pub root: Rational,
    pub power: usize,
    pub coefficient: Rational,
}

/// The term `(linear x + constant) / (x^2 + p x + q)`, where the denominator has no real roots.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticTerm {
    pub linear: Rational,
    pub constant: Rational,
    pub p: Rational,
    pub q: Rational,
}

impl QuadraticTerm {
    /// Returns `(h, k)` such that `x^2 + p x + q = (x + h)^2 + k` with `k > 0`.
    pub fn completed_square(&self) -> (Rational, Rational) {
        let h = self.p.clone() / Rational::from(2);
        let k = self.q.clone() - h.clone() * h.clone();
        (h, k)
    }
}

/// The decomposition `polynomial + sum of pole terms + quadratic term`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFractions {
    pub polynomial: Poly,
    pub poles: Vec<PoleTerm>,
    pub quadratic: Option<QuadraticTerm>,
}

impl PartialFractions {
    /// Reassembles the decomposition into a normalized expression in `var`.
    pub fn to_expr(&self, var: &str) -> SymExpr {
        let x = SymExpr::symbol(var);
        let mut terms = vec![self.polynomial.to_expr(var)];
        for pole in &self.poles {
            let factor = x.clone() - SymExpr::rational(pole.root.clone());
            terms.push(
                SymExpr::rational(pole.coefficient.clone())
                    * factor.pow(SymExpr::integer(-(pole.power as i64))),
            );
        }
        if let Some(quadratic) = &self.quadratic {
            let numerator = SymExpr::rational(quadratic.linear.clone()) * x.clone()
                + SymExpr::rational(quadratic.constant.clone());
            let denominator = x.clone().pow(SymExpr::integer(2))
                + SymExpr::rational(quadratic.p.clone()) * x
                + SymExpr::rational(quadratic.q.clone());
            terms.push(numerator * denominator.recip());
        }
        normalize(&SymExpr::Add(terms))
    }
}

/// Solves the square linear system `matrix * x = rhs` by Gaussian elimination. Returns [`None`]
/// if the system is singular.
fn solve_linear_system(mut matrix: Vec<Vec<Rational>>, mut rhs: Vec<Rational>) -> Option<Vec<Rational>> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n).find(|&row| !matrix[row][col].is_zero())?;
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in 0..n {
            if row == col || matrix[row][col].is_zero() {
                continue;
            }
            let factor = Rational::from(&matrix[row][col] / &matrix[col][col]);
            for k in col..n {
                let delta = Rational::from(&factor * &matrix[col][k]);
                matrix[row][k] -= delta;
            }
            let delta = Rational::from(&factor * &rhs[col]);
            rhs[row] -= delta;
        }
    }

    Some((0..n).map(|i| Rational::from(&rhs[i] / &matrix[i][i])).collect())
}

/// Decomposes `numerator / denominator` into partial fractions. Returns [`None`] if the
/// denominator has an irreducible factor of degree greater than two, or more than one irreducible
/// quadratic factor.
pub fn decompose(numerator: &Poly, denominator: &Poly) -> Option<PartialFractions> {
    let (polynomial, remainder) = numerator.div_rem(denominator)?;
    let (roots, rest) = denominator.rational_roots();

    let quadratic = match rest.degree() {
        0 => None,
        2 => {
            let lead = rest.leading();
            let p = rest.coeff(1) / lead.clone();
            let q = rest.coeff(0) / lead;
            let discriminant = p.clone() * p.clone() - Rational::from(4) * q.clone();
            if discriminant >= 0 {
                return None;
            }
            Some((p, q))
        },
        _ => return None,
    };

    // each unknown coefficient multiplies `denominator / factor`
    let mut basis = Vec::new();
    for (root, multiplicity) in &roots {
        for power in 1..=*multiplicity {
            let mut factor = Poly::new(vec![Rational::from(1)]);
            for _ in 0..power {
                factor = factor.mul(&Poly::linear_factor(root));
            }
            basis.push(denominator.div_rem(&factor)?.0);
        }
    }
    if let Some((p, q)) = &quadratic {
        let factor = Poly::new(vec![q.clone(), p.clone(), Rational::from(1)]);
        let cofactor = denominator.div_rem(&factor)?.0;
        basis.push(cofactor.mul(&Poly::new(vec![Rational::new(), Rational::from(1)])));
        basis.push(cofactor);
    }

    let n = denominator.degree();
    if basis.len() != n {
        return None;
    }
    let matrix = (0..n)
        .map(|row| basis.iter().map(|b| b.coeff(row)).collect())
        .collect();
    let rhs = (0..n).map(|row| remainder.coeff(row)).collect();
    let solution = solve_linear_system(matrix, rhs)?;

    let mut solution = solution.into_iter();
    let mut poles = Vec::new();
    for (root, multiplicity) in &roots {
        for power in 1..=*multiplicity {
            let coefficient = solution.next()?;
            if !coefficient.is_zero() {
                poles.push(PoleTerm { root: root.clone(), power, coefficient });
            }
        }
    }
    let quadratic = match quadratic {
        Some((p, q)) => {
            let linear = solution.next()?;
            let constant = solution.next()?;
            (!linear.is_zero() || !constant.is_zero())
                .then_some(QuadraticTerm { linear, constant, p, q })
        },
        None => None,
    };

    Some(PartialFractions { polynomial, poles, quadratic })
}
