//! Polynomials with real coefficients and the rational-root (Ruffini) solver.
//!
//! Coefficients are stored highest degree first, so `[1, -6, 11, -6]` is
//! `x³ - 6x² + 11x - 6`.

pub(crate) mod format;
pub(crate) mod rational;
pub(crate) mod ruffini;

use alloc::vec::Vec;
use core::fmt;

pub use format::Notation;
pub use rational::{rationalize, Fraction};
pub use ruffini::{
    candidate_divisors, ruffini, solve_polynomial, synthetic_division, Root, RuffiniResult,
    RuffiniStep, SyntheticDivision, SyntheticTable, MAX_DIVISOR_SEARCH,
    REMAINDER_TOLERANCE,
};

use crate::Complex;

/// Why a coefficient list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No coefficients at all.
    Empty,
    /// The first (highest-degree) coefficient is zero, so the degree is undefined.
    ZeroLeadingCoefficient,
}

/// Errors from polynomial construction and solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolynomialError {
    InvalidPolynomial(InvalidReason),
}

impl fmt::Display for PolynomialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolynomialError::InvalidPolynomial(InvalidReason::Empty) => {
                write!(f, "invalid polynomial: no coefficients")
            }
            PolynomialError::InvalidPolynomial(InvalidReason::ZeroLeadingCoefficient) => {
                write!(f, "invalid polynomial: leading coefficient is zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PolynomialError {}

/// Polynomial with `f64` coefficients, highest degree first.
///
/// The leading coefficient is never zero.
///
/// ```
/// use echelon::Polynomial;
///
/// let p = Polynomial::from_integers(&[1, -6, 11, -6]).unwrap();
/// assert_eq!(p.degree(), 3);
/// assert_eq!(p.eval(2.0), 0.0);
/// assert_eq!(p.to_string(), "x^3 - 6x^2 + 11x - 6");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Validate and wrap a coefficient list.
    pub fn new(coeffs: Vec<f64>) -> Result<Self, PolynomialError> {
        match coeffs.first() {
            None => Err(PolynomialError::InvalidPolynomial(InvalidReason::Empty)),
            Some(&lead) if lead == 0.0 => Err(PolynomialError::InvalidPolynomial(
                InvalidReason::ZeroLeadingCoefficient,
            )),
            Some(_) => Ok(Self { coeffs }),
        }
    }

    /// Validate and wrap integer coefficients.
    pub fn from_integers(coeffs: &[i64]) -> Result<Self, PolynomialError> {
        Self::new(coeffs.iter().map(|&c| c as f64).collect())
    }

    /// Expand `leading · Π (x - rᵢ)`.
    ///
    /// Panics if `leading` is zero.
    ///
    /// ```
    /// use echelon::Polynomial;
    ///
    /// let p = Polynomial::from_roots(2.0, &[1.0, -0.5]);
    /// assert_eq!(p.coefficients(), &[2.0, -1.0, -1.0]);
    /// ```
    pub fn from_roots(leading: f64, roots: &[f64]) -> Self {
        assert!(leading != 0.0, "leading coefficient must be non-zero");
        let mut coeffs = alloc::vec![leading];
        for &r in roots {
            // multiply by (x - r): shift up one degree, subtract r times the old
            let mut next = coeffs.clone();
            next.push(0.0);
            for (i, &c) in coeffs.iter().enumerate() {
                next[i + 1] -= r * c;
            }
            coeffs = next;
        }
        Self { coeffs }
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    #[inline]
    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    #[inline]
    pub fn constant(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate at a complex point by Horner's rule.
    pub fn eval_complex(&self, z: Complex<f64>) -> Complex<f64> {
        self.coeffs
            .iter()
            .fold(Complex::new(0.0, 0.0), |acc, &c| acc * z + c)
    }

    /// Run the Ruffini solver on this polynomial.
    pub fn solve(&self) -> RuffiniResult {
        ruffini(self)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::render_polynomial(&self.coeffs, Notation::Plain))
    }
}
