use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use num_traits::Float;

use super::format::{as_fraction, render_factored, Notation};
use super::{Polynomial, PolynomialError};
use crate::Complex;

/// A candidate is a root when synthetic division leaves less than this.
pub const REMAINDER_TOLERANCE: f64 = 1e-9;

/// The three rows of a synthetic-division tableau.
///
/// `top_row` is the dividend, `middle_row` the carried products (the first
/// cell is always empty), and `bottom_row` the running sums, whose last
/// entry is the remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticTable {
    pub top_row: Vec<f64>,
    pub middle_row: Vec<Option<f64>>,
    pub bottom_row: Vec<f64>,
}

/// Result of dividing by `(x - root)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDivision {
    pub quotient: Vec<f64>,
    pub remainder: f64,
    pub table: SyntheticTable,
}

/// Divide `coeffs` (highest degree first) by `(x - root)`.
///
/// ```
/// use echelon::synthetic_division;
///
/// let d = synthetic_division(&[1.0, -6.0, 11.0, -6.0], 1.0);
/// assert_eq!(d.quotient, vec![1.0, -5.0, 6.0]);
/// assert_eq!(d.remainder, 0.0);
/// assert_eq!(d.table.middle_row, vec![None, Some(1.0), Some(-5.0), Some(6.0)]);
/// ```
pub fn synthetic_division(coeffs: &[f64], root: f64) -> SyntheticDivision {
    let Some((&first, rest)) = coeffs.split_first() else {
        return SyntheticDivision {
            quotient: Vec::new(),
            remainder: 0.0,
            table: SyntheticTable {
                top_row: Vec::new(),
                middle_row: Vec::new(),
                bottom_row: Vec::new(),
            },
        };
    };

    let mut quotient = Vec::with_capacity(rest.len());
    let mut middle_row = Vec::with_capacity(coeffs.len());
    let mut bottom_row = Vec::with_capacity(coeffs.len());
    middle_row.push(None);
    bottom_row.push(first);

    let mut carry = first;
    for &c in rest {
        quotient.push(carry);
        let product = carry * root;
        middle_row.push(Some(product));
        carry = c + product;
        bottom_row.push(carry);
    }

    SyntheticDivision {
        quotient,
        remainder: carry,
        table: SyntheticTable {
            top_row: coeffs.to_vec(),
            middle_row,
            bottom_row,
        },
    }
}

/// One accepted root: the polynomial it divided and the tableau that proved it.
#[derive(Debug, Clone, PartialEq)]
pub struct RuffiniStep {
    pub root: f64,
    pub coefficients: Vec<f64>,
    pub table: SyntheticTable,
}

/// A root reported by the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    Real(f64),
    Complex(Complex<f64>),
}

impl Root {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Root::Real(_))
    }

    /// The root as a complex number (`im = 0` for real roots).
    #[inline]
    pub fn as_complex(&self) -> Complex<f64> {
        match *self {
            Root::Real(r) => Complex::from_real(r),
            Root::Complex(z) => z,
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Root::Real(r) => match as_fraction(*r) {
                Some(frac) => write!(f, "{}", frac),
                None => write!(f, "{}", r),
            },
            Root::Complex(z) => write!(f, "{}", z),
        }
    }
}

/// Everything the solver found.
///
/// `roots` holds Ruffini roots in discovery order followed by closed-form
/// roots of the last linear or quadratic quotient. `remainder` is what was
/// left unfactored: just the leading coefficient when the polynomial split
/// completely, an irreducible quadratic, or a higher-degree polynomial with
/// no rational roots.
#[derive(Debug, Clone, PartialEq)]
pub struct RuffiniResult {
    pub roots: Vec<Root>,
    pub steps: Vec<RuffiniStep>,
    pub remainder: Vec<f64>,
    /// Plain-text factored form, e.g. `2(x - 1)(x + 1/2)`.
    pub factored_form: String,
    linear_roots: Vec<f64>,
}

impl RuffiniResult {
    /// Factored form in the requested notation.
    pub fn factored(&self, notation: Notation) -> String {
        let remainder = (self.remainder.len() > 1).then_some(self.remainder.as_slice());
        render_factored(self.remainder[0], &self.linear_roots, remainder, notation)
    }

    /// Real roots only, in report order.
    pub fn real_roots(&self) -> Vec<f64> {
        self.roots
            .iter()
            .filter_map(|r| match r {
                Root::Real(x) => Some(*x),
                Root::Complex(_) => None,
            })
            .collect()
    }
}

/// Factor a polynomial given by integer coefficients, highest degree first.
///
/// Fails only when the list is empty or the leading coefficient is zero.
///
/// ```
/// use echelon::{solve_polynomial, Root};
///
/// let r = solve_polynomial(&[1, -6, 11, -6]).unwrap();
/// assert_eq!(r.roots, vec![Root::Real(1.0), Root::Real(2.0), Root::Real(3.0)]);
/// assert_eq!(r.steps.len(), 2);
/// assert_eq!(r.factored_form, "(x - 1)(x - 2)(x - 3)");
/// ```
pub fn solve_polynomial(coeffs: &[i64]) -> Result<RuffiniResult, PolynomialError> {
    Ok(ruffini(&Polynomial::from_integers(coeffs)?))
}

/// Rational-root search by repeated synthetic division, then closed forms.
///
/// For inputs above degree two, each round tries `0` (if the constant term
/// is exactly zero), then the integer divisors of the constant term, then
/// the quotients `p/q` of divisors of the constant and leading terms, each
/// in order of increasing magnitude with negatives first. The first
/// candidate whose remainder is below [`REMAINDER_TOLERANCE`] is recorded as
/// a step and the quotient becomes the working polynomial. Rounds stop at a
/// linear quotient, after `degree - 1` roots, or when no candidate works.
///
/// A remaining linear quotient is solved directly. A remaining quadratic is
/// solved by the quadratic formula; its roots become linear factors when
/// both are rational and it stays as an irreducible factor otherwise.
pub fn ruffini(poly: &Polynomial) -> RuffiniResult {
    let degree = poly.degree();
    let mut working = poly.coefficients().to_vec();
    let mut steps = Vec::new();
    let mut linear_roots: Vec<f64> = Vec::new();

    if degree > 2 {
        while working.len() > 2 && linear_roots.len() < degree - 1 {
            let Some(division) = find_rational_root(&working) else {
                break;
            };
            linear_roots.push(division.root);
            working = division.quotient;
            steps.push(RuffiniStep {
                root: division.root,
                coefficients: division.coefficients,
                table: division.table,
            });
        }
    }

    let mut roots: Vec<Root> = linear_roots.iter().map(|&r| Root::Real(r)).collect();

    let closed_form = match *working.as_slice() {
        [a, b] => {
            let r = clean_zero(-b / a);
            roots.push(Root::Real(r));
            linear_roots.push(r);
            true
        }
        [a, b, c] => {
            let delta = b * b - 4.0 * a * c;
            if delta >= 0.0 {
                let sq = Float::sqrt(delta);
                let r1 = clean_zero((-b + sq) / (2.0 * a));
                let r2 = clean_zero((-b - sq) / (2.0 * a));
                roots.push(Root::Real(r1));
                roots.push(Root::Real(r2));
                let rational = as_fraction(r1).is_some() && as_fraction(r2).is_some();
                if rational {
                    linear_roots.push(r1);
                    linear_roots.push(r2);
                }
                rational
            } else {
                let re = clean_zero(-b / (2.0 * a));
                let im = Float::abs(Float::sqrt(-delta) / (2.0 * a));
                roots.push(Root::Complex(Complex::new(re, im)));
                roots.push(Root::Complex(Complex::new(re, -im)));
                false
            }
        }
        _ => false,
    };
    if closed_form {
        working.truncate(1);
    }

    let remainder = working;
    let factored_form = render_factored(
        remainder[0],
        &linear_roots,
        (remainder.len() > 1).then_some(remainder.as_slice()),
        Notation::Plain,
    );

    RuffiniResult {
        roots,
        steps,
        remainder,
        factored_form,
        linear_roots,
    }
}

struct AcceptedRoot {
    root: f64,
    coefficients: Vec<f64>,
    quotient: Vec<f64>,
    table: SyntheticTable,
}

/// One search round over the candidate sets, in order.
fn find_rational_root(coeffs: &[f64]) -> Option<AcceptedRoot> {
    let leading = coeffs[0];
    let constant = coeffs[coeffs.len() - 1];

    if constant == 0.0 {
        if let Some(found) = try_candidates(coeffs, &[0.0]) {
            return Some(found);
        }
    }

    let p = candidate_divisors(constant);
    let q = candidate_divisors(leading);

    let mut integers: Vec<f64> = p.iter().map(|&d| d as f64).collect();
    sort_candidates(&mut integers);
    if let Some(found) = try_candidates(coeffs, &integers) {
        return Some(found);
    }

    let mut rationals: Vec<f64> = Vec::new();
    for &pi in &p {
        for &qi in q.iter().filter(|&&qi| qi != 0) {
            let r = pi as f64 / qi as f64;
            if !integers.contains(&r) && !rationals.contains(&r) {
                rationals.push(r);
            }
        }
    }
    sort_candidates(&mut rationals);
    try_candidates(coeffs, &rationals)
}

fn try_candidates(coeffs: &[f64], candidates: &[f64]) -> Option<AcceptedRoot> {
    candidates.iter().find_map(|&root| {
        let division = synthetic_division(coeffs, root);
        (Float::abs(division.remainder) < REMAINDER_TOLERANCE).then(|| AcceptedRoot {
            root: clean_zero(root),
            coefficients: coeffs.to_vec(),
            quotient: division.quotient,
            table: division.table,
        })
    })
}

/// Increasing magnitude, negative before positive on ties.
fn sort_candidates(values: &mut [f64]) {
    values.sort_by(|a, b| {
        Float::abs(*a)
            .partial_cmp(&Float::abs(*b))
            .unwrap_or(Ordering::Equal)
            .then(a.partial_cmp(b).unwrap_or(Ordering::Equal))
    });
}

/// Largest `|n|` whose divisors are enumerated; beyond it only `±1` are offered.
///
/// Trial division up to `√n` stays under a million steps, and every divisor
/// fits in `i64` with room to negate.
pub const MAX_DIVISOR_SEARCH: f64 = 1e12;

/// Signed divisors `±d` of `round(|n|)`, ascending. Zero yields `[0]`.
///
/// Magnitudes above [`MAX_DIVISOR_SEARCH`], infinity included, yield only
/// the trivial divisors `[-1, 1]`.
///
/// ```
/// use echelon::candidate_divisors;
///
/// assert_eq!(candidate_divisors(6.0), vec![-6, -3, -2, -1, 1, 2, 3, 6]);
/// assert_eq!(candidate_divisors(-4.2), vec![-4, -2, -1, 1, 2, 4]);
/// assert_eq!(candidate_divisors(0.0), vec![0]);
/// assert_eq!(candidate_divisors(i64::MIN as f64), vec![-1, 1]);
/// ```
pub fn candidate_divisors(n: f64) -> Vec<i64> {
    let rounded = Float::round(Float::abs(n));
    if rounded.is_nan() || rounded < 1.0 {
        return vec![0];
    }
    if rounded > MAX_DIVISOR_SEARCH {
        return vec![-1, 1];
    }
    let num = rounded as i64;

    let mut divisors = Vec::new();
    let mut i = 1i64;
    while i <= num / i {
        if num % i == 0 {
            divisors.push(i);
            if i != num / i {
                divisors.push(num / i);
            }
        }
        i += 1;
    }

    let mut signed: Vec<i64> = divisors.iter().flat_map(|&d| [d, -d]).collect();
    signed.sort_unstable();
    signed
}

/// Map `-0.0` to `0.0` so roots print without a stray sign.
#[inline]
fn clean_zero(x: f64) -> f64 {
    x + 0.0
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    head: &str,
    gutter: usize,
    row: &[String],
    widths: &[usize],
) -> fmt::Result {
    write!(f, "{:>g$} │", head, g = gutter)?;
    for (s, &w) in row.iter().zip(widths) {
        write!(f, " {:>w$}", s, w = w)?;
    }
    Ok(())
}

impl fmt::Display for RuffiniStep {
    /// Three aligned rows with the root in the gutter:
    ///
    /// ```text
    ///  │ 1 -6 11 -6
    /// 1 │    1 -5  6
    ///  │ 1 -5  6  0
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use alloc::string::ToString;

        let cell = |v: f64| (v + 0.0).to_string();
        let top: Vec<String> = self.table.top_row.iter().map(|&v| cell(v)).collect();
        let middle: Vec<String> = self
            .table
            .middle_row
            .iter()
            .map(|v| v.map(cell).unwrap_or_default())
            .collect();
        let bottom: Vec<String> = self.table.bottom_row.iter().map(|&v| cell(v)).collect();

        let widths: Vec<usize> = (0..top.len())
            .map(|j| {
                [&top, &middle, &bottom]
                    .iter()
                    .map(|row| row.get(j).map_or(0, |s| s.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let label = cell(self.root);
        let gutter = label.chars().count();

        write_row(f, "", gutter, &top, &widths)?;
        writeln!(f)?;
        write_row(f, &label, gutter, &middle, &widths)?;
        writeln!(f)?;
        write_row(f, "", gutter, &bottom, &widths)
    }
}
