//! Human-readable rendering of polynomials and their factored forms.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use num_traits::Float;

use super::rational::{rationalize, Fraction};

/// Largest denominator shown as a fraction; anything finer prints as a decimal.
const MAX_DENOMINATOR: u64 = 10_000;
/// Coefficients and roots within this of zero (or one) are treated as such.
const DISPLAY_TOLERANCE: f64 = 1e-9;

/// Output syntax for factored forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `2(x - 1)(x + 1/2)`, `x^2`
    #[default]
    Plain,
    /// `2(x - 1)(x + \frac{1}{2})`, `x^{2}`
    Latex,
}

/// `x` as a fraction with a small denominator, if it is one to display precision.
pub(crate) fn as_fraction(x: f64) -> Option<Fraction> {
    let f = rationalize(x, MAX_DENOMINATOR)?;
    let scale = Float::abs(x).max(1.0);
    (Float::abs(f.value() - x) <= DISPLAY_TOLERANCE * scale).then_some(f)
}

#[inline]
fn is_zero(x: f64) -> bool {
    Float::abs(x) < DISPLAY_TOLERANCE
}

#[inline]
fn is_one(x: f64) -> bool {
    Float::abs(x - 1.0) < DISPLAY_TOLERANCE
}

/// `|x|` as an integer, a fraction, or a decimal fallback.
fn magnitude(x: f64, notation: Notation) -> String {
    match as_fraction(x).map(|f| f.abs()) {
        Some(f) if f.is_integer() => format!("{}", f.numer),
        Some(f) => match notation {
            Notation::Plain => format!("{}/{}", f.numer, f.denom),
            Notation::Latex => format!("\\frac{{{}}}{{{}}}", f.numer, f.denom),
        },
        None => format!("{}", Float::abs(x)),
    }
}

/// `|x|` in multiplier position: plain-text fractions are parenthesized so
/// `(1/2)x` cannot be misread.
fn multiplier(x: f64, notation: Notation) -> String {
    let m = magnitude(x, notation);
    if notation == Notation::Plain && m.contains('/') {
        format!("({})", m)
    } else {
        m
    }
}

fn power(p: usize, notation: Notation) -> String {
    match (p, notation) {
        (0, _) => String::new(),
        (1, _) => String::from("x"),
        (p, Notation::Plain) => format!("x^{}", p),
        (p, Notation::Latex) => format!("x^{{{}}}", p),
    }
}

fn exponent(k: usize, notation: Notation) -> String {
    match (k, notation) {
        (0 | 1, _) => String::new(),
        (k, Notation::Plain) => format!("^{}", k),
        (k, Notation::Latex) => format!("^{{{}}}", k),
    }
}

/// Expanded form, highest degree first; zero terms are skipped.
///
/// `[1, -6, 11, -6]` renders as `x^3 - 6x^2 + 11x - 6`.
pub(crate) fn render_polynomial(coeffs: &[f64], notation: Notation) -> String {
    let degree = coeffs.len().saturating_sub(1);
    let mut out = String::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if is_zero(c) {
            continue;
        }
        let p = degree - i;

        out.push_str(match (out.is_empty(), c < 0.0) {
            (true, false) => "",
            (true, true) => "-",
            (false, false) => " + ",
            (false, true) => " - ",
        });

        if p == 0 {
            out.push_str(&magnitude(c, notation));
        } else {
            if !is_one(Float::abs(c)) {
                out.push_str(&multiplier(c, notation));
            }
            out.push_str(&power(p, notation));
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Count repeated roots, keeping first-appearance order.
fn group_roots(roots: &[f64]) -> Vec<(f64, usize)> {
    let mut groups: Vec<(f64, usize)> = Vec::new();
    for &r in roots {
        match groups.iter_mut().find(|(g, _)| is_zero(*g - r)) {
            Some((_, count)) => *count += 1,
            None => groups.push((r, 1)),
        }
    }
    groups
}

/// `leading · Π (x - rᵢ) · (remainder / leading)`.
///
/// `leading` is the leading coefficient of the unfactored polynomial;
/// `remainder`, when present, is the irreducible part (degree ≥ 2) and is
/// printed monic.
pub(crate) fn render_factored(
    leading: f64,
    roots: &[f64],
    remainder: Option<&[f64]>,
    notation: Notation,
) -> String {
    let has_factors = !roots.is_empty() || remainder.is_some();
    let mut out = String::new();

    if is_one(-leading) {
        out.push('-');
    } else if !is_one(leading) {
        if leading < 0.0 {
            out.push('-');
        }
        if has_factors {
            out.push_str(&multiplier(leading, notation));
        } else {
            out.push_str(&magnitude(leading, notation));
        }
    }

    for (root, count) in group_roots(roots) {
        if is_zero(root) {
            out.push('x');
        } else {
            let sign = if root > 0.0 { '-' } else { '+' };
            out.push_str(&format!("(x {} {})", sign, magnitude(root, notation)));
        }
        out.push_str(&exponent(count, notation));
    }

    if let Some(rem) = remainder {
        let lead = rem[0];
        let monic: Vec<f64> = rem.iter().map(|&c| c / lead).collect();
        out.push('(');
        out.push_str(&render_polynomial(&monic, notation));
        out.push(')');
    }

    match out.as_str() {
        "" => String::from("1"),
        "-" => String::from("-1"),
        _ => out,
    }
}
