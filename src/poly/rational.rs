use core::fmt;

use num_traits::Float;

/// Reduced fraction `numer / denom` with `denom > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numer: i64,
    pub denom: u64,
}

impl Fraction {
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.abs(),
            denom: self.denom,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Best rational approximation of `x` with denominator at most `max_denominator`.
///
/// Walks the continued-fraction convergents of `|x|` and, once the next one
/// would exceed the bound, picks the closer of the last convergent and the
/// largest admissible semiconvergent. Returns `None` for non-finite input,
/// a zero bound, or a numerator that would not fit in `i64`.
///
/// ```
/// use echelon::rationalize;
///
/// let f = rationalize(-0.75, 100).unwrap();
/// assert_eq!((f.numer, f.denom), (-3, 4));
/// assert_eq!(rationalize(1.0 / 3.0, 1000).unwrap().to_string(), "1/3");
/// assert_eq!(rationalize(3.14159265, 10).unwrap().to_string(), "22/7");
/// ```
pub fn rationalize(x: f64, max_denominator: u64) -> Option<Fraction> {
    if !x.is_finite() || max_denominator == 0 || Float::abs(x) >= 9.0e18 {
        return None;
    }

    let negative = x < 0.0;
    let target = Float::abs(x);
    let mut v = target;

    // (p0/q0, p1/q1) are the two most recent convergents
    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    loop {
        let a_f = Float::floor(v);
        if q1 > 0 && a_f > max_denominator as f64 {
            break;
        }
        let a = a_f as u64;
        let q2 = a.checked_mul(q1).and_then(|t| t.checked_add(q0))?;
        if q2 > max_denominator {
            break;
        }
        let p2 = a.checked_mul(p1).and_then(|t| t.checked_add(p0))?;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let frac = v - a_f;
        if frac == 0.0 {
            break;
        }
        v = 1.0 / frac;
    }

    // largest semiconvergent that still respects the bound
    let k = (max_denominator - q0) / q1;
    let conv_err = Float::abs(p1 as f64 / q1 as f64 - target);
    let (p, q) = match k.checked_mul(p1).and_then(|t| t.checked_add(p0)) {
        Some(sp) => {
            let sq = q0 + k * q1;
            let semi_err = Float::abs(sp as f64 / sq as f64 - target);
            if semi_err < conv_err {
                (sp, sq)
            } else {
                (p1, q1)
            }
        }
        None => (p1, q1),
    };

    let numer = i64::try_from(p).ok()?;
    Some(Fraction {
        numer: if negative { -numer } else { numer },
        denom: q,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(numer: i64, denom: u64) -> Fraction {
        Fraction { numer, denom }
    }

    #[test]
    fn integers_and_simple_fractions() {
        assert_eq!(rationalize(0.0, 10), Some(frac(0, 1)));
        assert_eq!(rationalize(5.0, 10), Some(frac(5, 1)));
        assert_eq!(rationalize(-2.0, 10), Some(frac(-2, 1)));
        assert_eq!(rationalize(0.5, 10), Some(frac(1, 2)));
        assert_eq!(rationalize(-1.5, 10), Some(frac(-3, 2)));
        assert_eq!(rationalize(2.0 / 3.0, 10), Some(frac(2, 3)));
    }

    #[test]
    fn bound_respected() {
        // π: 3, 22/7, 333/106, 355/113
        assert_eq!(rationalize(core::f64::consts::PI, 7), Some(frac(22, 7)));
        assert_eq!(rationalize(core::f64::consts::PI, 200), Some(frac(355, 113)));
        assert_eq!(rationalize(0.3, 2), Some(frac(1, 2)));
        assert_eq!(rationalize(0.1, 1), Some(frac(0, 1)));
    }

    #[test]
    fn irrational_is_only_approximated() {
        let f = rationalize(core::f64::consts::SQRT_2, 10_000).unwrap();
        assert!(f.denom <= 10_000);
        assert!((f.value() - core::f64::consts::SQRT_2).abs() < 1e-7);
        assert!((f.value() - core::f64::consts::SQRT_2).abs() > 1e-9);
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(rationalize(f64::NAN, 10), None);
        assert_eq!(rationalize(f64::INFINITY, 10), None);
        assert_eq!(rationalize(1.0, 0), None);
    }

    #[test]
    fn display() {
        assert_eq!(frac(-3, 4).to_string(), "-3/4");
        assert_eq!(frac(7, 1).to_string(), "7");
        assert_eq!(frac(-3, 4).abs(), frac(3, 4));
    }
}
