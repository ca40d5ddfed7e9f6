//! Small complex value type used by the row-reduction kernel and the
//! polynomial root finder.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_traits::{Float, Num, One, Zero};

/// Complex number `re + im·i`.
///
/// A plain `Copy` value: every operator returns a fresh value.
///
/// ```
/// use echelon::Complex;
///
/// let z = Complex::new(3.0_f64, 4.0);
/// assert_eq!(z.norm(), 5.0);
/// assert_eq!(z.conj(), Complex::new(3.0, -4.0));
/// assert_eq!(z * z.conj(), Complex::new(25.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[inline]
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Float> Complex<T> {
    /// The imaginary unit.
    #[inline]
    pub fn i() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Promote a real value (`im = 0`).
    #[inline]
    pub fn from_real(re: T) -> Self {
        Self::new(re, T::zero())
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Squared modulus `re² + im²`.
    #[inline]
    pub fn norm_sqr(&self) -> T {
        self.re * self.re + self.im * self.im
    }

    /// Modulus `|z|`, computed without intermediate overflow.
    #[inline]
    pub fn norm(&self) -> T {
        self.re.hypot(self.im)
    }

    /// Argument in `(-π, π]`.
    #[inline]
    pub fn arg(&self) -> T {
        self.im.atan2(self.re)
    }

    /// True when `|im| < eps`.
    #[inline]
    pub fn is_real(&self, eps: T) -> bool {
        self.im.abs() < eps
    }

    /// Principal square root (branch cut on the negative real axis).
    ///
    /// ```
    /// use echelon::Complex;
    ///
    /// let r = Complex::new(-4.0_f64, 0.0).sqrt();
    /// assert_eq!(r, Complex::new(0.0, 2.0));
    /// ```
    pub fn sqrt(&self) -> Self {
        if self.im == T::zero() {
            return if self.re >= T::zero() {
                Self::new(self.re.sqrt(), T::zero())
            } else {
                Self::new(T::zero(), (-self.re).sqrt())
            };
        }
        let two = T::one() + T::one();
        let r = self.norm();
        let a = ((r + self.re) / two).sqrt();
        let b = ((r - self.re) / two).sqrt();
        if self.im < T::zero() {
            Self::new(a, -b)
        } else {
            Self::new(a, b)
        }
    }
}

// ── Complex ∘ Complex ───────────────────────────────────────────────

impl<T: Float> Add for Complex<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Float> Sub for Complex<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Float> Mul for Complex<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<T: Float> Div for Complex<T> {
    type Output = Self;

    /// Smith's algorithm: scales by the larger component of the divisor.
    fn div(self, rhs: Self) -> Self {
        if rhs.re.abs() >= rhs.im.abs() {
            let ratio = rhs.im / rhs.re;
            let denom = rhs.re + rhs.im * ratio;
            Self::new(
                (self.re + self.im * ratio) / denom,
                (self.im - self.re * ratio) / denom,
            )
        } else {
            let ratio = rhs.re / rhs.im;
            let denom = rhs.re * ratio + rhs.im;
            Self::new(
                (self.re * ratio + self.im) / denom,
                (self.im * ratio - self.re) / denom,
            )
        }
    }
}

impl<T: Float> Rem for Complex<T> {
    type Output = Self;

    /// Remainder against the component-wise truncated quotient.
    fn rem(self, rhs: Self) -> Self {
        let q = self / rhs;
        self - Self::new(q.re.trunc(), q.im.trunc()) * rhs
    }
}

impl<T: Float> Neg for Complex<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

// ── Complex ∘ real ──────────────────────────────────────────────────

impl<T: Float> Add<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: T) -> Self {
        Self::new(self.re + rhs, self.im)
    }
}

impl<T: Float> Sub<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: T) -> Self {
        Self::new(self.re - rhs, self.im)
    }
}

impl<T: Float> Mul<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl<T: Float> Div<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

// ── num-traits ──────────────────────────────────────────────────────

impl<T: Float> Zero for Complex<T> {
    #[inline]
    fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl<T: Float> One for Complex<T> {
    #[inline]
    fn one() -> Self {
        Self::new(T::one(), T::zero())
    }
}

impl<T: Float> Num for Complex<T> {
    type FromStrRadixErr = T::FromStrRadixErr;

    /// Parses a real literal; the imaginary part is zero.
    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        T::from_str_radix(s, radix).map(Self::from_real)
    }
}

impl<T: Float> From<T> for Complex<T> {
    #[inline]
    fn from(re: T) -> Self {
        Self::from_real(re)
    }
}

impl<T: Float + fmt::Display> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im == T::zero() {
            return write!(f, "{}", self.re);
        }
        if self.re == T::zero() {
            return write!(f, "{}i", self.im);
        }
        if self.im < T::zero() {
            write!(f, "{} - {}i", self.re, -self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}
