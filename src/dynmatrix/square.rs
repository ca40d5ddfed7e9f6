use crate::traits::{LinalgScalar, Scalar};

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Square diagonal matrix from a slice.
    pub fn from_diag(values: &[T]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m[(i, i)] = v;
        }
        m
    }

    /// Integer matrix power via repeated squaring.
    ///
    /// `pow(0)` returns the identity matrix. Panics if not square.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1.0]);
    /// let m3 = m.pow(3);
    /// assert_eq!(m3[(0, 1)], 3.0);
    /// ```
    pub fn pow(&self, mut n: u32) -> Self {
        assert!(self.is_square(), "pow requires a square matrix");
        let mut result = Self::eye(self.nrows);
        let mut base = self.clone();
        while n > 0 {
            if n & 1 == 1 {
                result = &result * &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        result
    }
}

impl<T: LinalgScalar> DynMatrix<T> {
    /// Check whether `|a_ij - conj(a_ji)| <= tol` for all pairs.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let sym = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 3.0]);
    /// assert!(sym.is_symmetric(0.0));
    /// ```
    pub fn is_symmetric(&self, tol: T::Real) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if (self[(i, j)] - self[(j, i)].conj()).modulus() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_rectangular() {
        let m = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.trace(), 6.0);
    }

    #[test]
    fn from_diag() {
        let m = DynMatrix::from_diag(&[2.0_f64, 3.0]);
        assert_eq!(m.as_slice(), &[2.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn pow_zero_is_identity() {
        let m = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 2.0]);
        assert_eq!(m.pow(0), DynMatrix::eye(2));
        assert_eq!(m.pow(1), m);
    }

    #[test]
    fn pow_matches_repeated_product() {
        let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 0.0]);
        // Fibonacci: [[F(n+1), F(n)], [F(n), F(n-1)]]
        let m10 = m.pow(10);
        assert_eq!(m10[(0, 0)], 89.0);
        assert_eq!(m10[(0, 1)], 55.0);
        assert_eq!(m10[(1, 1)], 34.0);
    }

    #[test]
    fn is_symmetric() {
        let sym = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 3.0]);
        assert!(sym.is_symmetric(1e-12));
        let asym = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.5, 3.0]);
        assert!(!asym.is_symmetric(1e-12));
        assert!(!DynMatrix::<f64>::zeros(2, 3).is_symmetric(1e-12));
    }
}
