use num_traits::Zero;

use crate::traits::LinalgScalar;

use super::DynMatrix;

impl<T: LinalgScalar> DynMatrix<T> {
    /// Frobenius norm (square root of sum of squared moduli).
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.modulus();
            sum = sum + m * m;
        }
        sum.lsqrt()
    }

    /// Largest element modulus (zero for an empty matrix).
    pub fn max_modulus(&self) -> T::Real {
        self.data
            .iter()
            .map(|x| x.modulus())
            .fold(<T::Real as Zero>::zero(), |acc, m| if m > acc { m } else { acc })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;

    #[test]
    fn frobenius_norm() {
        let m = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn frobenius_norm_complex() {
        let m = DynMatrix::from_rows(1, 2, &[Complex::new(3.0_f64, 4.0), Complex::new(0.0, 0.0)]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn max_modulus() {
        let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -7.0, 3.0, 4.0]);
        assert_eq!(m.max_modulus(), 7.0);
        assert_eq!(DynMatrix::<f64>::zeros(0, 0).max_modulus(), 0.0);
    }
}
