use alloc::vec;
use alloc::vec::Vec;

use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixMut};
use crate::DynMatrix;

/// QR decomposition in place using Householder reflections.
///
/// On return `a` contains the packed factorization:
/// - upper triangle (including diagonal): R
/// - strict lower triangle: Householder vectors, scaled so `v[0] = 1`
///
/// `tau` receives the reflector scalars (length `ncols`). Requires
/// `nrows >= ncols`. Returns `Singular` if a column has no component left
/// outside the span of the previous ones.
///
/// For complex matrices the reflectors are `H = I - tau * v * v^H`.
pub fn qr_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    tau: &mut [T],
) -> Result<(), LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    if m < n {
        return Err(LinalgError::DimensionMismatch {
            expected: (n, n),
            got: (m, n),
        });
    }
    assert_eq!(tau.len(), n, "tau length must equal the column count");

    for col in 0..n {
        let mut norm_sq = <T::Real as Zero>::zero();
        for i in col..m {
            let v = *a.get(i, col);
            norm_sq = norm_sq + (v * v.conj()).re();
        }

        if norm_sq < T::lepsilon() {
            return Err(LinalgError::Singular);
        }

        let norm = norm_sq.lsqrt();
        let a_cc = *a.get(col, col);

        // sigma carries the phase of a[col,col] so v0 = a + sigma never cancels
        let alpha = a_cc.modulus();
        let sigma = if alpha < T::lepsilon() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (a_cc / T::from_real(alpha))
        };

        let v0 = a_cc + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;

        for i in (col + 1)..m {
            let val = *a.get(i, col) / v0;
            *a.get_mut(i, col) = val;
        }

        // A[col.., j] -= tau * v * (v^H A[col.., j])
        for j in (col + 1)..n {
            let mut dot = *a.get(col, j);
            for i in (col + 1)..m {
                dot = dot + a.get(i, col).conj() * *a.get(i, j);
            }
            dot = dot * tau_val;

            let top = *a.get(col, j) - dot;
            *a.get_mut(col, j) = top;
            for i in (col + 1)..m {
                let v = *a.get(i, j) - dot * *a.get(i, col);
                *a.get_mut(i, j) = v;
            }
        }

        *a.get_mut(col, col) = T::zero() - sigma;
    }

    Ok(())
}

/// Householder QR decomposition of an `m x n` matrix with `m >= n`.
///
/// ```
/// use echelon::{DynMatrix, Qr};
///
/// let a = DynMatrix::from_rows(3, 3, &[12.0_f64, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0]);
/// let qr = Qr::new(&a).unwrap();
/// let q = qr.q();
/// let r = qr.r();
/// assert!(r[(1, 0)].abs() < 1e-12);
/// let back = &q * &r;
/// assert!((back[(0, 1)] + 51.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Qr<T> {
    qr: DynMatrix<T>,
    tau: Vec<T>,
}

impl<T: LinalgScalar> Qr<T> {
    /// Decompose `a`. Fails on wide inputs and rank-deficient columns.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let mut qr = a.clone();
        let mut tau = vec![T::zero(); a.ncols()];
        qr_in_place(&mut qr, &mut tau)?;
        Ok(Self { qr, tau })
    }

    /// Upper-triangular `n x n` factor.
    pub fn r(&self) -> DynMatrix<T> {
        let n = self.qr.ncols();
        DynMatrix::from_fn(n, n, |i, j| if i <= j { self.qr[(i, j)] } else { T::zero() })
    }

    /// Thin `m x n` factor with orthonormal columns.
    ///
    /// Applies the reflectors in reverse to the first `n` columns of the
    /// identity.
    pub fn q(&self) -> DynMatrix<T> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();
        let mut q = DynMatrix::zeros(m, n);
        for i in 0..n {
            q[(i, i)] = T::one();
        }

        for col in (0..n).rev() {
            let tau_val = self.tau[col];
            for j in col..n {
                let mut dot = q[(col, j)];
                for i in (col + 1)..m {
                    dot = dot + self.qr[(i, col)].conj() * q[(i, j)];
                }
                dot = dot * tau_val;

                q[(col, j)] = q[(col, j)] - dot;
                for i in (col + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, col)];
                }
            }
        }

        q
    }
}
