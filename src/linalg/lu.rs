use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{require_square, LinalgError};
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};
use crate::DynMatrix;

/// LU decomposition with partial pivoting, in place.
///
/// On return `a` holds both factors:
/// - upper triangle (including diagonal): U
/// - strict lower triangle: L (unit diagonal implied)
///
/// `perm` receives the row permutation. Returns `true` if the number of row
/// swaps was even.
pub fn lu_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, LinalgError> {
    let n = a.nrows();
    require_square(n, a.ncols())?;
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut even = true;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a.get(col, col).modulus();
        for row in (col + 1)..n {
            let val = a.get(row, col).modulus();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val < T::lepsilon() {
            return Err(LinalgError::Singular);
        }

        if max_row != col {
            perm.swap(col, max_row);
            a.swap_rows(col, max_row);
            even = !even;
        }

        let inv_pivot = T::one() / *a.get(col, col);
        for row in (col + 1)..n {
            let l = *a.get(row, col) * inv_pivot;
            *a.get_mut(row, col) = l;
            for j in (col + 1)..n {
                let v = *a.get(row, j) - l * *a.get(col, j);
                *a.get_mut(row, j) = v;
            }
        }
    }

    Ok(even)
}

/// Solve `Ax = b` given the packed factors and permutation from [`lu_in_place`].
pub fn lu_solve<T: LinalgScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Ly = Pb
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition of a square matrix: `P A = L U`.
///
/// ```
/// use echelon::{DynMatrix, Lu};
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = Lu::new(&a).unwrap();
///
/// let x = lu.solve(&[4.0, 11.0]);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Lu<T> {
    lu: DynMatrix<T>,
    perm: Vec<usize>,
    even: bool,
}

impl<T: LinalgScalar> Lu<T> {
    /// Decompose `a`. Fails with `NotSquare` or `Singular`.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let mut lu = a.clone();
        let mut perm = vec![0usize; a.nrows()];
        let even = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        DynMatrix::from_fn(n, n, |i, j| {
            if i == j {
                T::one()
            } else if i > j {
                self.lu[(i, j)]
            } else {
                T::zero()
            }
        })
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> DynMatrix<T> {
        let n = self.lu.nrows();
        DynMatrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// Permutation matrix `P` with `P A = L U`.
    pub fn permutation(&self) -> DynMatrix<T> {
        let n = self.perm.len();
        let mut p = DynMatrix::zeros(n, n);
        for (i, &src) in self.perm.iter().enumerate() {
            p[(i, src)] = T::one();
        }
        p
    }

    /// Solve `Ax = b`. Panics if `b.len()` differs from the matrix order.
    pub fn solve(&self, b: &[T]) -> Vec<T> {
        let n = self.perm.len();
        assert_eq!(b.len(), n, "right-hand side length {} does not match order {}", b.len(), n);
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu, &self.perm, b, &mut x);
        x
    }

    /// Solve `AX = B` column by column.
    pub fn solve_matrix(&self, b: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        let n = self.perm.len();
        if b.nrows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, b.ncols()),
                got: b.shape(),
            });
        }
        let mut out = DynMatrix::zeros(n, b.ncols());
        let mut x = vec![T::zero(); n];
        for j in 0..b.ncols() {
            lu_solve(&self.lu, &self.perm, &b.col(j), &mut x);
            out.set_col(j, &x);
        }
        Ok(out)
    }

    /// Matrix inverse.
    pub fn inverse(&self) -> DynMatrix<T> {
        let n = self.perm.len();
        let mut inv = DynMatrix::zeros(n, n);
        let mut e = vec![T::zero(); n];
        let mut x = vec![T::zero(); n];
        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            lu_solve(&self.lu, &self.perm, &e, &mut x);
            inv.set_col(col, &x);
        }
        inv
    }

    /// Determinant: product of U's diagonal, signed by the permutation parity.
    pub fn det(&self) -> T {
        let mut d = if self.even { T::one() } else { T::zero() - T::one() };
        for i in 0..self.perm.len() {
            d = d * self.lu[(i, i)];
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;

    fn assert_matrix_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert!(
                    (a[(i, j)] - b[(i, j)]).abs() < tol,
                    "[({},{})]: {} vs {}",
                    i,
                    j,
                    a[(i, j)],
                    b[(i, j)]
                );
            }
        }
    }

    #[test]
    fn solve_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[2.0_f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let x = Lu::new(&a).unwrap().solve(&[8.0, -11.0, -3.0]);
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn factors_reproduce_pa() {
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        let lu = Lu::new(&a).unwrap();
        let pa = &lu.permutation() * &a;
        let prod = &lu.l() * &lu.u();
        assert_matrix_near(&pa, &prod, 1e-12);
    }

    #[test]
    fn inverse_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        let inv = Lu::new(&a).unwrap().inverse();
        assert_matrix_near(&(&a * &inv), &DynMatrix::eye(3), 1e-10);
    }

    #[test]
    fn det() {
        let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
        assert!((Lu::new(&a).unwrap().det() + 14.0).abs() < 1e-12);
        let b = DynMatrix::from_rows(3, 3, &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
        assert!((Lu::new(&b).unwrap().det() + 306.0).abs() < 1e-10);
    }

    #[test]
    fn solve_matrix_rhs() {
        let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
        let lu = Lu::new(&a).unwrap();
        let x = lu.solve_matrix(&DynMatrix::eye(2)).unwrap();
        assert_matrix_near(&x, &lu.inverse(), 1e-14);
        assert_eq!(
            lu.solve_matrix(&DynMatrix::zeros(3, 1)).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 1),
                got: (3, 1)
            }
        );
    }

    #[test]
    fn singular_and_not_square() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(Lu::new(&a).unwrap_err(), LinalgError::Singular);
        let b = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(Lu::new(&b).unwrap_err(), LinalgError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn complex_system() {
        let c = |re: f64, im: f64| Complex::new(re, im);
        // [[1, i], [0, 2]] x = [1 + 2i, 4]  →  x = [1, 2]
        let a = DynMatrix::from_rows(2, 2, &[c(1.0, 0.0), c(0.0, 1.0), c(0.0, 0.0), c(2.0, 0.0)]);
        let x = Lu::new(&a).unwrap().solve(&[c(1.0, 2.0), c(4.0, 0.0)]);
        assert!((x[0] - c(1.0, 0.0)).norm() < 1e-12);
        assert!((x[1] - c(2.0, 0.0)).norm() < 1e-12);
    }
}
