use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{require_square, LinalgError};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::DynMatrix;

/// Householder tridiagonalization of a real symmetric matrix.
///
/// On return `diag[0..n]` holds the diagonal of `T = Qᵗ A Q`,
/// `off_diag[0..n-1]` its sub-diagonal, and `q` the accumulated orthogonal
/// transform. `a` is only read; the lower triangle is what gets used.
pub fn tridiagonalize<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    diag: &mut [T],
    off_diag: &mut [T],
    q: &mut impl MatrixMut<T>,
) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tridiagonalize requires a square matrix");
    assert!(diag.len() >= n);
    assert!(off_diag.len() + 1 >= n);

    let mut w = DynMatrix::from_fn(n, n, |i, j| *a.get(i, j));
    for i in 0..n {
        for j in 0..n {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    let eps = T::epsilon();
    let two = T::one() + T::one();

    for k in 0..n.saturating_sub(2) {
        let sub = n - k - 1;

        let mut norm_sq = T::zero();
        for i in (k + 1)..n {
            norm_sq = norm_sq + w[(i, k)] * w[(i, k)];
        }
        if norm_sq <= eps * eps {
            off_diag[k] = T::zero();
            continue;
        }

        let norm = norm_sq.sqrt();
        let x0 = w[(k + 1, k)];
        let sigma = if x0 < T::zero() { -norm } else { norm };

        // v = x + sigma e₀, kept as a dense vector over rows k+1..n
        let mut v: Vec<T> = (k + 1..n).map(|i| w[(i, k)]).collect();
        v[0] = x0 + sigma;
        let v_norm_sq = v.iter().fold(T::zero(), |acc, &x| acc + x * x);
        let tau = two / v_norm_sq;

        // p = tau · A_sub · v
        let p: Vec<T> = (0..sub)
            .map(|i| {
                let dot = (0..sub).fold(T::zero(), |acc, j| acc + w[(k + 1 + i, k + 1 + j)] * v[j]);
                tau * dot
            })
            .collect();

        // r = p - (tau/2)(vᵗp) v
        let vtp = v.iter().zip(&p).fold(T::zero(), |acc, (&vi, &pi)| acc + vi * pi);
        let half = tau / two * vtp;
        let r: Vec<T> = p.iter().zip(&v).map(|(&pi, &vi)| pi - half * vi).collect();

        // A_sub -= v rᵗ + r vᵗ
        for i in 0..sub {
            for j in 0..sub {
                let cur = w[(k + 1 + i, k + 1 + j)];
                w[(k + 1 + i, k + 1 + j)] = cur - v[i] * r[j] - r[i] * v[j];
            }
        }

        off_diag[k] = -sigma;

        // Q ← Q (I - tau v vᵗ)
        for row in 0..n {
            let s = tau * (0..sub).fold(T::zero(), |acc, j| acc + *q.get(row, k + 1 + j) * v[j]);
            for (j, &vj) in v.iter().enumerate() {
                let cur = *q.get(row, k + 1 + j);
                *q.get_mut(row, k + 1 + j) = cur - s * vj;
            }
        }
    }

    for (i, d) in diag.iter_mut().enumerate().take(n) {
        *d = w[(i, i)];
    }
    if n >= 2 {
        off_diag[n - 2] = w[(n - 1, n - 2)];
    }
}

/// Implicit symmetric QR iteration with Wilkinson shifts on a tridiagonal
/// matrix, accumulating the Givens rotations into the columns of `q`.
///
/// On success `diag` holds the eigenvalues in ascending order and the
/// columns of `q` are permuted to match. `off_diag` is destroyed.
pub fn tridiagonal_qr_with_vecs<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    q: &mut impl MatrixMut<T>,
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = diag.len();
    if n <= 1 {
        return Ok(());
    }

    let eps = T::epsilon();
    let two = T::one() + T::one();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        // find the start of the unreduced block ending at `hi`
        let mut lo = hi;
        while lo > 0 {
            if off_diag[lo - 1].abs() <= eps * (diag[lo - 1].abs() + diag[lo].abs()) {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        let d = (diag[hi - 1] - diag[hi]) / two;
        let e = off_diag[hi - 1];
        let r = d.hypot(e);
        let shift = diag[hi] - e * e / (d + if d >= T::zero() { r } else { -r });

        let mut x = diag[lo] - shift;
        let mut z = off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let d_k = diag[k];
            let d_k1 = diag[k + 1];
            let e_k = off_diag[k];

            diag[k] = c * c * d_k + two * c * s * e_k + s * s * d_k1;
            diag[k + 1] = s * s * d_k - two * c * s * e_k + c * c * d_k1;
            off_diag[k] = c * s * (d_k1 - d_k) + (c * c - s * s) * e_k;

            // chase the bulge one step down
            if k + 1 < hi {
                let e_next = off_diag[k + 1];
                x = off_diag[k];
                z = s * e_next;
                off_diag[k + 1] = c * e_next;
            }

            for i in 0..q.nrows() {
                let qik = *q.get(i, k);
                let qik1 = *q.get(i, k + 1);
                *q.get_mut(i, k) = c * qik + s * qik1;
                *q.get_mut(i, k + 1) = c * qik1 - s * qik;
            }
        }
    }

    sort_eigen_with_vecs(diag, q);
    Ok(())
}

/// Givens rotation: `(c, s)` with `[c, s; -s, c] · [a; b] = [r; 0]`.
#[inline]
pub(crate) fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

fn sort_eigen_with_vecs<T: FloatScalar>(diag: &mut [T], q: &mut impl MatrixMut<T>) {
    let n = diag.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in (i + 1)..n {
            if diag[j] < diag[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            diag.swap(i, min_idx);
            for row in 0..q.nrows() {
                let tmp = *q.get(row, i);
                *q.get_mut(row, i) = *q.get(row, min_idx);
                *q.get_mut(row, min_idx) = tmp;
            }
        }
    }
}

/// Eigen-decomposition of a real symmetric matrix.
///
/// Eigenvalues are sorted ascending; column `i` of the eigenvector matrix
/// belongs to eigenvalue `i`.
///
/// ```
/// use echelon::{DynMatrix, SymmetricEigen};
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, -1.0, -1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-10);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: DynMatrix<T>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose with the default [`TridiagonalQr`] solver.
    ///
    /// Symmetry is assumed, not checked.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        TridiagonalQr::default().eigen_symmetric(a)
    }

    /// Assemble from parts. Used by custom [`SymmetricEigensolver`]s.
    ///
    /// Panics unless `eigenvectors` is square with one column per eigenvalue.
    pub fn from_parts(eigenvalues: Vec<T>, eigenvectors: DynMatrix<T>) -> Self {
        assert_eq!(eigenvectors.shape(), (eigenvalues.len(), eigenvalues.len()));
        Self {
            eigenvalues,
            eigenvectors,
        }
    }

    /// Eigenvalues, ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Eigenvector matrix (columns are eigenvectors).
    #[inline]
    pub fn eigenvectors(&self) -> &DynMatrix<T> {
        &self.eigenvectors
    }

    /// Consume into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<T>, DynMatrix<T>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

/// A symmetric eigensolver the SVD can be built on.
///
/// Implementations return all `n` eigenpairs of a real symmetric `n x n`
/// matrix. Ordering is free; the SVD sorts what it gets.
pub trait SymmetricEigensolver<T: FloatScalar> {
    fn eigen_symmetric(&self, a: &DynMatrix<T>) -> Result<SymmetricEigen<T>, LinalgError>;
}

/// Householder tridiagonalization followed by implicit QR with Wilkinson
/// shifts. The iteration budget is `max_sweeps_per_row * n`.
#[derive(Debug, Clone, Copy)]
pub struct TridiagonalQr {
    pub max_sweeps_per_row: usize,
}

impl Default for TridiagonalQr {
    fn default() -> Self {
        Self {
            max_sweeps_per_row: 30,
        }
    }
}

impl<T: FloatScalar> SymmetricEigensolver<T> for TridiagonalQr {
    fn eigen_symmetric(&self, a: &DynMatrix<T>) -> Result<SymmetricEigen<T>, LinalgError> {
        let n = a.nrows();
        require_square(n, a.ncols())?;

        let mut diag = vec![T::zero(); n];
        let mut off_diag = vec![T::zero(); n.saturating_sub(1)];
        let mut q = DynMatrix::zeros(n, n);
        if n == 0 {
            return Ok(SymmetricEigen::from_parts(diag, q));
        }

        tridiagonalize(a, &mut diag, &mut off_diag, &mut q);
        tridiagonal_qr_with_vecs(&mut diag, &mut off_diag, &mut q, self.max_sweeps_per_row * n)?;

        Ok(SymmetricEigen::from_parts(diag, q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn assert_eigenpairs(a: &DynMatrix<f64>, eig: &SymmetricEigen<f64>, tol: f64) {
        let n = a.nrows();
        let q = eig.eigenvectors();
        for col in 0..n {
            let lambda = eig.eigenvalues()[col];
            for row in 0..n {
                let av: f64 = (0..n).map(|k| a[(row, k)] * q[(k, col)]).sum();
                assert_near(av, lambda * q[(row, col)], tol, &format!("Av=λv [({},{})]", row, col));
            }
        }
        let qtq = &q.transpose() * q;
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, tol, &format!("QtQ[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn identity() {
        let eig = SymmetricEigen::new(&DynMatrix::<f64>::eye(3)).unwrap();
        for i in 0..3 {
            assert_near(eig.eigenvalues()[i], 1.0, TOL, &format!("λ[{}]", i));
        }
        assert_eigenpairs(&DynMatrix::eye(3), &eig, TOL);
    }

    #[test]
    fn diagonal_is_sorted() {
        let a = DynMatrix::from_diag(&[3.0_f64, 1.0, 2.0]);
        let eig = SymmetricEigen::new(&a).unwrap();
        assert_eq!(eig.eigenvalues().len(), 3);
        assert_near(eig.eigenvalues()[0], 1.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 2.0, TOL, "λ[1]");
        assert_near(eig.eigenvalues()[2], 3.0, TOL, "λ[2]");
        assert_eigenpairs(&a, &eig, TOL);
    }

    #[test]
    fn tridiagonal_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[2.0_f64, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let eig = SymmetricEigen::new(&a).unwrap();
        assert_near(eig.eigenvalues()[0], 1.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 2.0, TOL, "λ[1]");
        assert_near(eig.eigenvalues()[2], 4.0, TOL, "λ[2]");
        assert_eigenpairs(&a, &eig, TOL);
    }

    #[test]
    fn dense_5x5() {
        let a = DynMatrix::from_rows(5, 5, &[
            5.0_f64, 1.0, 0.5, 0.25, 0.125,
            1.0, 4.0, 1.0, 0.5, 0.25,
            0.5, 1.0, 3.0, 1.0, 0.5,
            0.25, 0.5, 1.0, 2.0, 1.0,
            0.125, 0.25, 0.5, 1.0, 1.0,
        ]);
        let eig = SymmetricEigen::new(&a).unwrap();
        assert_eigenpairs(&a, &eig, 1e-9);
        let sum: f64 = eig.eigenvalues().iter().sum();
        assert_near(sum, a.trace(), TOL, "trace");
    }

    #[test]
    fn gram_of_singular_matrix() {
        // AᵗA for A with a zero row: positive semi-definite with a zero eigenvalue
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 0.0]);
        let g = &a.transpose() * &a;
        let eig = SymmetricEigen::new(&g).unwrap();
        assert!(eig.eigenvalues()[0].abs() < 1e-10);
        assert_eigenpairs(&g, &eig, 1e-9);
    }

    #[test]
    fn negative_and_repeated() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 3.0, 3.0, 1.0]);
        let eig = SymmetricEigen::new(&a).unwrap();
        assert_near(eig.eigenvalues()[0], -2.0, TOL, "λ[0]");
        assert_near(eig.eigenvalues()[1], 4.0, TOL, "λ[1]");

        let b = DynMatrix::from_diag(&[2.0_f64, 2.0, 2.0]);
        let eig = SymmetricEigen::new(&b).unwrap();
        assert!(eig.eigenvalues().iter().all(|&l| (l - 2.0).abs() < TOL));
    }

    #[test]
    fn sizes_0_and_1() {
        let eig = SymmetricEigen::new(&DynMatrix::<f64>::zeros(0, 0)).unwrap();
        assert!(eig.eigenvalues().is_empty());
        let eig = SymmetricEigen::new(&DynMatrix::from_rows(1, 1, &[7.0_f64])).unwrap();
        assert_eq!(eig.eigenvalues(), &[7.0]);
    }

    #[test]
    fn not_square() {
        let err = SymmetricEigen::new(&DynMatrix::<f64>::zeros(2, 3)).unwrap_err();
        assert_eq!(err, LinalgError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn zero_budget_fails_to_converge() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
        let solver = TridiagonalQr {
            max_sweeps_per_row: 0,
        };
        assert_eq!(
            SymmetricEigensolver::<f64>::eigen_symmetric(&solver, &a).unwrap_err(),
            LinalgError::ConvergenceFailure
        );
    }

    #[test]
    fn f32_support() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f32, -1.0, -1.0, 2.0]);
        let eig = SymmetricEigen::new(&a).unwrap();
        assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-5);
        assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-5);
    }
}
