//! Tagged dispatch over every matrix operation the crate offers.
//!
//! [`evaluate`] checks operand presence and shapes up front and returns a
//! typed error instead of panicking, so it is the entry point for callers
//! that take operations from user input.

use num_traits::{Float, NumCast};

use crate::linalg::{
    compute_svd, condition_number, rank, reduce_to_rref, require_square, LinalgError, Lu, Qr,
    Svd, SymmetricEigen,
};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// An operation on one or two matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixOperation {
    Add,
    Sub,
    Mul,
    Determinant,
    Rank,
    Trace,
    FrobeniusNorm,
    ConditionNumber,
    Inverse,
    Transpose,
    Rref,
    /// Solve `AX = B`.
    Solve,
    Lu,
    Qr,
    Svd,
    /// Symmetric eigendecomposition.
    Eigen,
    /// Integer power of a square matrix.
    Power(u32),
}

impl MatrixOperation {
    /// Whether the operation reads a second operand.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            MatrixOperation::Add
                | MatrixOperation::Sub
                | MatrixOperation::Mul
                | MatrixOperation::Solve
        )
    }
}

/// What an operation produced.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Scalar(T),
    Matrix(DynMatrix<T>),
    Lu(Lu<T>),
    Qr(Qr<T>),
    Svd(Svd<T>),
    Eigen(SymmetricEigen<T>),
}

impl<T: Copy> Outcome<T> {
    pub fn scalar(&self) -> Option<T> {
        match self {
            Outcome::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn matrix(&self) -> Option<&DynMatrix<T>> {
        match self {
            Outcome::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// Run `op` on `a` (and `b` for binary operations).
///
/// ```
/// use echelon::{evaluate, DynMatrix, MatrixOperation};
///
/// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
/// let det = evaluate(MatrixOperation::Determinant, &a, None).unwrap();
/// assert!((det.scalar().unwrap() + 6.0).abs() < 1e-12);
///
/// let err = evaluate(MatrixOperation::Add, &a, None).unwrap_err();
/// assert_eq!(err, echelon::LinalgError::MissingOperand);
/// ```
pub fn evaluate<T: FloatScalar>(
    op: MatrixOperation,
    a: &DynMatrix<T>,
    b: Option<&DynMatrix<T>>,
) -> Result<Outcome<T>, LinalgError> {
    let b = match (op.is_binary(), b) {
        (true, None) => return Err(LinalgError::MissingOperand),
        (_, b) => b,
    };

    let outcome = match op {
        MatrixOperation::Add | MatrixOperation::Sub => {
            let b = second(b)?;
            if a.shape() != b.shape() {
                return Err(LinalgError::DimensionMismatch {
                    expected: a.shape(),
                    got: b.shape(),
                });
            }
            Outcome::Matrix(if op == MatrixOperation::Add { a + b } else { a - b })
        }
        MatrixOperation::Mul => {
            let b = second(b)?;
            if a.ncols() != b.nrows() {
                return Err(LinalgError::DimensionMismatch {
                    expected: (a.ncols(), b.ncols()),
                    got: b.shape(),
                });
            }
            Outcome::Matrix(a * b)
        }
        MatrixOperation::Solve => {
            let b = second(b)?;
            Outcome::Matrix(Lu::new(a)?.solve_matrix(b)?)
        }
        MatrixOperation::Determinant => match Lu::new(a) {
            Ok(lu) => Outcome::Scalar(lu.det()),
            Err(LinalgError::Singular) => Outcome::Scalar(T::zero()),
            Err(e) => return Err(e),
        },
        MatrixOperation::Rank => Outcome::Scalar(count(rank(a))),
        MatrixOperation::Trace => {
            require_square(a.nrows(), a.ncols())?;
            Outcome::Scalar(a.trace())
        }
        MatrixOperation::FrobeniusNorm => Outcome::Scalar(a.frobenius_norm()),
        MatrixOperation::ConditionNumber => Outcome::Scalar(condition_number(a)),
        MatrixOperation::Inverse => Outcome::Matrix(Lu::new(a)?.inverse()),
        MatrixOperation::Transpose => Outcome::Matrix(a.transpose()),
        MatrixOperation::Rref => Outcome::Matrix(reduce_to_rref(a)),
        MatrixOperation::Lu => Outcome::Lu(Lu::new(a)?),
        MatrixOperation::Qr => Outcome::Qr(Qr::new(a)?),
        MatrixOperation::Svd => Outcome::Svd(compute_svd(a)),
        MatrixOperation::Eigen => {
            require_square(a.nrows(), a.ncols())?;
            if !a.is_symmetric(symmetry_tolerance(a)) {
                return Err(LinalgError::NotSymmetric);
            }
            Outcome::Eigen(SymmetricEigen::new(a)?)
        }
        MatrixOperation::Power(k) => {
            require_square(a.nrows(), a.ncols())?;
            Outcome::Matrix(a.pow(k))
        }
    };
    Ok(outcome)
}

#[inline]
fn second<T>(b: Option<&DynMatrix<T>>) -> Result<&DynMatrix<T>, LinalgError> {
    b.ok_or(LinalgError::MissingOperand)
}

#[inline]
fn count<T: FloatScalar>(n: usize) -> T {
    <T as NumCast>::from(n).unwrap_or_else(<T as Float>::nan)
}

/// `√ε` relative to the largest entry.
fn symmetry_tolerance<T: FloatScalar>(a: &DynMatrix<T>) -> T {
    Float::sqrt(<T as Float>::epsilon()) * Float::max(T::one(), a.max_modulus())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn m(rows: &[&[f64]]) -> DynMatrix<f64> {
        DynMatrix::from_nested(rows)
    }

    #[test]
    fn binary_ops() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[0.0, 1.0], &[1.0, 0.0]]);

        let sum = evaluate(MatrixOperation::Add, &a, Some(&b)).unwrap();
        assert_eq!(sum.matrix().unwrap(), &m(&[&[1.0, 3.0], &[4.0, 4.0]]));

        let diff = evaluate(MatrixOperation::Sub, &a, Some(&b)).unwrap();
        assert_eq!(diff.matrix().unwrap(), &m(&[&[1.0, 1.0], &[2.0, 4.0]]));

        let prod = evaluate(MatrixOperation::Mul, &a, Some(&b)).unwrap();
        assert_eq!(prod.matrix().unwrap(), &m(&[&[2.0, 1.0], &[4.0, 3.0]]));
    }

    #[test]
    fn missing_operand() {
        let a = DynMatrix::<f64>::eye(2);
        for op in [
            MatrixOperation::Add,
            MatrixOperation::Sub,
            MatrixOperation::Mul,
            MatrixOperation::Solve,
        ] {
            assert_eq!(evaluate(op, &a, None).unwrap_err(), LinalgError::MissingOperand);
        }
    }

    #[test]
    fn shape_errors() {
        let a = DynMatrix::<f64>::zeros(2, 3);
        let b = DynMatrix::<f64>::zeros(2, 2);
        assert_eq!(
            evaluate(MatrixOperation::Add, &a, Some(&b)).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 3),
                got: (2, 2)
            }
        );
        assert_eq!(
            evaluate(MatrixOperation::Mul, &a, Some(&b)).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (3, 2),
                got: (2, 2)
            }
        );
        for op in [
            MatrixOperation::Determinant,
            MatrixOperation::Trace,
            MatrixOperation::Inverse,
            MatrixOperation::Eigen,
            MatrixOperation::Power(2),
        ] {
            assert_eq!(
                evaluate(op, &a, None).unwrap_err(),
                LinalgError::NotSquare { rows: 2, cols: 3 }
            );
        }
    }

    #[test]
    fn scalars() {
        let a = m(&[&[2.0, 0.0], &[0.0, 3.0]]);
        let s = |op| evaluate(op, &a, None).unwrap().scalar().unwrap();
        assert_near(s(MatrixOperation::Determinant), 6.0, 1e-12, "det");
        assert_near(s(MatrixOperation::Trace), 5.0, 1e-12, "trace");
        assert_near(s(MatrixOperation::Rank), 2.0, 1e-12, "rank");
        assert_near(s(MatrixOperation::FrobeniusNorm), 13.0_f64.sqrt(), 1e-12, "frobenius");
        assert_near(s(MatrixOperation::ConditionNumber), 1.5, 1e-10, "cond");
    }

    #[test]
    fn singular_determinant_is_zero() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        let det = evaluate(MatrixOperation::Determinant, &a, None).unwrap();
        assert_eq!(det.scalar(), Some(0.0));
        assert_eq!(
            evaluate(MatrixOperation::Inverse, &a, None).unwrap_err(),
            LinalgError::Singular
        );
    }

    #[test]
    fn solve_and_inverse() {
        let a = m(&[&[2.0, 1.0], &[1.0, 3.0]]);
        let b = m(&[&[3.0], &[5.0]]);
        let x = evaluate(MatrixOperation::Solve, &a, Some(&b)).unwrap();
        let x = x.matrix().unwrap();
        assert_near(x[(0, 0)], 0.8, 1e-12, "x0");
        assert_near(x[(1, 0)], 1.4, 1e-12, "x1");

        let inv = evaluate(MatrixOperation::Inverse, &a, None).unwrap();
        let id = &a * inv.matrix().unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(id[(i, j)], expected, 1e-12, "a * inv(a)");
            }
        }

        let bad = DynMatrix::<f64>::zeros(3, 1);
        assert!(matches!(
            evaluate(MatrixOperation::Solve, &a, Some(&bad)).unwrap_err(),
            LinalgError::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn matrix_results() {
        let a = m(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]]);
        let t = evaluate(MatrixOperation::Transpose, &a, None).unwrap();
        assert_eq!(t.matrix().unwrap().shape(), (3, 2));

        let r = evaluate(MatrixOperation::Rref, &a, None).unwrap();
        assert_eq!(r.matrix().unwrap(), &m(&[&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]]));

        let sq = m(&[&[1.0, 1.0], &[0.0, 1.0]]);
        let p = evaluate(MatrixOperation::Power(3), &sq, None).unwrap();
        assert_eq!(p.matrix().unwrap(), &m(&[&[1.0, 3.0], &[0.0, 1.0]]));
    }

    #[test]
    fn decompositions() {
        let a = m(&[&[4.0, 1.0], &[1.0, 3.0]]);
        assert!(matches!(evaluate(MatrixOperation::Lu, &a, None).unwrap(), Outcome::Lu(_)));
        assert!(matches!(evaluate(MatrixOperation::Qr, &a, None).unwrap(), Outcome::Qr(_)));

        match evaluate(MatrixOperation::Svd, &a, None).unwrap() {
            Outcome::Svd(svd) => assert_eq!(svd.singular_values().len(), 2),
            other => panic!("expected svd, got {:?}", other),
        }

        match evaluate(MatrixOperation::Eigen, &a, None).unwrap() {
            Outcome::Eigen(eig) => {
                let ev = eig.eigenvalues();
                assert_near(ev[0] + ev[1], 7.0, 1e-10, "eigenvalue sum");
                assert_near(ev[0] * ev[1], 11.0, 1e-10, "eigenvalue product");
            }
            other => panic!("expected eigen, got {:?}", other),
        }
    }

    #[test]
    fn eigen_rejects_asymmetric() {
        let a = m(&[&[1.0, 2.0], &[0.0, 1.0]]);
        assert_eq!(
            evaluate(MatrixOperation::Eigen, &a, None).unwrap_err(),
            LinalgError::NotSymmetric
        );
    }
}
