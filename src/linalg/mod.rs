pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod rref;
pub(crate) mod svd;
pub(crate) mod symmetric_eigen;

pub use lu::Lu;
pub use qr::Qr;
pub use rref::{rank, rank_with, reduce_to_rref, reduce_to_rref_with, rref_in_place, RREF_EPSILON};
pub use svd::{compute_svd, compute_svd_with, condition_number, condition_number_with, Svd, SvdConfig};
pub use symmetric_eigen::{SymmetricEigen, SymmetricEigensolver, TridiagonalQr};

/// Errors from linear algebra operations.
///
/// Only the decompositions behind [`crate::evaluate`] can fail. Row
/// reduction, rank, the SVD and the condition number are total.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::{LinalgError, Lu};
///
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(Lu::new(&singular).unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    Singular,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
    /// Operand shapes are incompatible. Both fields are `(rows, cols)`.
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// The operation needs a square matrix.
    NotSquare { rows: usize, cols: usize },
    /// The operation needs a symmetric matrix.
    NotSymmetric,
    /// A binary operation was requested without its second operand.
    MissingOperand,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
            LinalgError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "operation requires a square matrix, got {}x{}", rows, cols)
            }
            LinalgError::NotSymmetric => write!(f, "matrix is not symmetric"),
            LinalgError::MissingOperand => write!(f, "operation requires a second operand"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Return `NotSquare` unless `rows == cols`.
#[inline]
pub(crate) fn require_square(rows: usize, cols: usize) -> Result<(), LinalgError> {
    if rows == cols {
        Ok(())
    } else {
        Err(LinalgError::NotSquare { rows, cols })
    }
}
