use num_traits::{Float, NumCast};

use crate::traits::{LinalgScalar, MatrixMut};
use crate::DynMatrix;

/// Default zero tolerance for row reduction and rank.
pub const RREF_EPSILON: f64 = 1e-12;

/// Gauss-Jordan elimination in place.
///
/// Columns are scanned left to right with a running pivot row. A column
/// whose remaining entries all have modulus `<= eps` contributes no pivot and
/// the pivot row stays put. Otherwise the first entry above `eps` (scanning
/// down from the pivot row) is swapped up, its row is scaled so the pivot is
/// exactly one, and the pivot column is cleared in every other row.
///
/// Returns the pivot columns in row order; their count is the rank.
///
/// Entries whose imaginary part falls below `eps` are collapsed to pure
/// reals afterwards. For real element types this is a no-op.
pub fn rref_in_place<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    eps: T::Real,
) -> alloc::vec::Vec<usize> {
    let rows = a.nrows();
    let cols = a.ncols();
    let mut pivots = alloc::vec::Vec::with_capacity(rows.min(cols));
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row == rows {
            break;
        }

        let Some(found) = (pivot_row..rows).find(|&r| a.get(r, col).modulus() > eps) else {
            continue;
        };
        a.swap_rows(found, pivot_row);

        let pivot = *a.get(pivot_row, col);
        for j in 0..cols {
            let v = *a.get(pivot_row, j) / pivot;
            *a.get_mut(pivot_row, j) = v;
        }
        *a.get_mut(pivot_row, col) = T::one();

        for r in 0..rows {
            if r == pivot_row {
                continue;
            }
            let factor = *a.get(r, col);
            if factor == T::zero() {
                continue;
            }
            for j in 0..cols {
                let v = *a.get(r, j) - factor * *a.get(pivot_row, j);
                *a.get_mut(r, j) = v;
            }
            *a.get_mut(r, col) = T::zero();
        }

        pivots.push(col);
        pivot_row += 1;
    }

    for r in 0..rows {
        for c in 0..cols {
            let v = *a.get(r, c);
            if v.im().abs() < eps {
                *a.get_mut(r, c) = T::from_real(v.re());
            }
        }
    }

    pivots
}

/// Reduced row echelon form with the default tolerance ([`RREF_EPSILON`]).
///
/// Works over reals and complex numbers alike.
///
/// ```
/// use echelon::{reduce_to_rref, DynMatrix};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let r = reduce_to_rref(&a);
/// assert_eq!(r, DynMatrix::eye(2));
/// ```
pub fn reduce_to_rref<T: LinalgScalar>(a: &DynMatrix<T>) -> DynMatrix<T> {
    reduce_to_rref_with(a, default_eps::<T>())
}

/// Reduced row echelon form with an explicit zero tolerance.
pub fn reduce_to_rref_with<T: LinalgScalar>(a: &DynMatrix<T>, eps: T::Real) -> DynMatrix<T> {
    let mut r = a.clone();
    rref_in_place(&mut r, eps);
    r
}

/// Rank with the default tolerance ([`RREF_EPSILON`]).
///
/// ```
/// use echelon::{rank, DynMatrix};
///
/// let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0]);
/// assert_eq!(rank(&a), 2);
/// assert_eq!(rank(&DynMatrix::<f64>::zeros(3, 4)), 0);
/// ```
pub fn rank<T: LinalgScalar>(a: &DynMatrix<T>) -> usize {
    rank_with(a, default_eps::<T>())
}

/// Rank: the number of rows of the RREF holding an entry with modulus above `eps`.
pub fn rank_with<T: LinalgScalar>(a: &DynMatrix<T>, eps: T::Real) -> usize {
    let r = reduce_to_rref_with(a, eps);
    (0..r.nrows())
        .filter(|&i| (0..r.ncols()).any(|j| r[(i, j)].modulus() > eps))
        .count()
}

fn default_eps<T: LinalgScalar>() -> T::Real {
    // 1e-12 is representable in every float type the trait is implemented for
    <T::Real as NumCast>::from(RREF_EPSILON).unwrap_or_else(<T::Real as Float>::epsilon)
}
