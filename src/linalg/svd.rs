//! Singular value decomposition built on the eigen-decomposition of the
//! Gram matrix `AᵗA`.
//!
//! 1. `G = AᵗA`, eigenpairs `(λᵢ, vᵢ)` from a [`SymmetricEigensolver`]
//! 2. keep the `k = min(m, n)` largest, `σᵢ = √max(λᵢ, 0)`, descending
//! 3. `V = [v₁ … v_k]`
//! 4. `uᵢ = A vᵢ / σᵢ` for every `σᵢ` above the zero threshold
//! 5. any slot left empty (rank deficiency) is filled from the canonical
//!    basis by Gram-Schmidt, then from a seeded random basis if that ever
//!    runs dry
//!
//! The result is total: singular and zero matrices still get fully
//! orthonormal `U` and `V`, and a failing eigensolver degrades accuracy
//! rather than the shape of the result.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use num_traits::NumCast;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::linalg::qr::Qr;
use crate::linalg::symmetric_eigen::{SymmetricEigensolver, TridiagonalQr};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Rounds of random completion before a slot is given up on.
const MAX_RANDOM_ROUNDS: usize = 8;

/// Tuning knobs for [`compute_svd_with`].
#[derive(Debug, Clone, Copy)]
pub struct SvdConfig<T> {
    /// Singular values at or below this count as zero.
    pub epsilon: T,
    /// Seed for the random completion basis.
    pub seed: u64,
}

impl<T: FloatScalar> Default for SvdConfig<T> {
    fn default() -> Self {
        let sixteen = <T as NumCast>::from(16.0).unwrap_or_else(T::one);
        Self {
            epsilon: T::epsilon() * sixteen,
            seed: 42,
        }
    }
}

/// Thin SVD `A = U Σ Vᵗ` of an `m x n` matrix, `k = min(m, n)`.
///
/// `U` is `m x k`, `V` is `n x k`, both with orthonormal columns; the
/// singular values are non-negative and sorted descending.
///
/// ```
/// use echelon::{compute_svd, DynMatrix};
///
/// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, -2.0]);
/// let svd = compute_svd(&a);
/// assert!((svd.singular_values()[0] - 3.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 2.0).abs() < 1e-12);
/// assert!((svd.condition_number() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T> {
    u: DynMatrix<T>,
    singular_values: Vec<T>,
    v: DynMatrix<T>,
    epsilon: T,
}

impl<T: FloatScalar> Svd<T> {
    /// Left singular vectors (`m x k`).
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// Singular values, descending.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.singular_values
    }

    /// Right singular vectors (`n x k`, not transposed).
    #[inline]
    pub fn v(&self) -> &DynMatrix<T> {
        &self.v
    }

    /// Zero threshold the decomposition was computed with.
    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Number of singular values above the zero threshold.
    pub fn rank(&self) -> usize {
        self.singular_values.iter().filter(|&&s| s > self.epsilon).count()
    }

    /// `σ_max / σ_min`, or `+∞` when `σ_min` is at or below the threshold.
    ///
    /// An empty decomposition has condition number one.
    pub fn condition_number(&self) -> T {
        let (Some(&max), Some(&min)) = (self.singular_values.first(), self.singular_values.last())
        else {
            return T::one();
        };
        if min > self.epsilon {
            max / min
        } else {
            T::infinity()
        }
    }

    /// `U · diag(σ) · Vᵗ`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        let m = self.u.nrows();
        let n = self.v.nrows();
        DynMatrix::from_fn(m, n, |i, j| {
            self.singular_values
                .iter()
                .enumerate()
                .fold(T::zero(), |acc, (l, &s)| acc + self.u[(i, l)] * s * self.v[(j, l)])
        })
    }

    /// Consume into `(U, σ, V)`.
    pub fn into_parts(self) -> (DynMatrix<T>, Vec<T>, DynMatrix<T>) {
        (self.u, self.singular_values, self.v)
    }
}

/// SVD with the default eigensolver and [`SvdConfig::default`].
pub fn compute_svd<T: FloatScalar>(a: &DynMatrix<T>) -> Svd<T> {
    compute_svd_with(a, &TridiagonalQr::default(), SvdConfig::default())
}

/// SVD with an explicit eigensolver and configuration.
///
/// If the solver fails (or returns pairs of the wrong size) the Gram
/// matrix's own diagonal and the identity stand in for its eigenpairs.
/// The factors stay orthonormal; only reconstruction accuracy suffers.
pub fn compute_svd_with<T, S>(a: &DynMatrix<T>, solver: &S, config: SvdConfig<T>) -> Svd<T>
where
    T: FloatScalar,
    S: SymmetricEigensolver<T> + ?Sized,
{
    let (m, n) = a.shape();
    let k = m.min(n);
    let eps = config.epsilon;

    if k == 0 {
        return Svd {
            u: DynMatrix::zeros(m, 0),
            singular_values: Vec::new(),
            v: DynMatrix::zeros(n, 0),
            epsilon: eps,
        };
    }

    let gram = &a.transpose() * a;
    let (lambda, vecs) = match solver.eigen_symmetric(&gram) {
        Ok(eig) if eig.eigenvalues().len() == n => eig.into_parts(),
        _ => ((0..n).map(|i| gram[(i, i)]).collect(), DynMatrix::eye(n)),
    };

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| lambda[y].partial_cmp(&lambda[x]).unwrap_or(Ordering::Equal));
    order.truncate(k);

    // λ below the rounding floor of AᵗA is indistinguishable from zero
    let lambda_max = lambda[order[0]].max(T::zero());
    let floor = <T as NumCast>::from(16 * n).unwrap_or_else(T::one) * T::epsilon() * lambda_max;
    let singular_values: Vec<T> = order
        .iter()
        .map(|&i| if lambda[i] <= floor { T::zero() } else { lambda[i].sqrt() })
        .collect();

    let v_cols: Vec<Vec<T>> = order.iter().map(|&i| vecs.col(i)).collect();

    let mut slots: Vec<Option<Vec<T>>> = vec![None; k];
    for (j, (&sigma, vj)) in singular_values.iter().zip(&v_cols).enumerate() {
        if sigma <= eps {
            continue;
        }
        let mut col: Vec<T> = (0..m)
            .map(|i| (0..n).fold(T::zero(), |acc, l| acc + a[(i, l)] * vj[l]) / sigma)
            .collect();
        orthogonalize(&mut col, &slots);
        if normalize(&mut col, eps) {
            slots[j] = Some(col);
        }
    }

    complete_basis(&mut slots, m, eps, config.seed);

    let u_cols: Vec<Vec<T>> = slots
        .into_iter()
        .map(|s| s.unwrap_or_else(|| vec![T::zero(); m]))
        .collect();

    Svd {
        u: DynMatrix::from_columns(m, &u_cols),
        singular_values,
        v: DynMatrix::from_columns(n, &v_cols),
        epsilon: eps,
    }
}

/// Condition number `σ_max / σ_min` (`+∞` for singular input).
///
/// ```
/// use echelon::{condition_number, DynMatrix};
///
/// assert_eq!(condition_number(&DynMatrix::<f64>::eye(4)), 1.0);
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert!(condition_number(&singular).is_infinite());
/// ```
pub fn condition_number<T: FloatScalar>(a: &DynMatrix<T>) -> T {
    compute_svd(a).condition_number()
}

/// Condition number with an explicit eigensolver and configuration.
pub fn condition_number_with<T, S>(a: &DynMatrix<T>, solver: &S, config: SvdConfig<T>) -> T
where
    T: FloatScalar,
    S: SymmetricEigensolver<T> + ?Sized,
{
    compute_svd_with(a, solver, config).condition_number()
}

/// Fill every empty slot with a unit vector orthogonal to all filled ones.
///
/// Canonical vectors `e₀ … e_{m-1}` are tried in order, each going to the
/// next empty slot when its residual survives. A residual at or below
/// `max(eps, √ε)` is rounding noise of a vector already in the span and is
/// skipped. A seeded random orthonormal basis covers anything left over.
fn complete_basis<T: FloatScalar>(slots: &mut [Option<Vec<T>>], m: usize, eps: T, seed: u64) {
    let residual_floor = eps.max(T::epsilon().sqrt());
    for i in 0..m {
        let Some(next) = slots.iter().position(|s| s.is_none()) else {
            return;
        };
        let mut e = vec![T::zero(); m];
        e[i] = T::one();
        orthogonalize(&mut e, slots);
        if normalize(&mut e, residual_floor) {
            slots[next] = Some(e);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..MAX_RANDOM_ROUNDS {
        let missing = slots.iter().filter(|s| s.is_none()).count();
        if missing == 0 {
            return;
        }
        let raw = DynMatrix::from_fn(m, missing, |_, _| {
            <T as NumCast>::from(rng.gen_range(-1.0_f64..1.0)).unwrap_or_else(T::zero)
        });
        let basis = Qr::new(&raw).map(|qr| qr.q()).unwrap_or(raw);
        for mut col in basis.columns() {
            orthogonalize(&mut col, slots);
            if !normalize(&mut col, eps) {
                continue;
            }
            match slots.iter_mut().find(|s| s.is_none()) {
                Some(slot) => *slot = Some(col),
                None => return,
            }
        }
    }
}

/// Remove the components along each filled (unit) slot. Two passes keep the
/// result orthogonal to working precision.
fn orthogonalize<T: FloatScalar>(v: &mut [T], slots: &[Option<Vec<T>>]) {
    for _ in 0..2 {
        for b in slots.iter().flatten() {
            let proj = dot(b, v);
            for (x, &bi) in v.iter_mut().zip(b.iter()) {
                *x = *x - proj * bi;
            }
        }
    }
}

/// Scale to unit length. Returns `false` (leaving `v` alone) if `‖v‖ <= eps`.
fn normalize<T: FloatScalar>(v: &mut [T], eps: T) -> bool {
    let len = norm(v);
    if len.is_nan() || len <= eps {
        return false;
    }
    for x in v.iter_mut() {
        *x = *x / len;
    }
    true
}

fn dot<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

fn norm<T: FloatScalar>(v: &[T]) -> T {
    dot(v, v).sqrt()
}
