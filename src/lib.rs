//! # echelon
//!
//! Row reduction, rank, a rank-repairing SVD, condition numbers and
//! rational-root polynomial factoring for small dense matrices. no-std
//! compatible (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use echelon::{compute_svd, condition_number, rank, reduce_to_rref, DynMatrix};
//!
//! let a = DynMatrix::from_rows(3, 3, &[
//!     1.0_f64, 2.0, 3.0,
//!     4.0, 5.0, 6.0,
//!     0.0, 0.0, 0.0,
//! ]);
//! assert_eq!(rank(&a), 2);
//!
//! let r = reduce_to_rref(&a);
//! assert!((r[(0, 2)] + 1.0).abs() < 1e-12);
//!
//! // U is still a full orthonormal basis even though A is singular
//! let svd = compute_svd(&a);
//! assert_eq!(svd.u().shape(), (3, 3));
//! assert_eq!(svd.singular_values()[2], 0.0);
//! assert!(condition_number(&a).is_infinite());
//! ```
//!
//! ```
//! use echelon::solve_polynomial;
//!
//! let r = solve_polynomial(&[2, -3, -3, 2]).unwrap();
//! assert_eq!(r.factored_form, "2(x + 1)(x - 2)(x - 1/2)");
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`] — Heap-allocated row-major `DynMatrix<T>` with arithmetic,
//!   norms, powers and a boxed `Display`.
//!
//! - [`linalg`] — Row reduction ([`reduce_to_rref`], [`rank`]), the
//!   Gram-based [`Svd`] with basis completion, [`condition_number`], and the
//!   [`Lu`], [`Qr`] and [`SymmetricEigen`] decompositions it builds on.
//!   The eigensolver behind the SVD is pluggable via [`SymmetricEigensolver`].
//!
//! - [`poly`] — [`Polynomial`], synthetic division and the Ruffini
//!   rational-root solver with plain-text and LaTeX factored forms.
//!
//! - [`operation`] — [`evaluate`]: checked dispatch over [`MatrixOperation`]
//!   returning a tagged [`Outcome`].
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Num`)
//!   - [`FloatScalar`] — real floats, used by the SVD and eigensolver
//!   - [`LinalgScalar`] — real floats and [`Complex`], used by row reduction,
//!     LU, QR and norms
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for kernels
//!
//! ## Complex matrices
//!
//! Row reduction, rank, LU and QR accept `DynMatrix<Complex<f64>>`. After
//! reduction, entries whose imaginary part is below the threshold collapse
//! to real values.
//!
//! ```
//! use echelon::{rank, Complex, DynMatrix};
//!
//! let i = Complex::i();
//! let one = Complex::new(1.0, 0.0);
//! let a = DynMatrix::from_rows(2, 2, &[one, i, i, -one]);
//! assert_eq!(rank(&a), 1);
//! ```
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | `std::error::Error` impls, hardware FPU via system libm |
//! | (none)  |         | `no_std` + `alloc`, pure-Rust `libm` fallback |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod complex;
pub mod dynmatrix;
pub mod linalg;
pub mod operation;
pub mod poly;
pub mod traits;

pub use complex::Complex;
pub use dynmatrix::DynMatrix;
pub use linalg::{
    compute_svd, compute_svd_with, condition_number, condition_number_with, rank, rank_with,
    reduce_to_rref, reduce_to_rref_with, LinalgError, Lu, Qr, Svd, SvdConfig, SymmetricEigen,
    SymmetricEigensolver, TridiagonalQr,
};
pub use operation::{evaluate, MatrixOperation, Outcome};
pub use poly::{
    candidate_divisors, rationalize, ruffini, solve_polynomial, synthetic_division, Fraction,
    InvalidReason, Notation, Polynomial, PolynomialError, Root, RuffiniResult, RuffiniStep,
    SyntheticDivision, SyntheticTable, MAX_DIVISOR_SEARCH,
};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};
