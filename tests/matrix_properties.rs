use echelon::{
    compute_svd, compute_svd_with, condition_number, rank, reduce_to_rref, DynMatrix, Svd,
    SvdConfig, TridiagonalQr,
};

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
}

fn assert_matrix_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape", msg);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_near(a[(i, j)], b[(i, j)], tol, &format!("{} [({},{})]", msg, i, j));
        }
    }
}

fn assert_orthonormal_columns(q: &DynMatrix<f64>, msg: &str) {
    let qtq = &q.transpose() * q;
    assert_matrix_near(&qtq, &DynMatrix::eye(q.ncols()), 1e-9, msg);
}

/// Deterministic, mildly irregular test matrices.
fn sample(m: usize, n: usize, salt: usize) -> DynMatrix<f64> {
    DynMatrix::from_fn(m, n, |i, j| {
        let k = (i * 7 + j * 13 + salt * 5) % 11;
        k as f64 - 5.0 + 0.25 * (i as f64) - 0.5 * (j as f64)
    })
}

fn assert_svd_valid(a: &DynMatrix<f64>, svd: &Svd<f64>) {
    let k = a.nrows().min(a.ncols());
    assert_eq!(svd.u().shape(), (a.nrows(), k));
    assert_eq!(svd.v().shape(), (a.ncols(), k));
    assert_eq!(svd.singular_values().len(), k);
    for w in svd.singular_values().windows(2) {
        assert!(w[0] >= w[1], "singular values not descending: {:?}", svd.singular_values());
    }
    assert!(svd.singular_values().iter().all(|&s| s >= 0.0));
    assert_orthonormal_columns(svd.u(), "UᵗU");
    assert_orthonormal_columns(svd.v(), "VᵗV");
    let scale = a.frobenius_norm().max(1.0);
    assert_matrix_near(&svd.reconstruct(), a, 1e-8 * scale, "U Σ Vᵗ");
}

// ── Row reduction ────────────────────────────────────────────────────

#[test]
fn invertible_2x2_reduces_to_identity() {
    let a = DynMatrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(rank(&a), 2);
    assert_matrix_near(&reduce_to_rref(&a), &DynMatrix::eye(2), TOL, "rref");
}

#[test]
fn rref_is_idempotent() {
    for (m, n, salt) in [(3, 3, 0), (3, 5, 1), (5, 3, 2), (4, 4, 3)] {
        let a = sample(m, n, salt);
        let r = reduce_to_rref(&a);
        assert_matrix_near(&reduce_to_rref(&r), &r, TOL, "rref(rref(A))");
    }
}

#[test]
fn rref_shape_and_pivots() {
    let a = DynMatrix::from_nested(&[
        [2.0, 4.0, -2.0, 2.0],
        [1.0, 2.0, 0.0, 3.0],
        [3.0, 6.0, -2.0, 5.0],
    ]);
    let r = reduce_to_rref(&a);
    let expected = DynMatrix::from_nested(&[
        [1.0, 2.0, 0.0, 3.0],
        [0.0, 0.0, 1.0, 2.0],
        [0.0, 0.0, 0.0, 0.0],
    ]);
    assert_matrix_near(&r, &expected, TOL, "rref");
    assert_eq!(rank(&a), 2);
}

#[test]
fn rref_leaves_input_untouched() {
    let a = sample(3, 4, 7);
    let before = a.clone();
    let _ = reduce_to_rref(&a);
    let _ = compute_svd(&a);
    assert_eq!(a, before);
}

#[test]
fn rank_bounds_and_transpose() {
    for (m, n, salt) in [(2, 5, 0), (5, 2, 1), (4, 4, 2), (3, 6, 4)] {
        let a = sample(m, n, salt);
        let r = rank(&a);
        assert!(r <= m.min(n));
        assert_eq!(r, rank(&a.transpose()), "rank(A) != rank(Aᵗ) for {}x{}", m, n);
    }
}

#[test]
fn rank_of_known_matrices() {
    assert_eq!(rank(&DynMatrix::<f64>::zeros(3, 4)), 0);
    assert_eq!(rank(&DynMatrix::<f64>::eye(5)), 5);
    let outer = DynMatrix::from_fn(4, 3, |i, j| ((i + 1) * (j + 2)) as f64);
    assert_eq!(rank(&outer), 1);
}

#[test]
fn rank_agrees_with_svd() {
    let dependent = DynMatrix::from_nested(&[
        [1.0, 2.0, 3.0],
        [4.0, 5.0, 6.0],
        [5.0, 7.0, 9.0],
    ]);
    assert_eq!(rank(&dependent), 2);
    assert_eq!(compute_svd(&dependent).rank(), 2);
}

// ── SVD ──────────────────────────────────────────────────────────────

#[test]
fn svd_of_assorted_shapes() {
    for (m, n, salt) in [(1, 1, 0), (2, 2, 1), (3, 3, 2), (4, 2, 3), (2, 4, 4), (5, 5, 5), (6, 3, 6)] {
        let a = sample(m, n, salt);
        assert_svd_valid(&a, &compute_svd(&a));
    }
}

#[test]
fn svd_of_rank_deficient_matrices() {
    let zero_row = DynMatrix::from_nested(&[
        [1.0, 2.0, 3.0],
        [4.0, 5.0, 6.0],
        [0.0, 0.0, 0.0],
    ]);
    let svd = compute_svd(&zero_row);
    assert_svd_valid(&zero_row, &svd);
    assert_eq!(svd.singular_values()[2], 0.0);
    // the completed column spans the zero row's direction
    assert_near(svd.u()[(2, 2)].abs(), 1.0, 1e-9, "u[2,2]");

    let outer = DynMatrix::from_fn(4, 4, |i, j| ((i + 1) * (j + 1)) as f64);
    let svd = compute_svd(&outer);
    assert_svd_valid(&outer, &svd);
    assert_eq!(svd.rank(), 1);
    assert_near(svd.singular_values()[0], 30.0, 1e-9, "σ₀ of (1..4)(1..4)ᵗ");

    let zero = DynMatrix::<f64>::zeros(3, 2);
    let svd = compute_svd(&zero);
    assert_svd_valid(&zero, &svd);
    assert_eq!(svd.rank(), 0);
}

#[test]
fn svd_is_deterministic() {
    let a = DynMatrix::<f64>::zeros(4, 4);
    let config = SvdConfig {
        epsilon: 1e-12,
        seed: 7,
    };
    let first = compute_svd_with(&a, &TridiagonalQr::default(), config);
    let second = compute_svd_with(&a, &TridiagonalQr::default(), config);
    assert_eq!(first.u(), second.u());
    assert_eq!(first.v(), second.v());
}

#[test]
fn singular_values_match_frobenius_norm() {
    let a = sample(4, 3, 9);
    let svd = compute_svd(&a);
    let sum_sq: f64 = svd.singular_values().iter().map(|s| s * s).sum();
    assert_near(sum_sq.sqrt(), a.frobenius_norm(), 1e-9, "‖σ‖ = ‖A‖_F");
}

// ── Condition number ─────────────────────────────────────────────────

#[test]
fn condition_number_properties() {
    assert_eq!(condition_number(&DynMatrix::<f64>::eye(3)), 1.0);

    let d = DynMatrix::from_diag(&[10.0, 1.0, 0.1]);
    assert_near(condition_number(&d), 100.0, 1e-8, "cond(diag)");

    let singular = DynMatrix::from_nested(&[[1.0, 2.0], [2.0, 4.0]]);
    assert_eq!(condition_number(&singular), f64::INFINITY);

    for salt in 0..4 {
        let a = sample(3, 3, salt);
        let c = condition_number(&a);
        assert!(c >= 1.0 || c.is_infinite(), "cond < 1: {}", c);
        // invariant under scaling
        let scaled = &a * 3.5;
        let cs = condition_number(&scaled);
        if c.is_finite() {
            assert_near(cs / c, 1.0, 1e-6, "cond(cA) / cond(A)");
        }
    }
}
