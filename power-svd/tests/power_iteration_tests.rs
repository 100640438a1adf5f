//! Property tests for the dominant singular triplet
//!
//! Fixed seeded matrices exercise the invariants of power iteration:
//! unit-norm output, fixed-point behaviour, sign invariance, scale covariance
//! and agreement across Gram modes, backends and stopping rules.

use approx::assert_abs_diff_eq;
use power_svd::random::{uniform_matrix, with_singular_values};
use power_svd::{
    dominant_svd, dominant_svd_with, Backend, Convergence, DominantSVDSolver, GramMode, Matrix,
    PowerSvdConfig, PowerSvdError, SingularTriplet, Vector,
};

/// Distance between two unit vectors, ignoring their relative sign
fn sign_free_distance(x: &Vector, y: &Vector) -> f64 {
    (x - y).norm().min((x + y).norm())
}

/// Matrix with a clear spectral gap (σ₁/σ₂ = 2)
fn gapped_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    with_singular_values(rows, cols, &[10.0, 5.0, 2.0, 1.0], seed).unwrap()
}

fn check_triplet(result: &SingularTriplet, cols: usize) {
    assert_eq!(result.vector.len(), cols);
    assert!(result.value >= 0.0, "singular value {} is negative", result.value);
    assert_abs_diff_eq!(result.vector.norm(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_unit_norm_for_random_matrices() {
    for (rows, cols, seed) in [(1, 1, 0), (1, 8, 1), (8, 1, 2), (20, 12, 3), (12, 20, 4)] {
        let a = uniform_matrix(rows, cols, seed);
        let result = dominant_svd(&a, 1000, 1e-12).unwrap();
        println!(
            "{}x{}: sigma = {}, iterations = {}, converged = {}",
            rows, cols, result.value, result.iterations, result.converged
        );
        assert!(result.converged);
        check_triplet(&result, cols);
    }
}

#[test]
fn test_diagonal_531() {
    let a = Matrix::from_diagonal(&Vector::from_vec(vec![5.0, 3.0, 1.0]));
    let result = dominant_svd(&a, 50, 1e-8).unwrap();

    assert!(result.converged);
    assert_abs_diff_eq!(result.value, 5.0, epsilon = 1e-6);
    let expected = Vector::from_vec(vec![1.0, 0.0, 0.0]);
    assert!(sign_free_distance(&result.vector, &expected) < 1e-3);
}

#[test]
fn test_fixed_point() {
    let a = gapped_matrix(30, 10, 5);
    let tolerance = 1e-12;
    let first = dominant_svd(&a, 500, tolerance).unwrap();
    assert!(first.converged);

    let solver = DominantSVDSolver::new(PowerSvdConfig::new(1, tolerance)).unwrap();
    let second = solver.solve_from(&a, &first.vector).unwrap();

    assert_eq!(second.iterations, 1);
    assert!(second.converged);
    assert!(second.delta < tolerance);
    assert!(sign_free_distance(&first.vector, &second.vector) < 1e-5);
    assert_abs_diff_eq!(first.value, second.value, epsilon = 1e-9);
}

#[test]
fn test_zero_matrix_any_size() {
    for (rows, cols) in [(1, 1), (3, 5), (5, 3), (64, 64)] {
        let a = Matrix::zeros(rows, cols);
        let result = dominant_svd(&a, 100, 1e-8);
        assert!(matches!(result, Err(PowerSvdError::DegenerateInput(_))));
    }
}

#[test]
fn test_empty_dimensions() {
    assert!(matches!(
        dominant_svd(&Matrix::zeros(0, 4), 100, 1e-8),
        Err(PowerSvdError::DegenerateInput(_))
    ));
    assert!(matches!(
        dominant_svd(&Matrix::zeros(4, 0), 100, 1e-8),
        Err(PowerSvdError::DegenerateInput(_))
    ));
}

#[test]
fn test_invalid_parameters() {
    let a = uniform_matrix(4, 4, 0);
    assert!(matches!(
        dominant_svd(&a, 0, 1e-8),
        Err(PowerSvdError::InvalidParameter(_))
    ));
    assert!(matches!(
        dominant_svd(&a, 10, 0.0),
        Err(PowerSvdError::InvalidParameter(_))
    ));
}

#[test]
fn test_sign_invariance() {
    let a = uniform_matrix(15, 9, 6);
    let negated = -&a;

    let result = dominant_svd(&a, 1000, 1e-12).unwrap();
    let result_neg = dominant_svd(&negated, 1000, 1e-12).unwrap();

    assert_abs_diff_eq!(result.value, result_neg.value, epsilon = 1e-10);
    assert!(sign_free_distance(&result.vector, &result_neg.vector) < 1e-6);
}

#[test]
fn test_scale_covariance() {
    let a = gapped_matrix(25, 8, 7);
    let c = 3.5;
    let scaled = &a * c;

    let result = dominant_svd(&a, 1000, 1e-12).unwrap();
    let result_scaled = dominant_svd(&scaled, 1000, 1e-12).unwrap();

    assert_abs_diff_eq!(result_scaled.value, c * result.value, epsilon = 1e-10 * c * result.value);
    assert!(sign_free_distance(&result.vector, &result_scaled.vector) < 1e-6);
}

#[test]
fn test_scale_covariance_extreme() {
    let a = gapped_matrix(25, 8, 7);
    let result = dominant_svd(&a, 1000, 1e-12).unwrap();

    for c in [1e200, 1e-200] {
        let scaled = dominant_svd(&(&a * c), 1000, 1e-12).unwrap();
        assert!(scaled.converged);
        assert_abs_diff_eq!(scaled.value / c, result.value, epsilon = 1e-10 * result.value);
        assert!(sign_free_distance(&result.vector, &scaled.vector) < 1e-6);
    }

    // Power-of-two factors scale exactly
    for k in [600, -600] {
        let c = 2f64.powi(k);
        let scaled = dominant_svd(&(&a * c), 1000, 1e-12).unwrap();
        assert_eq!(scaled.value, c * result.value);
        assert_eq!(scaled.vector, result.vector);
        assert_eq!(scaled.iterations, result.iterations);
    }
}

#[test]
fn test_diagonal_531_extreme_magnitudes() {
    for scale in [1e160, 1e-160] {
        let a = Matrix::from_diagonal(&Vector::from_vec(vec![5.0, 3.0, 1.0])) * scale;
        let result = dominant_svd(&a, 100, 1e-8).unwrap();

        assert!(result.converged);
        assert_abs_diff_eq!(result.value, 5.0 * scale, epsilon = 1e-6 * scale);
        let expected = Vector::from_vec(vec![1.0, 0.0, 0.0]);
        assert!(sign_free_distance(&result.vector, &expected) < 1e-3);
    }
}

#[test]
fn test_tiny_iteration_cap() {
    // σ₁/σ₂ close to one needs many iterations
    let a = with_singular_values(12, 6, &[1.0, 0.99, 0.5], 8).unwrap();
    let result = dominant_svd(&a, 1, 1e-12).unwrap();

    assert!(!result.converged);
    assert_eq!(result.iterations, 1);
    check_triplet(&result, 6);
    assert!(matches!(
        result.into_converged(),
        Err(PowerSvdError::NotConverged { iterations: 1, .. })
    ));
}

#[test]
fn test_gram_modes_agree() {
    let a = gapped_matrix(60, 12, 9);
    let implicit = dominant_svd_with(
        &a,
        PowerSvdConfig::new(1000, 1e-13).with_gram_mode(GramMode::Implicit),
    )
    .unwrap();
    let explicit = dominant_svd_with(
        &a,
        PowerSvdConfig::new(1000, 1e-13).with_gram_mode(GramMode::Explicit),
    )
    .unwrap();

    assert_abs_diff_eq!(implicit.value, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(implicit.value, explicit.value, epsilon = 1e-9);
    assert!(sign_free_distance(&implicit.vector, &explicit.vector) < 1e-6);
}

#[test]
fn test_backends_agree() {
    let a = uniform_matrix(400, 300, 10);
    let config = PowerSvdConfig::new(200, 1e-12);
    let serial = dominant_svd_with(&a, config.clone().with_backend(Backend::Serial)).unwrap();
    let parallel = dominant_svd_with(&a, config.with_backend(Backend::Parallel)).unwrap();

    assert!(serial.converged && parallel.converged);
    assert_abs_diff_eq!(serial.value, parallel.value, epsilon = 1e-10 * serial.value);
    assert!(sign_free_distance(&serial.vector, &parallel.vector) < 1e-6);
}

#[test]
fn test_convergence_criteria_agree() {
    let a = gapped_matrix(40, 10, 11);
    let vector_change = dominant_svd_with(
        &a,
        PowerSvdConfig::new(1000, 1e-14).with_convergence(Convergence::VectorChange),
    )
    .unwrap();
    let rayleigh = dominant_svd_with(
        &a,
        PowerSvdConfig::new(1000, 1e-13).with_convergence(Convergence::RelativeRayleighQuotient),
    )
    .unwrap();

    assert!(vector_change.converged && rayleigh.converged);
    assert_abs_diff_eq!(vector_change.value, rayleigh.value, epsilon = 1e-10);
    assert!(sign_free_distance(&vector_change.vector, &rayleigh.vector) < 1e-5);
}

#[test]
fn test_seed_changes_path_not_result() {
    let a = gapped_matrix(30, 10, 12);
    let first = dominant_svd_with(&a, PowerSvdConfig::new(1000, 1e-14).with_seed(1)).unwrap();
    let second = dominant_svd_with(&a, PowerSvdConfig::new(1000, 1e-14).with_seed(2)).unwrap();

    assert_abs_diff_eq!(first.value, second.value, epsilon = 1e-10);
    assert!(sign_free_distance(&first.vector, &second.vector) < 1e-5);
}
