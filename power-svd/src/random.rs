//! Seeded random fixtures
//!
//! Every generator takes an explicit seed and draws from a ChaCha8 stream,
//! so matrices and vectors are reproducible across runs and platforms.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::PowerSvdError;
use crate::{Matrix, Vector};

/// Environment variable read by [`seed_from_env`]
pub const SEED_ENV_VAR: &str = "POWER_SVD_SEED";

/// Seed from `POWER_SVD_SEED`, or `default` when unset or unparsable
pub fn seed_from_env(default: u64) -> u64 {
    std::env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Matrix with entries uniform on [0, 1)
pub fn uniform_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Matrix::from_fn(rows, cols, |_, _| rng.gen::<f64>())
}

/// Vector with entries uniform on [low, high)
pub fn uniform_vector(len: usize, seed: u64, low: f64, high: f64) -> Vector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Vector::from_fn(len, |_, _| rng.gen_range(low..high))
}

/// Matrix U·diag(s)·Vᵗ with prescribed singular values `s`
///
/// U (rows × k) and V (cols × k) are orthonormal factors from the QR
/// decomposition of seeded uniform matrices, with k = `s.len()`.
///
/// # Errors
/// * `InvalidParameter` - more than min(rows, cols) singular values
pub fn with_singular_values(
    rows: usize,
    cols: usize,
    s: &[f64],
    seed: u64,
) -> Result<Matrix, PowerSvdError> {
    let k = s.len();
    if k > rows.min(cols) {
        return Err(PowerSvdError::InvalidParameter(format!(
            "{} singular values requested for a {}x{} matrix",
            k, rows, cols
        )));
    }

    let u = uniform_matrix(rows, k, seed).qr().q();
    let v = uniform_matrix(cols, k, seed.wrapping_add(1)).qr().q();
    let sigma = Matrix::from_diagonal(&Vector::from_column_slice(s));

    Ok(&u * &sigma * v.transpose())
}
