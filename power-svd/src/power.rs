//! Power iteration for the dominant singular triplet
//!
//! Computes the leading right singular vector of A as the dominant
//! eigenvector of AᵗA:
//! 1. Start from a unit vector v₀
//! 2. Apply w = AᵗA·vₖ and normalize, vₖ₊₁ = w / ‖w‖
//! 3. Stop once the change metric drops below the tolerance
//! 4. Read off σ = ‖A·v‖
//!
//! The iteration runs on A·2⁻ᵉ, with e chosen so the largest entry lies in
//! [1, 2). AᵗA·v then stays in range for any finite A, and σ is scaled back
//! by 2ᵉ at the end. Power-of-two scaling is exact away from subnormals, so
//! A and 2ᵏ·A give bit-identical vectors.

use std::borrow::Cow;

use crate::config::{Convergence, InitialGuess, PowerSvdConfig};
use crate::error::PowerSvdError;
use crate::operator::GramOperator;
use crate::random::uniform_vector;
use crate::{Matrix, Vector};

/// Images of AᵗA with a norm below this are treated as zero
pub const NULL_IMAGE_THRESHOLD: f64 = 1e-300;

/// Result of power iteration
#[derive(Debug, Clone)]
pub struct SingularTriplet {
    /// Dominant singular value (≥ 0)
    pub value: f64,
    /// Right singular vector (length C, unit norm, sign arbitrary)
    pub vector: Vector,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
    /// Iterations actually performed
    pub iterations: usize,
    /// Last value of the convergence metric
    pub delta: f64,
}

impl SingularTriplet {
    /// Turn a non-converged result into `PowerSvdError::NotConverged`
    pub fn into_converged(self) -> Result<Self, PowerSvdError> {
        if self.converged {
            Ok(self)
        } else {
            Err(PowerSvdError::NotConverged {
                iterations: self.iterations,
                delta: self.delta,
                value: self.value,
            })
        }
    }
}

/// Power iteration solver for the dominant singular triplet
#[derive(Debug, Clone)]
pub struct DominantSVDSolver {
    config: PowerSvdConfig,
}

impl DominantSVDSolver {
    pub fn new(config: PowerSvdConfig) -> Result<Self, PowerSvdError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute the dominant singular triplet of `a`
    ///
    /// Hitting the iteration cap is not an error: the best estimate is
    /// returned with `converged == false`.
    ///
    /// # Errors
    /// * `DegenerateInput` - empty or all-zero matrix, or the iterate fell into the null space of AᵗA
    /// * `NonFiniteInput` - the matrix has NaN or infinite entries
    pub fn solve(&self, a: &Matrix) -> Result<SingularTriplet, PowerSvdError> {
        let amax = validate_matrix(a)?;
        let start = initial_vector(self.config.initial_guess, a.ncols())?;
        self.iterate(a, amax, start)
    }

    /// Same as [`solve`](Self::solve), starting from `seed` instead of the configured guess
    pub fn solve_from(&self, a: &Matrix, seed: &Vector) -> Result<SingularTriplet, PowerSvdError> {
        let amax = validate_matrix(a)?;
        if seed.len() != a.ncols() {
            return Err(PowerSvdError::DimensionMismatch {
                expected: a.ncols(),
                got: seed.len(),
            });
        }
        let start = normalize(seed.clone())?;
        self.iterate(a, amax, start)
    }

    fn iterate(&self, a: &Matrix, amax: f64, mut v: Vector) -> Result<SingularTriplet, PowerSvdError> {
        let exponent = amax.log2().floor() as i32;
        let work: Cow<'_, Matrix> = if exponent == 0 {
            Cow::Borrowed(a)
        } else {
            let (lo, hi) = pow2_factors(-exponent);
            Cow::Owned(a.map(|x| x * lo * hi))
        };

        let op = GramOperator::new(&work, self.config.gram_mode, self.config.backend);
        log::debug!(
            "power iteration on {}x{} matrix (explicit gram: {}, parallel: {}, scale: 2^{})",
            a.nrows(),
            a.ncols(),
            op.is_explicit(),
            op.is_parallel(),
            -exponent
        );

        let tolerance = self.config.tolerance;
        let mut delta = f64::INFINITY;
        let mut iterations = 0;
        let mut converged = false;
        // Rayleigh mode computes AᵗA·vₖ₊₁ early; keep it for the next step
        let mut cached: Option<Vector> = None;

        for k in 0..self.config.max_iterations {
            let w = match cached.take() {
                Some(w) => w,
                None => op.apply(&v),
            };

            let norm_w = w.norm();
            // Negated comparison also rejects NaN
            if !(norm_w >= NULL_IMAGE_THRESHOLD) {
                return Err(PowerSvdError::DegenerateInput(format!(
                    "AᵗA·v vanished at iteration {} (norm = {:e})",
                    k, norm_w
                )));
            }

            let next = w.unscale(norm_w);
            let overlap = next.dot(&v);
            delta = match self.config.convergence {
                Convergence::VectorChange => (1.0 - overlap.abs()).abs(),
                Convergence::RelativeRayleighQuotient => {
                    // ρₖ = vₖᵗ·w = ‖w‖·⟨vₖ₊₁, vₖ⟩
                    let rho_prev = norm_w * overlap;
                    let image = op.apply(&next);
                    let rho_next = next.dot(&image);
                    cached = Some(image);
                    (rho_next - rho_prev).abs() / rho_next.abs().max(f64::MIN_POSITIVE)
                }
            };

            v = next;
            iterations = k + 1;
            log::trace!("iteration {}: delta = {:e}", iterations, delta);

            if delta < tolerance {
                converged = true;
                break;
            }
        }

        let (lo, hi) = pow2_factors(exponent);
        let value = op.apply_matrix(&v).norm() * lo * hi;

        if converged {
            log::debug!("converged after {} iterations, sigma = {}", iterations, value);
        } else {
            log::warn!(
                "power iteration did not converge after {} iterations (delta = {:e}, tolerance = {:e})",
                iterations,
                delta,
                tolerance
            );
        }

        Ok(SingularTriplet {
            value,
            vector: v,
            converged,
            iterations,
            delta,
        })
    }
}

/// Reject empty, non-finite and all-zero matrices, returning the largest absolute entry
fn validate_matrix(a: &Matrix) -> Result<f64, PowerSvdError> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(PowerSvdError::DegenerateInput(format!(
            "Matrix must have positive dimensions, got {}x{}",
            rows, cols
        )));
    }
    if a.iter().any(|x| !x.is_finite()) {
        return Err(PowerSvdError::NonFiniteInput);
    }
    let amax = a.amax();
    if amax == 0.0 {
        return Err(PowerSvdError::DegenerateInput(
            "Matrix is identically zero, no dominant direction exists".to_string(),
        ));
    }
    Ok(amax)
}

/// Two factors whose product is 2ᵉ, each representable for |e| ≤ 2100
fn pow2_factors(e: i32) -> (f64, f64) {
    let half = e / 2;
    (2f64.powi(half), 2f64.powi(e - half))
}

fn initial_vector(guess: InitialGuess, len: usize) -> Result<Vector, PowerSvdError> {
    let v = match guess {
        InitialGuess::Random { seed } => uniform_vector(len, seed, -1.0, 1.0),
        InitialGuess::Ones => Vector::from_element(len, 1.0),
    };
    normalize(v)
}

fn normalize(v: Vector) -> Result<Vector, PowerSvdError> {
    let norm = v.norm();
    if !norm.is_finite() || norm == 0.0 {
        return Err(PowerSvdError::InvalidParameter(format!(
            "Starting vector must be finite and non-zero, got norm {}",
            norm
        )));
    }
    Ok(v.unscale(norm))
}

/// Dominant singular triplet with default settings besides the cap and tolerance
pub fn dominant_svd(
    a: &Matrix,
    max_iterations: usize,
    tolerance: f64,
) -> Result<SingularTriplet, PowerSvdError> {
    dominant_svd_with(a, PowerSvdConfig::new(max_iterations, tolerance))
}

/// Dominant singular triplet with a full configuration
pub fn dominant_svd_with(
    a: &Matrix,
    config: PowerSvdConfig,
) -> Result<SingularTriplet, PowerSvdError> {
    DominantSVDSolver::new(config)?.solve(a)
}
