//! Configuration for the power iteration solver
//!
//! Enum discriminants match the constants exposed by the C API.

use crate::error::PowerSvdError;

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
/// Default convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// How the Gram operator AᵗA is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GramMode {
    /// Apply A, then Aᵗ. O(R·C) per iteration, no C×C storage
    Implicit = 0, // PSVD_GRAM_IMPLICIT
    /// Form AᵗA once, then O(C²) per iteration
    Explicit = 1, // PSVD_GRAM_EXPLICIT
    /// Choose by matrix shape
    Auto = -1, // PSVD_GRAM_AUTO
}

impl GramMode {
    pub fn from_c_int(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Implicit),
            1 => Some(Self::Explicit),
            -1 => Some(Self::Auto),
            _ => None,
        }
    }

    /// Resolve `Auto` for a matrix of the given shape.
    ///
    /// The explicit Gram matrix pays off for tall matrices, where a C×C
    /// product is much cheaper than two R×C products.
    pub fn resolve(self, rows: usize, cols: usize) -> GramMode {
        match self {
            GramMode::Auto => {
                if rows >= 4 * cols && cols <= 512 {
                    GramMode::Explicit
                } else {
                    GramMode::Implicit
                }
            }
            other => other,
        }
    }
}

/// Stopping rule for the iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// δ = 1 − |⟨vₖ₊₁, vₖ⟩|
    VectorChange = 0, // PSVD_CONVERGENCE_VECTOR
    /// Relative change of the Rayleigh quotient ρ = vᵗAᵗAv,
    /// δ = |ρₖ₊₁ − ρₖ| / ρₖ₊₁
    ///
    /// The tolerance is a relative bound and does not depend on the scale of A.
    RelativeRayleighQuotient = 1, // PSVD_CONVERGENCE_RELATIVE_RAYLEIGH
}

impl Convergence {
    pub fn from_c_int(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::VectorChange),
            1 => Some(Self::RelativeRayleighQuotient),
            _ => None,
        }
    }
}

/// Matrix-vector product backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// nalgebra gemv on the calling thread
    Serial = 0, // PSVD_BACKEND_SERIAL
    /// rayon over row blocks and columns
    Parallel = 1, // PSVD_BACKEND_PARALLEL
    /// Parallel once the matrix is large enough
    Auto = -1, // PSVD_BACKEND_AUTO
}

/// Matrices with at least this many entries use the parallel backend under `Auto`
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

impl Backend {
    pub fn from_c_int(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Serial),
            1 => Some(Self::Parallel),
            -1 => Some(Self::Auto),
            _ => None,
        }
    }

    pub fn resolve(self, rows: usize, cols: usize) -> Backend {
        match self {
            Backend::Auto => {
                if rows.saturating_mul(cols) >= PARALLEL_THRESHOLD {
                    Backend::Parallel
                } else {
                    Backend::Serial
                }
            }
            other => other,
        }
    }
}

/// Starting vector strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialGuess {
    /// Entries uniform on [-1, 1) from a seeded ChaCha8 stream, normalized
    Random { seed: u64 },
    /// All ones, normalized
    Ones,
}

impl Default for InitialGuess {
    fn default() -> Self {
        InitialGuess::Random { seed: 0 }
    }
}

/// Configuration for dominant SVD computation
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSvdConfig {
    /// Iteration cap; the only termination safeguard
    pub max_iterations: usize,
    /// Convergence threshold on the stopping metric
    pub tolerance: f64,
    pub gram_mode: GramMode,
    pub convergence: Convergence,
    pub initial_guess: InitialGuess,
    pub backend: Backend,
}

impl Default for PowerSvdConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            gram_mode: GramMode::Implicit,
            convergence: Convergence::VectorChange,
            initial_guess: InitialGuess::default(),
            backend: Backend::Auto,
        }
    }
}

impl PowerSvdConfig {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_gram_mode(mut self, gram_mode: GramMode) -> Self {
        self.gram_mode = gram_mode;
        self
    }

    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    pub fn with_initial_guess(mut self, initial_guess: InitialGuess) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_initial_guess(InitialGuess::Random { seed })
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Check that the iteration cap and tolerance are usable
    pub fn validate(&self) -> Result<(), PowerSvdError> {
        if self.max_iterations == 0 {
            return Err(PowerSvdError::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PowerSvdError::InvalidParameter(format!(
                "Tolerance must be finite and positive, got {:?}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PowerSvdConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.tolerance, 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(PowerSvdConfig::new(0, 1e-9).validate().is_err());
        assert!(PowerSvdConfig::new(10, 0.0).validate().is_err());
        assert!(PowerSvdConfig::new(10, -1e-3).validate().is_err());
        assert!(PowerSvdConfig::new(10, f64::NAN).validate().is_err());
        assert!(PowerSvdConfig::new(10, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_c_int_conversion() {
        assert_eq!(GramMode::from_c_int(0), Some(GramMode::Implicit));
        assert_eq!(GramMode::from_c_int(1), Some(GramMode::Explicit));
        assert_eq!(GramMode::from_c_int(-1), Some(GramMode::Auto));
        assert_eq!(GramMode::from_c_int(7), None);
        assert_eq!(Convergence::from_c_int(1), Some(Convergence::RelativeRayleighQuotient));
        assert_eq!(Convergence::from_c_int(-1), None);
        assert_eq!(Backend::from_c_int(1), Some(Backend::Parallel));
        assert_eq!(Backend::from_c_int(2), None);
    }

    #[test]
    fn test_auto_resolution() {
        assert_eq!(GramMode::Auto.resolve(2000, 100), GramMode::Explicit);
        assert_eq!(GramMode::Auto.resolve(2000, 1000), GramMode::Implicit);
        assert_eq!(GramMode::Explicit.resolve(2, 1000), GramMode::Explicit);
        assert_eq!(Backend::Auto.resolve(10, 10), Backend::Serial);
        assert_eq!(Backend::Auto.resolve(512, 512), Backend::Parallel);
        assert_eq!(Backend::Serial.resolve(4096, 4096), Backend::Serial);
    }

    #[test]
    fn test_builder() {
        let config = PowerSvdConfig::new(50, 1e-8)
            .with_gram_mode(GramMode::Explicit)
            .with_convergence(Convergence::RelativeRayleighQuotient)
            .with_seed(42)
            .with_backend(Backend::Parallel);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.gram_mode, GramMode::Explicit);
        assert_eq!(config.convergence, Convergence::RelativeRayleighQuotient);
        assert_eq!(config.initial_guess, InitialGuess::Random { seed: 42 });
        assert_eq!(config.backend, Backend::Parallel);
    }
}
