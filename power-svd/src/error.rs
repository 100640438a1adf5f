//! Error types for power iteration

/// Error types for dominant singular triplet computation
#[derive(Debug, thiserror::Error)]
pub enum PowerSvdError {
    /// Empty matrix, all-zero matrix, or an iterate in the null space of AᵗA
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
    /// Iteration cap reached before the tolerance was met
    #[error("Power iteration did not converge after {iterations} iterations (delta = {delta:.3e}, value = {value})")]
    NotConverged {
        iterations: usize,
        delta: f64,
        value: f64,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Matrix contains NaN or infinite entries")]
    NonFiniteInput,
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Reference decomposition unavailable: {0}")]
    ReferenceUnavailable(String),
}
