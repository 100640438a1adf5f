//! Dominant singular triplet by power iteration using nalgebra
//!
//! This library computes the largest singular value of a dense real matrix
//! together with its right singular vector, by power iteration on the Gram
//! operator AᵗA. It is a fast approximation to a full SVD when only the
//! leading triplet is needed.
//!
//! # Example
//! ```
//! use power_svd::{dominant_svd, Matrix};
//!
//! let a = Matrix::from_row_slice(3, 3, &[
//!     5.0, 0.0, 0.0,
//!     0.0, 3.0, 0.0,
//!     0.0, 0.0, 1.0,
//! ]);
//! let triplet = dominant_svd(&a, 200, 1e-12).unwrap();
//! assert!(triplet.converged);
//! assert!((triplet.value - 5.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod operator;
pub mod power;
pub mod random;
pub mod reference;

// Re-export main types
pub use nalgebra::{DMatrix, DVector};

// Re-export main functions
pub use config::{Backend, Convergence, GramMode, InitialGuess, PowerSvdConfig};
pub use error::PowerSvdError;
pub use operator::GramOperator;
pub use power::{dominant_svd, dominant_svd_with, DominantSVDSolver, SingularTriplet};
pub use reference::{compare, Comparison};

// Type aliases for convenience
pub type Matrix = DMatrix<f64>;
pub type Vector = DVector<f64>;
