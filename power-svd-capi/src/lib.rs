//! C API for the power-svd dominant singular triplet solver
//!
//! This crate exposes the power iteration kernel through a C-compatible
//! interface, so it can be called from Python (ctypes/cffi), Julia, C and C++.

#[macro_use]
mod macros;

mod config;
mod solve;
mod types;
mod utils;

pub use config::*;
pub use solve::*;
pub use types::*;

/// Status codes returned by every C API function
pub type StatusCode = libc::c_int;

pub const PSVD_SUCCESS: StatusCode = 0;
/// The result was written but the iteration cap was reached first
pub const PSVD_NOT_CONVERGED: StatusCode = 1;
pub const PSVD_INVALID_DIMENSION: StatusCode = -2;
pub const PSVD_INVALID_ARGUMENT: StatusCode = -6;
pub const PSVD_INTERNAL_ERROR: StatusCode = -7;
pub const PSVD_DEGENERATE_INPUT: StatusCode = -8;

// Memory order of the input matrix
pub const PSVD_ORDER_ROW_MAJOR: libc::c_int = 0;
pub const PSVD_ORDER_COLUMN_MAJOR: libc::c_int = 1;

// Gram operator construction (matches power_svd::GramMode)
pub const PSVD_GRAM_IMPLICIT: libc::c_int = 0;
pub const PSVD_GRAM_EXPLICIT: libc::c_int = 1;
pub const PSVD_GRAM_AUTO: libc::c_int = -1;

// Stopping rule (matches power_svd::Convergence)
pub const PSVD_CONVERGENCE_VECTOR: libc::c_int = 0;
pub const PSVD_CONVERGENCE_RELATIVE_RAYLEIGH: libc::c_int = 1;

// Matrix-vector backend (matches power_svd::Backend)
pub const PSVD_BACKEND_SERIAL: libc::c_int = 0;
pub const PSVD_BACKEND_PARALLEL: libc::c_int = 1;
pub const PSVD_BACKEND_AUTO: libc::c_int = -1;
