//! Dominant singular triplet API

use std::panic::{catch_unwind, AssertUnwindSafe};

use power_svd::{DominantSVDSolver, PowerSvdConfig, PowerSvdError};

use crate::types::psvd_config;
use crate::utils::{matrix_from_c_array, MemoryOrder};
use crate::{
    StatusCode, PSVD_DEGENERATE_INPUT, PSVD_INTERNAL_ERROR, PSVD_INVALID_ARGUMENT,
    PSVD_INVALID_DIMENSION, PSVD_NOT_CONVERGED, PSVD_SUCCESS,
};

fn status_from_error(err: &PowerSvdError) -> StatusCode {
    match err {
        PowerSvdError::DegenerateInput(_) => PSVD_DEGENERATE_INPUT,
        PowerSvdError::NotConverged { .. } => PSVD_NOT_CONVERGED,
        PowerSvdError::InvalidParameter(_) | PowerSvdError::NonFiniteInput => PSVD_INVALID_ARGUMENT,
        PowerSvdError::DimensionMismatch { .. } => PSVD_INVALID_DIMENSION,
        PowerSvdError::ReferenceUnavailable(_) => PSVD_INTERNAL_ERROR,
    }
}

/// Compute the dominant singular value and right singular vector of a matrix
///
/// # Arguments
/// * `config` - Solver configuration, or NULL for defaults
/// * `a` - Matrix data (`rows * cols` doubles)
/// * `rows`, `cols` - Matrix dimensions
/// * `order` - `PSVD_ORDER_ROW_MAJOR` or `PSVD_ORDER_COLUMN_MAJOR`
/// * `out_value` - Receives the singular value
/// * `out_vector` - Receives the right singular vector (`cols` doubles)
/// * `out_iterations` - Receives the number of iterations performed (may be NULL)
///
/// # Returns
/// * `PSVD_SUCCESS` (0) on convergence
/// * `PSVD_NOT_CONVERGED` (1) if the iteration cap was reached; outputs are still written
/// * `PSVD_DEGENERATE_INPUT` (-8) for an empty or all-zero matrix
/// * `PSVD_INVALID_DIMENSION` (-2) for negative dimensions
/// * `PSVD_INVALID_ARGUMENT` (-6) for null pointers, bad order, non-finite data
/// * `PSVD_INTERNAL_ERROR` (-7) if an internal panic occurs
///
/// # Safety
/// `a` must hold `rows * cols` doubles and `out_vector` must have room for `cols` doubles.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub extern "C" fn psvd_dominant_svd(
    config: *const psvd_config,
    a: *const f64,
    rows: libc::c_int,
    cols: libc::c_int,
    order: libc::c_int,
    out_value: *mut f64,
    out_vector: *mut f64,
    out_iterations: *mut libc::c_int,
) -> StatusCode {
    if rows < 0 || cols < 0 {
        return PSVD_INVALID_DIMENSION;
    }
    if rows == 0 || cols == 0 {
        return PSVD_DEGENERATE_INPUT;
    }
    if a.is_null() || out_value.is_null() || out_vector.is_null() {
        return PSVD_INVALID_ARGUMENT;
    }
    let Some(order) = MemoryOrder::from_c_int(order) else {
        return PSVD_INVALID_ARGUMENT;
    };

    let (rows, cols) = (rows as usize, cols as usize);

    // Catch panics to prevent unwinding across FFI boundary
    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let cfg = if config.is_null() {
            PowerSvdConfig::default()
        } else {
            (*config).inner().clone()
        };

        let matrix = matrix_from_c_array(a, rows, cols, order);
        let triplet = DominantSVDSolver::new(cfg)?.solve(&matrix)?;

        *out_value = triplet.value;
        std::ptr::copy_nonoverlapping(triplet.vector.as_ptr(), out_vector, cols);
        if !out_iterations.is_null() {
            *out_iterations = triplet.iterations.min(libc::c_int::MAX as usize) as libc::c_int;
        }

        Ok::<bool, PowerSvdError>(triplet.converged)
    }));

    match result {
        Ok(Ok(true)) => PSVD_SUCCESS,
        Ok(Ok(false)) => PSVD_NOT_CONVERGED,
        Ok(Err(err)) => status_from_error(&err),
        Err(_) => PSVD_INTERNAL_ERROR,
    }
}
