//! Solver configuration API

use std::panic::{catch_unwind, AssertUnwindSafe};

use power_svd::{Backend, Convergence, GramMode, InitialGuess, PowerSvdConfig};

use crate::types::psvd_config;
use crate::{StatusCode, PSVD_INTERNAL_ERROR, PSVD_INVALID_ARGUMENT, PSVD_SUCCESS};

// Generate common opaque type functions: release, clone, is_assigned
impl_opaque_type_common!(config);

/// Create a configuration with default settings
///
/// Defaults: 100 iterations, tolerance 1e-9, implicit Gram operator,
/// vector-change stopping rule, random start with seed 0, automatic backend.
///
/// # Returns
/// * Pointer to the configuration, or NULL on failure
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_new(status: *mut StatusCode) -> *mut psvd_config {
    if status.is_null() {
        return std::ptr::null_mut();
    }

    let result = catch_unwind(|| Box::into_raw(Box::new(psvd_config::new(PowerSvdConfig::default()))));

    match result {
        Ok(ptr) => {
            unsafe { *status = PSVD_SUCCESS; }
            ptr
        }
        Err(_) => {
            unsafe { *status = PSVD_INTERNAL_ERROR; }
            std::ptr::null_mut()
        }
    }
}

/// Apply `update` to the configuration behind `config`
///
/// The update returns false when the requested value is invalid; the
/// configuration is left unchanged in that case.
fn update_config<F>(config: *mut psvd_config, update: F) -> StatusCode
where
    F: FnOnce(&mut PowerSvdConfig) -> bool,
{
    if config.is_null() {
        return PSVD_INVALID_ARGUMENT;
    }

    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        let cfg = (*config).inner_mut();
        let mut candidate = cfg.clone();
        if update(&mut candidate) {
            *cfg = candidate;
            PSVD_SUCCESS
        } else {
            PSVD_INVALID_ARGUMENT
        }
    }));

    result.unwrap_or(PSVD_INTERNAL_ERROR)
}

/// Set the iteration cap (must be positive)
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_max_iterations(
    config: *mut psvd_config,
    max_iterations: libc::c_int,
) -> StatusCode {
    update_config(config, |cfg| {
        if max_iterations <= 0 {
            return false;
        }
        cfg.max_iterations = max_iterations as usize;
        true
    })
}

/// Set the convergence tolerance (must be finite and positive)
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_tolerance(config: *mut psvd_config, tolerance: f64) -> StatusCode {
    update_config(config, |cfg| {
        cfg.tolerance = tolerance;
        cfg.validate().is_ok()
    })
}

/// Set the Gram operator mode: `PSVD_GRAM_IMPLICIT`, `PSVD_GRAM_EXPLICIT` or `PSVD_GRAM_AUTO`
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_gram_mode(config: *mut psvd_config, mode: libc::c_int) -> StatusCode {
    update_config(config, |cfg| match GramMode::from_c_int(mode) {
        Some(mode) => {
            cfg.gram_mode = mode;
            true
        }
        None => false,
    })
}

/// Set the stopping rule: `PSVD_CONVERGENCE_VECTOR` or `PSVD_CONVERGENCE_RELATIVE_RAYLEIGH`
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_convergence(
    config: *mut psvd_config,
    convergence: libc::c_int,
) -> StatusCode {
    update_config(config, |cfg| match Convergence::from_c_int(convergence) {
        Some(convergence) => {
            cfg.convergence = convergence;
            true
        }
        None => false,
    })
}

/// Use a random start vector drawn from `seed`
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_seed(config: *mut psvd_config, seed: u64) -> StatusCode {
    update_config(config, |cfg| {
        cfg.initial_guess = InitialGuess::Random { seed };
        true
    })
}

/// Set the backend: `PSVD_BACKEND_SERIAL`, `PSVD_BACKEND_PARALLEL` or `PSVD_BACKEND_AUTO`
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_set_backend(config: *mut psvd_config, backend: libc::c_int) -> StatusCode {
    update_config(config, |cfg| match Backend::from_c_int(backend) {
        Some(backend) => {
            cfg.backend = backend;
            true
        }
        None => false,
    })
}

/// Read back the iteration cap and tolerance
#[unsafe(no_mangle)]
pub extern "C" fn psvd_config_get_limits(
    config: *const psvd_config,
    max_iterations: *mut libc::c_int,
    tolerance: *mut f64,
) -> StatusCode {
    if config.is_null() || max_iterations.is_null() || tolerance.is_null() {
        return PSVD_INVALID_ARGUMENT;
    }

    let result = catch_unwind(|| unsafe {
        let cfg = (*config).inner();
        *max_iterations = cfg.max_iterations.min(libc::c_int::MAX as usize) as libc::c_int;
        *tolerance = cfg.tolerance;
        PSVD_SUCCESS
    });

    result.unwrap_or(PSVD_INTERNAL_ERROR)
}
