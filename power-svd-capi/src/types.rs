//! Opaque types for C API
//!
//! Rust objects are handed to C behind opaque pointers.

use power_svd::PowerSvdConfig;

/// Opaque solver configuration
///
/// Created with `psvd_config_new`, adjusted with the `psvd_config_set_*`
/// functions and freed with `psvd_config_release`.
#[allow(non_camel_case_types)]
#[derive(Clone)]
pub struct psvd_config {
    pub(crate) inner: PowerSvdConfig,
}

impl psvd_config {
    pub(crate) fn new(inner: PowerSvdConfig) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &PowerSvdConfig {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut PowerSvdConfig {
        &mut self.inner
    }
}
