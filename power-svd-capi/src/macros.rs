//! Lifecycle functions for opaque handles

/// Generate `psvd_<TYPE>_release`, `psvd_<TYPE>_clone` and `psvd_<TYPE>_is_assigned`
///
/// The wrapped type must implement `Clone` and be named `psvd_<TYPE>`.
///
/// # Example
/// ```ignore
/// #[derive(Clone)]
/// pub struct psvd_config {
///     inner: PowerSvdConfig,
/// }
///
/// impl_opaque_type_common!(config);
/// ```
#[macro_export]
macro_rules! impl_opaque_type_common {
    ($type_name:ident) => {
        paste::paste! {
            /// Release the object by dropping it
            ///
            /// # Safety
            /// The caller must ensure that the pointer is valid and not used after this call.
            #[unsafe(no_mangle)]
            pub extern "C" fn [<psvd_ $type_name _release>](obj: *mut [<psvd_ $type_name>]) {
                if obj.is_null() {
                    return;
                }
                unsafe {
                    let _ = Box::from_raw(obj);
                }
            }

            /// Clone the object
            ///
            /// # Safety
            /// `src` must be null or point to a live object created by this library.
            ///
            /// # Returns
            /// A new pointer that must be freed with the matching release function,
            /// or null if the input is null or a panic occurs.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn [<psvd_ $type_name _clone>](
                src: *const [<psvd_ $type_name>]
            ) -> *mut [<psvd_ $type_name>] {
                if src.is_null() {
                    return std::ptr::null_mut();
                }

                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
                    let cloned = (*src).clone();
                    Box::into_raw(Box::new(cloned))
                }));

                result.unwrap_or(std::ptr::null_mut())
            }

            /// Check if the object pointer is assigned
            ///
            /// # Returns
            /// 1 if the object is non-null, 0 otherwise
            #[unsafe(no_mangle)]
            pub extern "C" fn [<psvd_ $type_name _is_assigned>](
                obj: *const [<psvd_ $type_name>]
            ) -> i32 {
                if obj.is_null() {
                    0
                } else {
                    1
                }
            }
        }
    };
}
