//! Utility functions for C API
//!
//! Memory order conversion and import of caller-owned matrix buffers.

use power_svd::Matrix;

use crate::{PSVD_ORDER_COLUMN_MAJOR, PSVD_ORDER_ROW_MAJOR};

/// Memory layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOrder {
    RowMajor,    // Rightmost dimension varies fastest (C, NumPy)
    ColumnMajor, // Leftmost dimension varies fastest (Fortran, Julia, MATLAB)
}

impl MemoryOrder {
    pub fn from_c_int(order: libc::c_int) -> Option<Self> {
        match order {
            PSVD_ORDER_ROW_MAJOR => Some(Self::RowMajor),
            PSVD_ORDER_COLUMN_MAJOR => Some(Self::ColumnMajor),
            _ => None,
        }
    }
}

/// Copy a `rows × cols` C array into an owned nalgebra matrix
///
/// # Safety
/// `data` must point to at least `rows * cols` readable `f64` values.
pub unsafe fn matrix_from_c_array(
    data: *const f64,
    rows: usize,
    cols: usize,
    order: MemoryOrder,
) -> Matrix {
    let slice = std::slice::from_raw_parts(data, rows * cols);
    match order {
        MemoryOrder::RowMajor => Matrix::from_row_slice(rows, cols, slice),
        MemoryOrder::ColumnMajor => Matrix::from_column_slice(rows, cols, slice),
    }
}
