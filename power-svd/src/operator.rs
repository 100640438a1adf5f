//! Gram operator AᵗA with implicit/explicit construction and serial/parallel backends
//!
//! Matrices are nalgebra column-major, so every column of A is a contiguous
//! slice. The parallel kernels lean on that:
//! - `A·v` splits the output into row blocks and sweeps the columns for each block,
//! - `Aᵗ·u` computes one dot product per column.
//!
//! Each output entry is a sequential sum in a fixed order, so the parallel
//! results do not depend on the number of rayon threads. They may differ from
//! the serial gemv path in the last bits.

use rayon::prelude::*;

use crate::config::{Backend, GramMode};
use crate::{Matrix, Vector};

/// Rows per rayon task in the parallel `A·v` kernel
const ROW_BLOCK: usize = 256;

/// The operator v ↦ AᵗA·v for a borrowed matrix A
#[derive(Debug)]
pub struct GramOperator<'a> {
    a: &'a Matrix,
    /// Precomputed AᵗA (C×C) in explicit mode
    gram: Option<Matrix>,
    parallel: bool,
}

impl<'a> GramOperator<'a> {
    /// Build the operator, resolving `Auto` choices against the shape of `a`
    pub fn new(a: &'a Matrix, mode: GramMode, backend: Backend) -> Self {
        let (rows, cols) = a.shape();
        let parallel = backend.resolve(rows, cols) == Backend::Parallel;
        let gram = match mode.resolve(rows, cols) {
            GramMode::Explicit => Some(if parallel {
                par_gram(a)
            } else {
                a.tr_mul(a)
            }),
            _ => None,
        };
        Self { a, gram, parallel }
    }

    pub fn is_explicit(&self) -> bool {
        self.gram.is_some()
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// w = AᵗA·v
    pub fn apply(&self, v: &Vector) -> Vector {
        match (&self.gram, self.parallel) {
            // AᵗA is symmetric, so G·v = Gᵗ·v and the column kernel applies
            (Some(gram), true) => par_tr_mul(gram, v),
            (Some(gram), false) => gram * v,
            (None, true) => par_tr_mul(self.a, &par_mul(self.a, v)),
            (None, false) => self.a.tr_mul(&(self.a * v)),
        }
    }

    /// A·v, used to read off the singular value
    pub fn apply_matrix(&self, v: &Vector) -> Vector {
        if self.parallel {
            par_mul(self.a, v)
        } else {
            self.a * v
        }
    }
}

/// A·v over row blocks
fn par_mul(a: &Matrix, v: &Vector) -> Vector {
    let rows = a.nrows();
    let data = a.as_slice();
    let mut out = vec![0.0; rows];

    out.par_chunks_mut(ROW_BLOCK)
        .enumerate()
        .for_each(|(block, chunk)| {
            let start = block * ROW_BLOCK;
            for (j, &vj) in v.iter().enumerate() {
                let column = &data[j * rows + start..j * rows + start + chunk.len()];
                for (o, &x) in chunk.iter_mut().zip(column) {
                    *o += x * vj;
                }
            }
        });

    Vector::from_vec(out)
}

/// Aᵗ·u, one column dot product per output entry
fn par_tr_mul(a: &Matrix, u: &Vector) -> Vector {
    let rows = a.nrows();
    let data = a.as_slice();
    let u = u.as_slice();

    let out: Vec<f64> = (0..a.ncols())
        .into_par_iter()
        .map(|j| dot(&data[j * rows..(j + 1) * rows], u))
        .collect();

    Vector::from_vec(out)
}

/// AᵗA built column by column in parallel
fn par_gram(a: &Matrix) -> Matrix {
    let (rows, cols) = a.shape();
    let data = a.as_slice();

    let columns: Vec<Vec<f64>> = (0..cols)
        .into_par_iter()
        .map(|j| {
            let cj = &data[j * rows..(j + 1) * rows];
            (0..cols)
                .map(|i| dot(&data[i * rows..(i + 1) * rows], cj))
                .collect()
        })
        .collect();

    Matrix::from_iterator(cols, cols, columns.into_iter().flatten())
}

fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}
