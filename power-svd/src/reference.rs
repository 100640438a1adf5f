//! Cross-check against a full SVD
//!
//! nalgebra's bidiagonal SVD serves as the reference. Singular vectors are
//! only defined up to sign, so the reference vector is flipped to agree with
//! the power-iteration vector before comparing.

use crate::error::PowerSvdError;
use crate::power::SingularTriplet;
use crate::{Matrix, Vector};

/// Agreement between a power-iteration triplet and the reference SVD
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Largest singular value from the full SVD
    pub reference_value: f64,
    /// Matching right singular vector, sign-aligned to the triplet
    pub reference_vector: Vector,
    /// |σ − σ_ref|
    pub value_difference: f64,
    /// ⟨v, v_ref⟩ / (‖v‖·‖v_ref‖)
    pub cosine_similarity: f64,
}

/// Largest singular value and its right singular vector from a full SVD
pub fn reference_triplet(a: &Matrix) -> Result<(f64, Vector), PowerSvdError> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(PowerSvdError::DegenerateInput(format!(
            "Matrix must have positive dimensions, got {}x{}",
            rows, cols
        )));
    }

    let svd = a.clone().svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| PowerSvdError::ReferenceUnavailable("Vᵗ was not computed".to_string()))?;

    // Pick the maximum explicitly rather than relying on the ordering
    let (index, value) = svd
        .singular_values
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, s)| if s > best.1 { (i, s) } else { best });

    Ok((value, v_t.row(index).transpose()))
}

/// Flip `reference` so that it points the same way as `vector`
///
/// Follows the sign of the first component; when either first component is
/// zero the sign of the inner product decides.
pub fn align_sign(vector: &Vector, reference: &Vector) -> Vector {
    let flip = match (vector.get(0), reference.get(0)) {
        (Some(&x), Some(&y)) if x != 0.0 && y != 0.0 => x.signum() != y.signum(),
        _ => vector.dot(reference) < 0.0,
    };
    if flip {
        -reference
    } else {
        reference.clone()
    }
}

/// Compare a triplet computed for `a` against the reference SVD of `a`
pub fn compare(a: &Matrix, triplet: &SingularTriplet) -> Result<Comparison, PowerSvdError> {
    if triplet.vector.len() != a.ncols() {
        return Err(PowerSvdError::DimensionMismatch {
            expected: a.ncols(),
            got: triplet.vector.len(),
        });
    }

    let (reference_value, reference_vector) = reference_triplet(a)?;
    let reference_vector = align_sign(&triplet.vector, &reference_vector);
    let cosine_similarity =
        triplet.vector.dot(&reference_vector) / (triplet.vector.norm() * reference_vector.norm());

    Ok(Comparison {
        reference_value,
        value_difference: (triplet.value - reference_value).abs(),
        cosine_similarity,
        reference_vector,
    })
}
