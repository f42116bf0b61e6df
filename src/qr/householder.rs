//! Householder reflection utilities for QR decomposition

use crate::precision::Precision;
use crate::utils::norms::norm_2;
use ndarray::{Array1, Array2, ArrayView1};

/// Sign convention for the reflection vector. With s = -1, a column already
/// aligned with the first axis yields u = 0 and the reflection degenerates
/// to the identity.
pub const REFLECTION_SIGN: f64 = -1.0;

/// Euclidean norm of a vector times the sign of its first element.
///
/// Follows the numpy sign convention: sign(0) = 0, so a vector whose first
/// element is exactly zero has signed norm zero. Callers that feed the result
/// into [`reflection_vector`] then get u = v unscaled, which is still a valid
/// reflector input.
pub fn signed_norm<T: Precision>(v: ArrayView1<T>) -> T {
    let norm = norm_2(v);
    if v[0] > T::zero() {
        norm
    } else if v[0] < T::zero() {
        -norm
    } else {
        T::zero()
    }
}

/// Compute the Householder vector u for the first column of a working
/// submatrix.
///
/// Given a column v = (x1, x2, ...) of length `size`, returns
/// u = (x1 + s·sign(x1)·‖v‖, x2, ...) with s = [`REFLECTION_SIGN`].
pub fn reflection_vector<T: Precision>(column: ArrayView1<T>, size: usize) -> Array1<T> {
    debug_assert_eq!(column.len(), size);

    let mut u = column.to_owned();
    u[0] += <T as From<f64>>::from(REFLECTION_SIGN) * signed_norm(column);
    u
}

/// Build the Householder matrix reflecting `column` onto the first axis.
///
/// Returns H = I - 2·u·uᵀ/(uᵀu), a symmetric orthogonal involution with
/// H·column = -s·sign(x1)·‖column‖·e1. When uᵀu = 0 (the column is already a
/// nonnegative-leading multiple of e1) the reflection is the identity.
pub fn build_reflection<T: Precision>(column: ArrayView1<T>, size: usize) -> Array2<T> {
    debug_assert_eq!(column.len(), size);

    let u = reflection_vector(column, size);
    let inner = u.dot(&u);

    let mut h = Array2::eye(size);
    if inner == T::zero() {
        return h;
    }

    let scale = <T as From<f64>>::from(2.0) / inner;
    for i in 0..size {
        for j in 0..size {
            h[[i, j]] = h[[i, j]] - scale * u[i] * u[j];
        }
    }

    h
}
