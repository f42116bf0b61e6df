//! Vector and matrix norm computations

use crate::precision::Precision;
use ndarray::{Array2, ArrayView1};

/// Compute the 2-norm (Euclidean norm) of a vector
pub fn norm_2<T: Precision>(vec: ArrayView1<T>) -> T {
    let mut sum = T::zero();
    for i in 0..vec.len() {
        let val = vec[i];
        sum = sum + val * val;
    }
    Precision::sqrt(sum)
}

/// Compute the maximum absolute value among the strictly-lower-triangular
/// entries of a matrix. Returns zero for matrices with no such entries
/// (single-row matrices included).
pub fn max_abs_strictly_lower<T: Precision>(mat: &Array2<T>) -> T {
    let (m, n) = mat.dim();
    let mut max_val = T::zero();
    for i in 1..m {
        for j in 0..i.min(n) {
            let abs_val = Precision::abs(mat[[i, j]]);
            if abs_val > max_val {
                max_val = abs_val;
            }
        }
    }
    max_val
}
