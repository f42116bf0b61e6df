//! Embedding of a square block into a larger identity-padded matrix

use crate::precision::Precision;
use ndarray::{Array2, s};

/// Embed a square `block` into a matrix of dimension `block.nrows() + offset`:
/// identity of dimension `offset` in the top-left, `block` in the
/// bottom-right, zero elsewhere.
///
/// Used to lift a reflection computed on a trailing submatrix back to the
/// full working dimension.
pub fn embed<T: Precision>(block: &Array2<T>, offset: usize) -> Array2<T> {
    let size = block.nrows();
    let mut out = Array2::eye(size + offset);
    out.slice_mut(s![offset.., offset..]).assign(block);
    out
}
