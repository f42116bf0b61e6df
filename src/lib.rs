//! # householder-qr: QR decomposition via Householder reflections
//!
//! A small dense linear-algebra library that factorizes a real matrix A into
//! an orthogonal Q and an upper-triangular R by sweeping Householder
//! reflections over the leading columns, with lazy, memoized computation of
//! the factors and an order-of-magnitude diagnostic for the floating-point
//! residual left below the diagonal.

pub mod precision;
pub mod qr;
pub mod utils;

pub use precision::Precision;
pub use qr::{
    FpErrorOrder, QrDecomposition, QrError, QrMode, REFLECTION_SIGN, build_reflection, qr_f64,
    reflection_vector, signed_norm,
};
pub use utils::{embed, max_abs_strictly_lower, norm_2, order10};

// Type aliases for convenience
pub type Matrix = ndarray::Array2<f64>;
pub type Vector = ndarray::Array1<f64>;
