//! QR decomposition of dense real matrices

pub mod decompose;
pub mod householder;

pub use decompose::{FpErrorOrder, QrDecomposition, QrError, QrMode, qr_f64};
pub use householder::{REFLECTION_SIGN, build_reflection, reflection_vector, signed_norm};
