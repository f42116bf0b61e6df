//! Base-10 order-of-magnitude helper

use crate::precision::Precision;

/// Decimal order of magnitude of a positive value: the integer k such that
/// the value lies in [10^k, 10^(k+1)).
///
/// Only defined for inputs strictly greater than zero; callers must
/// special-case zero before calling.
pub fn order10<T: Precision>(x: T) -> i32 {
    let value: f64 = x.into();
    value.log10().floor() as i32
}
