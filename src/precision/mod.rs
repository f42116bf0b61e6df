//! Precision type definitions and implementations

// For now, we focus on the f64 implementation only; the trait is the seam
// where an extended-precision backend would plug in.

/// Trait for scalar types used by the decomposition routines
pub trait Precision:
    From<f64>
    + Into<f64>
    + Copy
    + Clone
    + 'static
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::cmp::PartialEq
    + std::cmp::PartialOrd
    + num_traits::Zero
    + num_traits::One
    + num_traits::Float
{
    /// Machine epsilon for this precision type
    fn epsilon() -> Self;

    /// Square root function
    fn sqrt(self) -> Self;

    /// Absolute value function
    fn abs(self) -> Self;
}

impl Precision for f64 {
    fn epsilon() -> f64 {
        f64::EPSILON
    }

    #[inline]
    fn sqrt(self) -> f64 {
        self.sqrt()
    }

    #[inline]
    fn abs(self) -> f64 {
        self.abs()
    }
}
