//! Machine constants and the `WignerFloat` trait.
//!
//! Constants follow the Fortran D1MACH conventions of the SLATEC originals.

use num_traits::Float;

/// Tolerance for quantum-number integrality and admissibility tests.
///
/// A value is accepted as (half-)integer when it lies within this distance
/// of one. The tolerance is absolute, as in SLATEC DRC3JM: it distinguishes
/// recursion indices from accumulated floating error, not from true
/// fractional parts. For very large quantum numbers, whose floating-point
/// spacing approaches or exceeds this value, the test degenerates to
/// accepting everything.
pub const QN_EPS: f64 = 0.01;

/// Floating-point trait for the recursion engines.
///
/// Implemented for `f64` and `f32` (SLATEC shipped the 3j recursion in both
/// precisions, as DRC3JM and RC3JM). Provides the machine constant and the
/// derived overflow-control thresholds used during recursion.
pub trait WignerFloat: Float + core::fmt::Debug + 'static {
    /// Largest representable number (D1MACH(2)).
    const MACH_HUGE: Self;

    /// Infallible conversion from f64.
    ///
    /// For f64 this is the identity; for f32 it truncates via `as f32`.
    /// All algorithm constants originate as f64 literals, so this
    /// conversion always succeeds for the supported types.
    fn from_f64(x: f64) -> Self;

    /// Square root of one twentieth of the largest representable number.
    ///
    /// Accumulated recursion values are kept below this bound.
    fn huge() -> Self {
        (Self::MACH_HUGE / Self::from_f64(20.0)).sqrt()
    }

    /// Square root of [`huge`](WignerFloat::huge), the rescaling divisor.
    fn srhuge() -> Self {
        Self::huge().sqrt()
    }

    /// Reciprocal of [`huge`](WignerFloat::huge), the underflow guard.
    fn tiny() -> Self {
        Self::huge().recip()
    }

    /// Reciprocal of [`srhuge`](WignerFloat::srhuge), the recursion seed.
    fn srtiny() -> Self {
        Self::srhuge().recip()
    }
}

impl WignerFloat for f64 {
    const MACH_HUGE: f64 = 1.7976931348623157e+308;

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }
}

impl WignerFloat for f32 {
    const MACH_HUGE: f32 = 3.4028235e+38;

    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_f64() {
        // huge = sqrt(MAX/20) ≈ 2.998e153
        assert!((f64::huge() - 2.9980769960612384e153).abs() / f64::huge() < 1e-15);
        assert_eq!(f64::srhuge(), f64::huge().sqrt());
        assert_eq!(f64::tiny(), 1.0 / f64::huge());
        assert_eq!(f64::srtiny(), 1.0 / f64::srhuge());
    }

    #[test]
    fn thresholds_are_finite_and_ordered_f32() {
        assert!(f32::huge().is_finite());
        assert!(f32::srtiny() > 0.0);
        assert!(f32::srtiny() < f32::srhuge());
        assert!(f32::srhuge() < f32::huge());
    }

    #[test]
    fn no_overflow_squaring_srhuge() {
        // srhuge² = huge must stay representable; huge² would not.
        let s = f64::srhuge();
        assert!((s * s).is_finite());
    }
}
