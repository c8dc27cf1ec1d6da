//! Core types for the 3j-symbol evaluation.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::fmt;

use crate::machine::{WignerFloat, QN_EPS};

/// Error type for the 3j-symbol evaluation.
///
/// Each variant corresponds to one violated admissibility condition, in
/// bijection with the IER codes 1-6 of SLATEC DRC3JM. The conditions are
/// checked in this order and the first failure wins. All errors are
/// terminal; no partial output is written when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `l1 < |m1|`, or `l1 + |m1|` is not an integer (IER=1).
    M1OutOfRange,
    /// The triangle condition `|l1-l2| <= l3 <= l1+l2` fails (IER=2).
    TriangleViolation,
    /// `l1 + l2 + l3` is not an integer (IER=3).
    NonIntegerSum,
    /// `m2max - m2min` is not an integer (IER=4).
    NonIntegerRange,
    /// `m2min` exceeds `m2max`, so no admissible `m2` exists (IER=5).
    EmptyRange,
    /// The output buffer is shorter than `m2max - m2min + 1` (IER=6).
    BufferTooSmall,
}

impl Error {
    /// The numeric error code of the corresponding SLATEC condition.
    pub fn code(&self) -> i32 {
        match self {
            Error::M1OutOfRange => 1,
            Error::TriangleViolation => 2,
            Error::NonIntegerSum => 3,
            Error::NonIntegerRange => 4,
            Error::EmptyRange => 5,
            Error::BufferTooSmall => 6,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::M1OutOfRange => {
                write!(f, "either `l1 < abs(m1)` or `l1+abs(m1)` non-integer")
            }
            Error::TriangleViolation => {
                write!(f, "`abs(l1-l2) <= l3 <= l1+l2` not satisfied")
            }
            Error::NonIntegerSum => {
                write!(f, "`l1+l2+l3` not an integer")
            }
            Error::NonIntegerRange => {
                write!(f, "`m2max-m2min` not an integer")
            }
            Error::EmptyRange => {
                write!(f, "`m2max` less than `m2min`")
            }
            Error::BufferTooSmall => {
                write!(f, "output buffer shorter than `m2max-m2min+1`")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Admissible range of the second projection quantum number `m2`.
///
/// Returned by [`wigner_3jm_range`](crate::wigner_3jm_range) and
/// [`wigner_3jm`](crate::wigner_3jm); `m2` runs from `min` to `max` in unit
/// steps, and the 3j sequence holds one coefficient per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M2Range<T: WignerFloat> {
    /// Smallest admissible `m2`, `max(-l2, -l3-m1)`.
    pub min: T,
    /// Largest admissible `m2`, `min(l2, l3-m1)`.
    pub max: T,
}

impl<T: WignerFloat> M2Range<T> {
    /// Number of admissible `m2` values, `max - min + 1`.
    ///
    /// Zero only for a range that did not come out of a successful
    /// admissibility check.
    pub fn count(&self) -> usize {
        (self.max - self.min + T::one() + T::from_f64(QN_EPS))
            .to_usize()
            .unwrap_or(0)
    }
}

/// Owned 3j-symbol sequence, returned by
/// [`wigner_3jm_seq`](crate::wigner_3jm_seq).
///
/// `values[i]` holds the 3j symbol at `m2 = range.min + i`.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeJmResult<T: WignerFloat> {
    /// Admissible range of `m2`.
    pub range: M2Range<T>,
    /// One coefficient per admissible `m2`, in increasing `m2` order.
    pub values: Vec<T>,
}
