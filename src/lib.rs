//! Recursive evaluation of angular-momentum special functions.
//!
//! This crate computes Legendre polynomials `P_l(x)`, Wigner (little)
//! d-functions `d^l_{n,m}(θ)`, and Wigner 3j symbols for an entire
//! admissible range of one quantum number, the remaining parameters held
//! fixed:
//!
//! - [`legendre_pl`] / [`wigner_dl`] run a three-term recurrence over a
//!   window of the degree `l`;
//! - [`wigner_3jm_range`] and [`wigner_3jm`] evaluate the 3j symbol
//!   `(l1 l2 l3; m1 m2 -m1-m2)` over the admissible range of `m2`, using
//!   the Schulten–Gordon recursion of SLATEC DRC3JM: forward and backward
//!   passes with overflow rescaling, matched at an interior point and
//!   normalized from the unitary property of the 3j coefficients.
//!
//! All engines are pure, allocation-free functions writing into
//! caller-supplied slices, generic over [`f64`] and [`f32`] through the
//! [`WignerFloat`] trait. With the `alloc` feature, `_seq` variants
//! returning owned vectors are also available.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod algo;
pub mod machine;
pub mod types;
mod utils;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

pub use machine::{WignerFloat, QN_EPS};
pub use types::{Error, M2Range};
#[cfg(feature = "alloc")]
pub use types::ThreeJmResult;

/// Legendre polynomials `P_l(x)` for `l = lmin, ..., lmin + p.len() - 1`.
///
/// The window length is the slice length; degrees below `lmin` are computed
/// and discarded, since the recurrence must run from degree 0. Requires
/// `lmin >= 0`.
pub fn legendre_pl<T: WignerFloat>(lmin: i32, x: T, p: &mut [T]) {
    algo::dl::legendre_pl(lmin, x, p);
}

/// Wigner d-functions `d^l_{n,m}(θ)` for `l = lmin, ..., lmin + d.len() - 1`.
///
/// Writes zeros for degrees below `max(|n|, |m|)`, where the function
/// vanishes. For `n = m = 0` this is `P_l(cos θ)`. The angle is in radians.
/// Requires `lmin >= 0`.
pub fn wigner_dl<T: WignerFloat>(lmin: i32, n: i32, m: i32, theta: T, d: &mut [T]) {
    algo::dl::wigner_dl(lmin, n, m, theta, d);
}

/// Admissible range of `m2` in the 3j symbol `(l1 l2 l3; m1 m2 -m1-m2)`.
///
/// Use this to size the output buffer for [`wigner_3jm`]: the filled
/// sequence holds [`M2Range::count`] coefficients. Checks the admissibility
/// conditions on the fixed parameters and reports the first violated one.
pub fn wigner_3jm_range<T: WignerFloat>(l1: T, l2: T, l3: T, m1: T) -> Result<M2Range<T>, Error> {
    let (min, max) = algo::rc3jm::m2_range(l1, l2, l3, m1)?;
    Ok(M2Range { min, max })
}

/// 3j symbols `(l1 l2 l3; m1 m2 -m1-m2)` for every admissible `m2`.
///
/// Fills `thrcof[i]` with the coefficient at `m2 = m2min + i` and returns
/// the admissible range. `thrcof` must hold at least `m2max - m2min + 1`
/// entries ([`Error::BufferTooSmall`] otherwise); entries beyond that count
/// are left untouched. When an error is returned the buffer contents are
/// unspecified and must not be read.
pub fn wigner_3jm<T: WignerFloat>(
    l1: T,
    l2: T,
    l3: T,
    m1: T,
    thrcof: &mut [T],
) -> Result<M2Range<T>, Error> {
    let (min, max) = algo::rc3jm::rc3jm(l1, l2, l3, m1, thrcof)?;
    Ok(M2Range { min, max })
}

/// Legendre polynomials `P_l(x)` for `l = lmin, ..., lmax`, as a vector.
///
/// Requires `0 <= lmin <= lmax`.
#[cfg(feature = "alloc")]
pub fn legendre_pl_seq<T: WignerFloat>(lmin: i32, lmax: i32, x: T) -> Vec<T> {
    debug_assert!(lmin <= lmax);
    let n = (lmax - lmin + 1).max(0) as usize;
    let mut p = vec![T::zero(); n];
    algo::dl::legendre_pl(lmin, x, &mut p);
    p
}

/// Wigner d-functions `d^l_{n,m}(θ)` for `l = lmin, ..., lmax`, as a vector.
///
/// Requires `0 <= lmin <= lmax`.
#[cfg(feature = "alloc")]
pub fn wigner_dl_seq<T: WignerFloat>(lmin: i32, lmax: i32, n: i32, m: i32, theta: T) -> Vec<T> {
    debug_assert!(lmin <= lmax);
    let len = (lmax - lmin + 1).max(0) as usize;
    let mut d = vec![T::zero(); len];
    algo::dl::wigner_dl(lmin, n, m, theta, &mut d);
    d
}

/// 3j symbols over the admissible `m2` range, as an owned sequence.
///
/// Queries the range, allocates the exact buffer, and fills it.
#[cfg(feature = "alloc")]
pub fn wigner_3jm_seq<T: WignerFloat>(
    l1: T,
    l2: T,
    l3: T,
    m1: T,
) -> Result<ThreeJmResult<T>, Error> {
    let range = wigner_3jm_range(l1, l2, l3, m1)?;
    let mut values = vec![T::zero(); range.count()];
    wigner_3jm(l1, l2, l3, m1, &mut values)?;
    Ok(ThreeJmResult { range, values })
}
