//! Degree recursion for Legendre polynomials and Wigner d-functions.
//!
//! Both sequences advance through the same kind of three-term recurrence in
//! the angular-momentum degree `l`. The Legendre recursion starts from the
//! exact seeds `P_0 = 1`, `P_1 = x`; the d-function recursion starts from a
//! closed-form seed at the pivot degree `l_p = max(|n|, |m|)`, below which
//! the function vanishes identically.

use crate::machine::WignerFloat;
use crate::utils::{binom, phase};

/// Legendre polynomials `P_l(x)` for `l = lmin, ..., lmin + p.len() - 1`.
///
/// The recurrence `l·P_l = (2l-1)·x·P_{l-1} - (l-1)·P_{l-2}` needs the two
/// preceding values, so it always runs from degree 0; degrees below `lmin`
/// are computed and discarded.
///
/// Requires `lmin >= 0`; there is no run-time error surface.
pub(crate) fn legendre_pl<T: WignerFloat>(lmin: i32, x: T, p: &mut [T]) {
    debug_assert!(lmin >= 0);
    let one = T::one();

    // p1 = P_{lmin}, p2 = P_{lmin+1} after the warm-up loop
    let mut p1 = one;
    let mut p2 = x;
    for l in 2..lmin + 2 {
        let lf = T::from_f64(f64::from(l));
        let p0 = p1;
        p1 = p2;
        p2 = ((lf + lf - one) * x * p1 - (lf - one) * p0) / lf;
    }

    if let Some(q) = p.get_mut(0) {
        *q = p1;
    }
    if let Some(q) = p.get_mut(1) {
        *q = p2;
    }
    for i in 2..p.len() {
        let lf = T::from_f64(f64::from(lmin + i as i32));
        p[i] = ((lf + lf - one) * x * p[i - 1] - (lf - one) * p[i - 2]) / lf;
    }
}

/// Wigner d-functions `d^l_{n,m}(θ)` for `l = lmin, ..., lmin + d.len() - 1`.
///
/// For `n = m = 0` the d-function reduces to the Legendre polynomial at
/// `cos θ` and the evaluation is delegated. Otherwise the seed at the pivot
/// degree is
///
/// ```text
/// d^{l_p}_{n,m} = (-1)^c · sqrt(C(a+b, a)) · sin(θ/2)^a · cos(θ/2)^b
/// ```
///
/// with `(l_p, a, b, c)` selected from the signs and relative magnitudes of
/// `n` and `m`, and higher degrees follow from the three-term recurrence
///
/// ```text
/// d^l = (l·x - nm/(l-1))·sqrt((1-u')(1-v'))·d^{l-1}
///       - (1 + 1/(l-1))·sqrt(u'·v')·d^{l-2}
/// ```
///
/// where `x = cos θ` and `u' = (1-1/(l-n))(1-1/(l+n))`,
/// `v' = (1-1/(l-m))(1-1/(l+m))` are recomputed each step.
///
/// Requires `lmin >= 0`; there is no run-time error surface.
pub(crate) fn wigner_dl<T: WignerFloat>(lmin: i32, n: i32, m: i32, theta: T, d: &mut [T]) {
    debug_assert!(lmin >= 0);
    if d.is_empty() {
        return;
    }
    if n == 0 && m == 0 {
        legendre_pl(lmin, theta.cos(), d);
        return;
    }

    let zero = T::zero();
    let one = T::one();
    let lmax = lmin + (d.len() as i32 - 1);

    // Pivot degree and seed exponents. The four branches are exact; the
    // seed sign (-1)^c differs between them even where a and b agree.
    let (lp, a, b, c) = if n.abs() > m.abs() {
        if n > 0 {
            (n, n - m, n + m, n - m)
        } else {
            (-n, m - n, -n - m, 0)
        }
    } else if m > 0 {
        (m, m - n, n + m, 0)
    } else {
        (-m, n - m, -n - m, n - m)
    };

    let u = (T::from_f64(0.5) * theta).sin();
    let v = (T::from_f64(0.5) * theta).cos();
    let x = v * v - u * u;

    let mut d0 = phase(T::from_f64(f64::from(c)))
        * T::from_f64(binom((a + b) as u64, a as u64) as f64).sqrt()
        * u.powi(a)
        * v.powi(b);
    let mut d1 = zero;

    // Degrees below the pivot are identically zero.
    let nzero = (lp - lmin).clamp(0, d.len() as i32) as usize;
    for q in d[..nzero].iter_mut() {
        *q = zero;
    }
    if lp >= lmin && lp <= lmax {
        d[(lp - lmin) as usize] = d0;
    }

    let nf = T::from_f64(f64::from(n));
    let mf = T::from_f64(f64::from(m));
    let j = nf * mf;
    for l in lp + 1..=lmax {
        let lf = T::from_f64(f64::from(l));
        let up = (one - (lf - nf).recip()) * (one - (lf + nf).recip());
        let vp = (one - (lf - mf).recip()) * (one - (lf + mf).recip());

        let d2 = d1;
        d1 = d0;
        d0 = (lf * x - j / (lf - one)) * ((one - up) * (one - vp)).sqrt() * d1
            - (one + (lf - one).recip()) * (up * vp).sqrt() * d2;

        if l >= lmin {
            d[(l - lmin) as usize] = d0;
        }
    }
}
