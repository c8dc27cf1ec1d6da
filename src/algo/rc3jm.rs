//! Wigner 3j symbols over the range of the second projection quantum number.
//!
//! Port of SLATEC DRC3JM (Gordon & Schulten). Evaluates the 3j symbol
//!
//! ```text
//! g(m2) = ( l1  l2    l3    )
//!         ( m1  m2  -m1-m2  )
//! ```
//!
//! for every admissible `m2`, the other parameters held fixed. The sequence
//! is generated by a three-term recurrence with scaling to control overflow.
//! Both forward and backward recurrence are used to maintain numerical
//! stability; the two passes are matched at an interior point and normalized
//! from the unitary property of the 3j coefficients and Wigner's phase
//! convention.
//!
//! The admissibility restrictions are weaker than the conventional
//! integer-or-half-integer ones; see Schulten & Gordon, J Math Phys 16
//! (1975) 1961, and Comput Phys Commun 11 (1976) 269.

use crate::machine::{WignerFloat, QN_EPS};
use crate::types::Error;
use crate::utils::phase;

/// True when `x` is not an integer within the quantum-number tolerance.
///
/// For the slightly negative `x` the eps slack of the earlier checks can
/// admit, the fractional part is negative and the test passes; such values
/// are caught by the range check that follows.
fn non_integer<T: WignerFloat>(x: T, eps: T) -> bool {
    (x + eps).fract() >= eps + eps
}

/// Admissible range `(m2min, m2max)` of the second projection quantum
/// number, after the admissibility checks 1-5.
///
/// This is the capacity-query half of the evaluation: callers size their
/// output buffer from the returned range, then fill it with [`rc3jm`].
pub(crate) fn m2_range<T: WignerFloat>(l1: T, l2: T, l3: T, m1: T) -> Result<(T, T), Error> {
    let zero = T::zero();
    let eps = T::from_f64(QN_EPS);

    if l1 - m1.abs() + eps < zero || non_integer(l1 + m1.abs(), eps) {
        return Err(Error::M1OutOfRange);
    }

    if l1 + l2 - l3 < -eps || l1 - l2 + l3 < -eps || -l1 + l2 + l3 < -eps {
        return Err(Error::TriangleViolation);
    }

    if non_integer(l1 + l2 + l3, eps) {
        return Err(Error::NonIntegerSum);
    }

    let m2min = (-l2).max(-l3 - m1);
    let m2max = l2.min(l3 - m1);

    if non_integer(m2max - m2min, eps) {
        return Err(Error::NonIntegerRange);
    }

    if m2min >= m2max + eps {
        return Err(Error::EmptyRange);
    }

    Ok((m2min, m2max))
}

/// Evaluate the 3j symbol for every admissible `m2`.
///
/// Fills `thrcof[i]` with `g(m2min + i)` for `i = 0, ..., m2max-m2min` and
/// returns the range. `thrcof` must hold at least `m2max-m2min+1` entries;
/// entries beyond that count are left untouched. On error nothing useful is
/// in the buffer.
///
/// Equivalent to Fortran DRC3JM in SLATEC.
pub(crate) fn rc3jm<T: WignerFloat>(
    l1: T,
    l2: T,
    l3: T,
    m1: T,
    thrcof: &mut [T],
) -> Result<(T, T), Error> {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let eps = T::from_f64(QN_EPS);

    let (m2min, m2max) = m2_range(l1, l2, l3, m1)?;

    let huge = T::huge();
    let srhuge = T::srhuge();
    let tiny = T::tiny();
    let srtiny = T::srtiny();

    // Safety: checks 4 and 5 leave a near-integer value in [1-2*eps, inf),
    // far below the f64/f32 integer range in any admissible call.
    let nfin = (m2max - m2min + one + eps).to_usize().unwrap();
    if thrcof.len() < nfin {
        return Err(Error::BufferTooSmall);
    }

    // m2 can take only one value; the coefficient has a closed form.
    if m2min >= m2max - eps {
        thrcof[0] = phase((l2 - l3 - m1).abs() + eps) / (l1 + l2 + l3 + one).sqrt();
        return Ok((m2min, m2max));
    }

    // Forward recursion from m2 = m2min, seeded with srtiny so that many
    // growing steps stay inside the representable range.
    let mut m2 = m2min;
    thrcof[0] = srtiny;
    let mut newfac = zero;
    let mut c1 = zero;
    let mut sum1 = tiny;
    let mut sumfor = sum1;
    let mut x = srtiny;
    let mut lstep: usize = 1;
    let mut forward_only = false;

    loop {
        lstep += 1;
        m2 = m2 + one;
        let m3 = -m1 - m2;

        let c1old = c1.abs();
        let oldfac = newfac;
        let a1 = (l2 - m2 + one) * (l2 + m2) * (l3 + m3 + one) * (l3 - m3);
        newfac = a1.sqrt();

        let dv = (l1 + l2 + l3 + one) * (l2 + l3 - l1)
            - (l2 - m2 + one) * (l3 + m3 + one)
            - (l2 + m2 - one) * (l3 - m3 - one);

        c1 = -dv / newfac;

        if lstep == 2 {
            // At m2 = m2min + 1 the third term of the recursion vanishes.
            x = srtiny * c1;
            thrcof[1] = x;
            sum1 = sum1 + tiny * c1 * c1;
            if lstep == nfin {
                forward_only = true;
                break;
            }
        } else {
            let c2 = -oldfac / newfac;
            x = c1 * thrcof[lstep - 2] + c2 * thrcof[lstep - 3];
            thrcof[lstep - 1] = x;
            sumfor = sum1;
            sum1 = sum1 + x * x;
            if lstep == nfin {
                break;
            }

            // Rescale the series computed so far to prevent overflow;
            // entries already below srtiny carry no information and are
            // zeroed rather than divided.
            if x.abs() > srhuge {
                for q in thrcof[..lstep].iter_mut() {
                    *q = if q.abs() < srtiny { zero } else { *q / srhuge };
                }
                sum1 = sum1 / huge;
                sumfor = sumfor / huge;
                x = x / srhuge;
            }

            // As long as |c1| is decreasing, the recursion proceeds towards
            // increasing 3j values and is numerically stable. Once an
            // increase of |c1| is detected, the direction is reversed.
            if c1old <= c1.abs() {
                break;
            }
        }
    }

    let sumuni;
    if forward_only {
        // Two-value range: the forward pass covered everything and there is
        // nothing to match.
        sumuni = sum1;
    } else {
        // Keep the last three forward coefficients for comparison with the
        // backward recursion values at the same points.
        let x1 = x;
        let x2 = thrcof[lstep - 2];
        let x3 = thrcof[lstep - 3];
        let nstep2 = nfin - lstep + 3;

        // Backward recursion from m2 = m2max, taking nstep2 steps so the
        // passes overlap at three consecutive points.
        thrcof[nfin - 1] = srtiny;
        let mut sum2 = tiny;
        let mut sumbac = zero;
        let mut y = srtiny;
        m2 = m2max + two;
        let mut bstep: usize = 1;

        loop {
            bstep += 1;
            m2 = m2 - one;
            let m3 = -m1 - m2;

            let oldfac = newfac;
            let a1s = (l2 - m2 + two) * (l2 + m2 - one) * (l3 + m3 + two) * (l3 - m3 - one);
            newfac = a1s.sqrt();

            let dv = (l1 + l2 + l3 + one) * (l2 + l3 - l1)
                - (l2 - m2 + one) * (l3 + m3 + one)
                - (l2 + m2 - one) * (l3 - m3 - one);

            c1 = -dv / newfac;

            if bstep == 2 {
                // At m2 = m2max - 1 the third term of the recursion vanishes.
                y = srtiny * c1;
                thrcof[nfin - 2] = y;
                if bstep == nstep2 {
                    break;
                }
                sumbac = sum2;
                sum2 = sum2 + y * y;
            } else {
                let c2 = -oldfac / newfac;
                y = c1 * thrcof[nfin + 1 - bstep] + c2 * thrcof[nfin + 2 - bstep];

                // The terminal value is kept for matching, not stored.
                if bstep == nstep2 {
                    break;
                }

                thrcof[nfin - bstep] = y;
                sumbac = sum2;
                sum2 = sum2 + y * y;

                if y.abs() > srhuge {
                    for q in thrcof[nfin - bstep..nfin].iter_mut() {
                        *q = if q.abs() < srtiny { zero } else { *q / srhuge };
                    }
                    sum2 = sum2 / huge;
                    sumbac = sumbac / huge;
                }
            }
        }

        let y3 = y;
        let y2 = thrcof[nfin + 1 - bstep];
        let y1 = thrcof[nfin + 2 - bstep];

        // Least-squares ratio mapping the backward triplet onto the forward
        // triplet. The segment with the smaller magnitudes is the less
        // reliable one and is the one rescaled.
        let ratio = (x1 * y1 + x2 * y2 + x3 * y3) / (x1 * x1 + x2 * x2 + x3 * x3);
        let nlim = nfin - nstep2 + 1;

        if ratio.abs() >= one {
            for q in thrcof[..nlim].iter_mut() {
                *q = ratio * *q;
            }
            sumuni = ratio * ratio * sumfor + sumbac;
        } else {
            let ratio = one / ratio;
            for q in thrcof[nlim..nfin].iter_mut() {
                *q = ratio * *q;
            }
            sumuni = sumfor + ratio * ratio * sumbac;
        }
    }

    // The unitary property of the 3j coefficients fixes the overall scale;
    // the sign of the last coefficient fixes the overall phase.
    let mut cnorm = one / ((l1 + l1 + one) * sumuni).sqrt();
    let sign1 = one.copysign(thrcof[nfin - 1]);
    let sign2 = phase((l2 - l3 - m1).abs() + eps);
    if sign1 * sign2 < zero {
        cnorm = -cnorm;
    }

    if cnorm.abs() < one {
        let thresh = tiny / cnorm.abs();
        for q in thrcof[..nfin].iter_mut() {
            *q = if q.abs() < thresh { zero } else { cnorm * *q };
        }
    } else {
        for q in thrcof[..nfin].iter_mut() {
            *q = cnorm * *q;
        }
    }

    Ok((m2min, m2max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unitarity<T: WignerFloat>(l1: T, values: &[T]) -> T {
        let mut s = T::zero();
        for v in values {
            s = s + *v * *v;
        }
        (l1 + l1 + T::one()) * s
    }

    #[test]
    fn range_query() {
        let (m2min, m2max) = m2_range(1.0_f64, 1.0, 1.0, 0.0).unwrap();
        assert_eq!(m2min, -1.0);
        assert_eq!(m2max, 1.0);
        let (m2min, m2max) = m2_range(10.0_f64, 7.0, 5.0, 3.0).unwrap();
        assert_eq!(m2min, -7.0); // max(-7, -8)
        assert_eq!(m2max, 2.0); // min(7, 2)
    }

    #[test]
    fn error_m1_out_of_range() {
        // |m1| > l1
        assert_eq!(m2_range(1.0_f64, 2.0, 2.0, 2.0), Err(Error::M1OutOfRange));
        // l1 + |m1| non-integer
        assert_eq!(m2_range(1.5_f64, 1.0, 1.0, 0.0), Err(Error::M1OutOfRange));
    }

    #[test]
    fn error_triangle_violation() {
        assert_eq!(
            m2_range(1.0_f64, 1.0, 5.0, 0.0),
            Err(Error::TriangleViolation)
        );
    }

    #[test]
    fn error_non_integer_sum() {
        assert_eq!(m2_range(1.0_f64, 1.0, 1.5, 0.0), Err(Error::NonIntegerSum));
    }

    #[test]
    fn error_non_integer_range() {
        // m2max - m2min = 1.5 while l1+l2+l3 = 5 is integral
        assert_eq!(
            m2_range(2.0_f64, 0.75, 2.25, 0.0),
            Err(Error::NonIntegerRange)
        );
    }

    #[test]
    fn error_empty_range() {
        // Reachable only through the eps slack of the earlier checks:
        // m2min = -1, m2max = l3 - m1 = -1.0125.
        assert_eq!(
            m2_range(2.0_f64, 1.0, 0.9925, 2.005),
            Err(Error::EmptyRange)
        );
    }

    #[test]
    fn error_buffer_too_small() {
        let mut buf = [0.0_f64; 2];
        assert_eq!(
            rc3jm(1.0, 1.0, 1.0, 0.0, &mut buf),
            Err(Error::BufferTooSmall)
        );
    }

    #[test]
    fn degenerate_single_value() {
        // (5 0 5; 2 0 -2) = (-1)^(5-2)/sqrt(11)
        let mut buf = [0.0_f64; 1];
        let (m2min, m2max) = rc3jm(5.0, 0.0, 5.0, 2.0, &mut buf).unwrap();
        assert_eq!(m2min, 0.0);
        assert_eq!(m2max, 0.0);
        assert!((buf[0] - (-1.0 / 11.0_f64.sqrt())).abs() < 1e-15);
    }

    #[test]
    fn table_one_one_one() {
        // (1 1 1; 0 m2 -m2) = [-1/√6, 0, 1/√6]
        let mut buf = [0.0_f64; 3];
        rc3jm(1.0, 1.0, 1.0, 0.0, &mut buf).unwrap();
        let r6 = 1.0 / 6.0_f64.sqrt();
        assert!((buf[0] + r6).abs() < 1e-14);
        assert!(buf[1].abs() < 1e-14);
        assert!((buf[2] - r6).abs() < 1e-14);
    }

    #[test]
    fn table_two_one_one() {
        // (2 1 1; 0 m2 -m2) = [1/√30, √(2/15), 1/√30]
        let mut buf = [0.0_f64; 3];
        rc3jm(2.0, 1.0, 1.0, 0.0, &mut buf).unwrap();
        assert!((buf[0] - 1.0 / 30.0_f64.sqrt()).abs() < 1e-14);
        assert!((buf[1] - (2.0 / 15.0_f64).sqrt()).abs() < 1e-14);
        assert!((buf[2] - 1.0 / 30.0_f64.sqrt()).abs() < 1e-14);
    }

    #[test]
    fn table_two_two_two() {
        // (2 2 2; 1 m2 -1-m2) for m2 = -2..1:
        // [-√(3/35), √(1/70), √(1/70), -√(3/35)]
        let mut buf = [0.0_f64; 4];
        let (m2min, m2max) = rc3jm(2.0, 2.0, 2.0, 1.0, &mut buf).unwrap();
        assert_eq!(m2min, -2.0);
        assert_eq!(m2max, 1.0);
        let a = (3.0_f64 / 35.0).sqrt();
        let b = (1.0_f64 / 70.0).sqrt();
        assert!((buf[0] + a).abs() < 1e-14);
        assert!((buf[1] - b).abs() < 1e-14);
        assert!((buf[2] - b).abs() < 1e-14);
        assert!((buf[3] + a).abs() < 1e-14);
    }

    #[test]
    fn unitarity_and_phase_convention() {
        let mut buf = [0.0_f64; 10];
        let (m2min, m2max) = rc3jm(10.0, 7.0, 5.0, 3.0, &mut buf).unwrap();
        assert_eq!(m2min, -7.0);
        assert_eq!(m2max, 2.0);
        assert!((unitarity(10.0, &buf) - 1.0).abs() < 1e-12);
        // Sign of the last coefficient follows (-1)^|l2-l3-m1| = (-1)^1.
        assert!(buf[9] < 0.0);
    }

    #[test]
    fn large_quantum_numbers_stay_finite() {
        // Long recursion with rescaling; normalized output must be clean.
        let mut buf = [0.0_f64; 401];
        rc3jm(200.0, 200.0, 200.0, 0.0, &mut buf).unwrap();
        for v in &buf {
            assert!(v.is_finite());
            assert!(v.abs() <= 1.0);
        }
        assert!((unitarity(200.0, &buf[..]) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn half_integer_arguments() {
        // The weaker-than-conventional restrictions admit this set; see the
        // DRC3JM prologue example (0.75 1.5 1.75; 0.25).
        let mut buf = [0.0_f64; 4];
        let (m2min, m2max) = rc3jm(0.75, 1.5, 1.75, 0.25, &mut buf).unwrap();
        assert_eq!(m2min, -1.5);
        assert_eq!(m2max, 1.5);
        for v in &buf {
            assert!(v.is_finite());
            assert!(*v != 0.0);
        }
    }

    #[test]
    fn two_value_range_skips_matching() {
        // l1 = l2 = l3 = 1/2 is inadmissible; the smallest two-value case is
        // e.g. (1 1/2 1/2; 0): m2 = -1/2, 1/2.
        let mut buf = [0.0_f64; 2];
        let (m2min, m2max) = rc3jm(1.0, 0.5, 0.5, 0.0, &mut buf).unwrap();
        assert_eq!(m2min, -0.5);
        assert_eq!(m2max, 0.5);
        // (1 1/2 1/2; 0 ±1/2 ∓1/2) = 1/√6; the m2-reflection carries
        // (-1)^(l1+l2+l3) = +1, so both entries agree.
        let r6 = 1.0 / 6.0_f64.sqrt();
        assert!((buf[0] - r6).abs() < 1e-14);
        assert!((buf[1] - r6).abs() < 1e-14);
        assert!((unitarity(1.0, &buf[..]) - 1.0).abs() < 1e-13);
    }

    #[test]
    fn rc3jm_f32() {
        let mut buf = [0.0_f32; 3];
        rc3jm(1.0_f32, 1.0, 1.0, 0.0, &mut buf).unwrap();
        let r6 = 1.0 / 6.0_f32.sqrt();
        assert!((buf[0] + r6).abs() < 1e-6);
        assert!(buf[1].abs() < 1e-6);
        assert!((buf[2] - r6).abs() < 1e-6);
    }
}
