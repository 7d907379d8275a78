//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Normalise an angle into the range [0, 2pi).
///
/// Uses `theta - 2pi * floor(theta / 2pi)` rather than the remainder operator so that negative
/// angles map to a non-negative result. Round-off which would land exactly on 2pi is folded back
/// into the range, so the result is always strictly less than 2pi.
pub fn normalize_angle<T>(theta: T) -> T
where
    T: Float + FloatConst
{
    let tau_t = T::PI() + T::PI();

    let mut norm = theta - tau_t * (theta / tau_t).floor();

    if norm < T::zero() {
        norm = norm + tau_t;
    }
    if norm >= tau_t {
        norm = norm - tau_t;
    }

    norm
}

/// Get the signed angular distance between two angles in the range of [0, 2pi].
///
/// This function will return the shortest signed distance between a and b accounting for wrapping
/// between 0 and 2pi.
pub fn get_ang_dist_2pi<T>(a: T, b: T) -> T
where
    T: Float + FloatConst
{
    let tau_t = T::PI() + T::PI();
    
    let c = rem_euclid(a - b, tau_t);
    let d = rem_euclid(b - a, tau_t);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
/// Use [`normalize_angle`] where the half-open range must hold.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_get_ang_dist_2pi() {
        assert_eq!(get_ang_dist_2pi(1f64, 2f64), 1f64);
        assert_eq!(get_ang_dist_2pi(2f64, 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU), 0f64);
        assert_eq!(get_ang_dist_2pi(TAU, 0f64), 0f64);
        assert_eq!(get_ang_dist_2pi(1f64, TAU), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU - 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(TAU - 1f64, 1f64), 2f64);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0f64), 0f64);
        assert_eq!(normalize_angle(TAU), 0f64);
        assert_eq!(normalize_angle(PI), PI);
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);

        // Tiny negative values must not round up to 2pi
        let tiny = normalize_angle(-f64::from_bits(1));
        assert!(tiny >= 0.0 && tiny < TAU);

        assert!((normalize_angle(-1f32) - (std::f32::consts::TAU - 1.0)).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn normalize_angle_in_range(theta in -1e6f64..1e6f64) {
            let norm = normalize_angle(theta);
            prop_assert!(norm >= 0.0);
            prop_assert!(norm < TAU);
        }

        #[test]
        fn normalize_angle_idempotent(theta in -1e6f64..1e6f64) {
            let norm = normalize_angle(theta);
            prop_assert_eq!(normalize_angle(norm), norm);
        }

        #[test]
        fn normalize_angle_same_direction(theta in -100f64..100f64) {
            let norm = normalize_angle(theta);
            prop_assert!((norm.sin() - theta.sin()).abs() < 1e-9);
            prop_assert!((norm.cos() - theta.cos()).abs() < 1e-9);
        }
    }
}
