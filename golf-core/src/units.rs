//! Unit conversions and fast trigonometry.
//!
//! Launch and wind parameters arrive in user units (mph, degrees, rpm) and
//! are converted to SI at the edge of the physics. The conversions use
//! fixed constants rather than computed ratios so the results are
//! bit-identical everywhere.
//!
//! `fast_atan`/`fast_atan2` are polynomial approximations. The worst-case
//! error is about 4e-4 rad, at |x| = 1 where the reflected and direct
//! evaluations meet (roughly doubled through the atan2 half-angle
//! identity). The impact model evaluates an arctangent on every bounce;
//! the polynomial keeps that cheap and, unlike `f64::atan`, deterministic
//! across platforms and libm versions.

use std::f64::consts::PI;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * 0.017453293
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 57.295779513
}

pub fn mph_to_ms(mph: f64) -> f64 {
    mph * 0.44704
}

pub fn ms_to_mph(ms: f64) -> f64 {
    ms / 0.44704
}

/// rpm * (2π / 60)
pub fn rpm_to_rad_s(rpm: f64) -> f64 {
    rpm * 0.10471975511965977
}

/// rad/s * (60 / 2π)
pub fn rad_s_to_rpm(rad_s: f64) -> f64 {
    rad_s * 9.549296585513720146
}

// Minimax coefficients for atan on |x| < 1, odd powers only.
const A1: f64 = 0.9999991518;
const A3: f64 = -0.3329188436;
const A5: f64 = 0.1993941203;
const A7: f64 = -0.1387495263;
const A9: f64 = 0.0956061958;
const A11: f64 = -0.0548522460;
const A13: f64 = 0.0211605470;
const A15: f64 = -0.0038682211;

/// Horner evaluation of the odd polynomial, valid for |x| < 1.
fn atan_poly(x: f64) -> f64 {
    let x_sq = x * x;
    x * (A1
        + x_sq
            * (A3
                + x_sq
                    * (A5
                        + x_sq
                            * (A7 + x_sq * (A9 + x_sq * (A11 + x_sq * (A13 + x_sq * A15)))))))
}

/// Fast approximation of atan.
///
/// Inside the unit interval the polynomial is evaluated directly; outside,
/// atan(x) = ±π/2 − atan(1/x) reduces the argument back into it.
pub fn fast_atan(x: f64) -> f64 {
    if x.abs() < 1.0 {
        atan_poly(x)
    } else {
        let atan_recip = atan_poly(1.0 / x);
        let half_pi = if x < 0.0 { -0.5 * PI } else { 0.5 * PI };
        half_pi - atan_recip
    }
}

/// Fast approximation of atan2.
///
/// Zero components are resolved by exact quadrant checks; everything else
/// goes through the half-angle identity
/// atan2(y, x) = 2·atan(y / (√(x² + y²) + x)),
/// which stays finite for all remaining inputs.
pub fn fast_atan2(y: f64, x: f64) -> f64 {
    if x == 0.0 {
        return if y > 0.0 {
            0.5 * PI
        } else if y < 0.0 {
            -0.5 * PI
        } else {
            0.0
        };
    }
    if y == 0.0 {
        return if x > 0.0 { 0.0 } else { PI };
    }

    let r = (x * x + y * y).sqrt();
    2.0 * fast_atan(y / (r + x))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // The polynomial's intrinsic worst case is ~3.7e-4 rad at |x| = 1;
    // the half-angle identity roughly doubles it for atan2.
    const ATAN_TOL: f64 = 5e-4;
    const ATAN2_TOL: f64 = 1e-3;

    #[test]
    fn test_deg_rad_conversion() {
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-6);
        assert!((rad_to_deg(PI) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_mph_ms_conversion() {
        assert!((mph_to_ms(100.0) - 44.704).abs() < 1e-9);
        assert!((ms_to_mph(44.704) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rpm_round_trip() {
        for rpm in [1.0, 500.0, 2600.0, 12000.0] {
            let back = rad_s_to_rpm(rpm_to_rad_s(rpm));
            assert!(
                (back - rpm).abs() < 1e-9 * rpm,
                "round trip failed for {rpm}: {back}"
            );
        }
    }

    #[test]
    fn test_rpm_to_rad_s_value() {
        // 60 rpm is exactly 2π rad/s
        assert!((rpm_to_rad_s(60.0) - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_fast_atan_inside_unit_interval() {
        for x in [-0.99, -0.5, -0.1, 0.0, 0.1, 0.5, 0.99] {
            assert!(
                (fast_atan(x) - x.atan()).abs() < ATAN_TOL,
                "fast_atan({x}) off by more than {ATAN_TOL}"
            );
        }
    }

    #[test]
    fn test_fast_atan_outside_unit_interval() {
        for x in [-100.0, -10.0, -1.5, 1.5, 10.0, 100.0] {
            assert!(
                (fast_atan(x) - x.atan()).abs() < ATAN_TOL,
                "fast_atan({x}) off by more than {ATAN_TOL}"
            );
        }
    }

    #[test]
    fn test_fast_atan_error_bounded_across_range() {
        // Dense sweep including the |x| = 1 seam, where the error peaks.
        let mut max_err = 0.0_f64;
        let mut x = -10.0;
        while x <= 10.0 {
            max_err = max_err.max((fast_atan(x) - x.atan()).abs());
            x += 0.001;
        }
        assert!(
            max_err < ATAN_TOL,
            "worst-case fast_atan error {max_err} exceeds {ATAN_TOL}"
        );
        // The bound is tight: the seam error really is above 1e-4.
        assert!((fast_atan(1.0) - 1.0_f64.atan()).abs() > 1e-4);
    }

    #[test]
    fn test_fast_atan2_quadrants() {
        let cases = [
            (1.0, 1.0),
            (1.0, -1.0),
            (-1.0, -1.0),
            (-1.0, 1.0),
            (0.3, 2.0),
            (-5.0, 0.7),
        ];
        for (y, x) in cases {
            assert!(
                (fast_atan2(y, x) - y.atan2(x)).abs() < ATAN2_TOL,
                "fast_atan2({y}, {x}) off by more than {ATAN2_TOL}"
            );
        }
    }

    #[test]
    fn test_fast_atan2_axis_cases() {
        assert_eq!(fast_atan2(0.0, 0.0), 0.0);
        assert!((fast_atan2(1.0, 0.0) - 0.5 * PI).abs() < 1e-12);
        assert!((fast_atan2(-1.0, 0.0) + 0.5 * PI).abs() < 1e-12);
        assert!((fast_atan2(0.0, 1.0)).abs() < 1e-12);
        assert!((fast_atan2(0.0, -1.0) - PI).abs() < 1e-12);
    }
}
