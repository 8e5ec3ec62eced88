//! Aerodynamic coefficient model.
//!
//! Measured drag/lift data for a golf ball is not a smooth function of
//! speed and spin, so rather than fit a curve we carry a calibrated step
//! table: 10 air-speed² rows by 7 spin-rate columns of (drag, lift) pairs.
//! Rows are indexed by the *square* of the air speed so the hot path never
//! takes a square root.
//!
//! Buckets are half-open with strict greater-than comparisons, scanned from
//! the top edge down; anything above the last edge clamps into the highest
//! bucket. The edge values are part of the calibration and must not change.

/// (drag, lift) coefficient pairs, rows = air-speed² buckets,
/// columns = spin-rate buckets.
#[rustfmt::skip]
static DRAG_AND_LIFT_COEFFICIENTS: [[(f64, f64); 7]; 10] = [
    [(0.52, -0.11), (0.39, -0.06), (0.36, 0.06), (0.42, 0.35), (0.40, 0.39), (0.48, 0.41), (0.52, 0.49)],
    [(0.33,  0.00), (0.25,  0.12), (0.28, 0.18), (0.36, 0.33), (0.38, 0.36), (0.43, 0.38), (0.45, 0.45)],
    [(0.22,  0.06), (0.24,  0.17), (0.27, 0.24), (0.31, 0.29), (0.34, 0.33), (0.37, 0.34), (0.39, 0.39)],
    [(0.23,  0.07), (0.23,  0.14), (0.25, 0.19), (0.28, 0.24), (0.30, 0.28), (0.33, 0.31), (0.36, 0.35)],
    [(0.24,  0.07), (0.24,  0.13), (0.25, 0.16), (0.27, 0.20), (0.28, 0.24), (0.30, 0.27), (0.34, 0.31)],
    [(0.24,  0.07), (0.24,  0.12), (0.25, 0.15), (0.26, 0.18), (0.26, 0.21), (0.29, 0.24), (0.32, 0.28)],
    [(0.25,  0.08), (0.25,  0.12), (0.25, 0.14), (0.26, 0.17), (0.26, 0.19), (0.28, 0.22), (0.29, 0.26)],
    [(0.25,  0.08), (0.25,  0.12), (0.25, 0.14), (0.26, 0.16), (0.26, 0.18), (0.28, 0.20), (0.29, 0.23)],
    [(0.25,  0.07), (0.25,  0.11), (0.25, 0.13), (0.26, 0.15), (0.26, 0.17), (0.27, 0.18), (0.28, 0.22)],
    [(0.24,  0.07), (0.24,  0.11), (0.25, 0.13), (0.26, 0.15), (0.26, 0.16), (0.27, 0.17), (0.27, 0.20)],
];

/// Row edges: air speed squared, (m/s)²
static AIR_SPEED_SQ_EDGES: [f64; 9] = [
    338.0, 705.0, 1226.0, 1874.0, 2654.0, 3588.0, 4698.0, 5939.0, 7249.0,
];

/// Column edges: spin rate, rpm
static SPIN_RATE_EDGES: [f64; 6] = [500.0, 1433.0, 2340.0, 3283.0, 4223.0, 5478.0];

/// Highest bucket whose edge the value strictly exceeds; 0 if none.
fn bucket(value: f64, edges: &[f64]) -> usize {
    edges
        .iter()
        .rposition(|&edge| value > edge)
        .map_or(0, |i| i + 1)
}

/// Look up (drag, lift) coefficients for the given air speed squared and
/// spin rate in rpm. Pure: same inputs always hit the same table cell.
pub fn drag_and_lift_coefficients(air_speed_squared: f64, spin_rate: f64) -> (f64, f64) {
    let row = bucket(air_speed_squared, &AIR_SPEED_SQ_EDGES);
    let col = bucket(spin_rate, &SPIN_RATE_EDGES);
    DRAG_AND_LIFT_COEFFICIENTS[row][col]
}

/// Coefficient of restitution as a function of the normal impact speed.
///
/// Quadratic inside the calibrated domain (≤ 20 m/s), floored at 0.12
/// above it rather than extrapolated: the quadratic turns back up outside
/// its fit range.
pub fn restitution(normal_impact_speed: f64) -> f64 {
    if normal_impact_speed <= 20.0 {
        0.51 - 0.0375 * normal_impact_speed
            + 0.000903 * (normal_impact_speed * normal_impact_speed)
    } else {
        0.12
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_pure() {
        let a = drag_and_lift_coefficients(2000.0, 3000.0);
        let b = drag_and_lift_coefficients(2000.0, 3000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lowest_bucket() {
        // Slow, low spin: top-left cell
        assert_eq!(drag_and_lift_coefficients(100.0, 100.0), (0.52, -0.11));
    }

    #[test]
    fn test_highest_bucket_clamps() {
        // Far above the top edges: bottom-right cell
        assert_eq!(drag_and_lift_coefficients(1e6, 1e5), (0.27, 0.20));
    }

    #[test]
    fn test_row_boundary_is_strict() {
        // Comparisons are strict greater-than: a value exactly on the edge
        // stays in the bucket below it.
        let on_edge = drag_and_lift_coefficients(338.0, 0.0);
        let above_edge = drag_and_lift_coefficients(338.0 + 1e-9, 0.0);
        assert_eq!(on_edge, DRAG_AND_LIFT_COEFFICIENTS[0][0]);
        assert_eq!(above_edge, DRAG_AND_LIFT_COEFFICIENTS[1][0]);
    }

    #[test]
    fn test_column_boundary_is_strict() {
        let on_edge = drag_and_lift_coefficients(0.0, 500.0);
        let above_edge = drag_and_lift_coefficients(0.0, 500.0 + 1e-9);
        assert_eq!(on_edge, DRAG_AND_LIFT_COEFFICIENTS[0][0]);
        assert_eq!(above_edge, DRAG_AND_LIFT_COEFFICIENTS[0][1]);
    }

    #[test]
    fn test_all_interior_row_edges() {
        for (i, &edge) in AIR_SPEED_SQ_EDGES.iter().enumerate() {
            let just_above = drag_and_lift_coefficients(edge + 1e-6, 0.0);
            assert_eq!(
                just_above,
                DRAG_AND_LIFT_COEFFICIENTS[i + 1][0],
                "edge {edge} should select row {}",
                i + 1
            );
        }
    }

    #[test]
    fn test_restitution_quadratic_region() {
        // At 10 m/s: 0.51 - 0.375 + 0.0903 = 0.2253
        assert!((restitution(10.0) - 0.2253).abs() < 1e-9);
        // At rest the quadratic gives its maximum
        assert!((restitution(0.0) - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_restitution_floor() {
        assert_eq!(restitution(25.0), 0.12);
        assert_eq!(restitution(100.0), 0.12);
    }

    #[test]
    fn test_restitution_continuity_near_cutoff() {
        // The quadratic at exactly 20 m/s: 0.51 - 0.75 + 0.3612 = 0.1212,
        // close to the 0.12 floor used above it.
        assert!((restitution(20.0) - 0.1212).abs() < 1e-9);
    }
}
