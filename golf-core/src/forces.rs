//! Physical forces acting on the ball.
//!
//! In flight the ball feels wind, lift (Magnus effect), drag, and gravity;
//! on the ground it feels a constant-magnitude rolling friction. Lift and
//! drag use coefficients from the lookup table in [`crate::coefficients`].
//!
//! ```text
//! Backspin (axis ⟂ velocity, pointing cross-range):
//!     ↑ lift = C · |ω̂ × v| · (ω̂ × v)
//!     Ball "floats" and carries further
//!
//! Drag always points against the air-speed vector:
//!     v_air = v_ball − v_wind
//! ```
//!
//! The lift magnitude scales with the norm of the cross product itself
//! rather than the velocity norm. That is a calibrated simplification the
//! coefficient table was fit against; keep it.

use crate::types::{constants, Vec3, Wind};

/// Aerodynamic force model for one ball.
///
/// The enable flags exist for testing: stubbing lift/drag to zero turns
/// the flight into plain ballistics with a known closed form.
pub struct FlightForces {
    pub enable_wind: bool,
    pub enable_lift: bool,
    pub enable_drag: bool,
}

impl Default for FlightForces {
    fn default() -> Self {
        Self {
            enable_wind: true,
            enable_lift: true,
            enable_drag: true,
        }
    }
}

impl FlightForces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ballistics-only model (for testing).
    pub fn gravity_only() -> Self {
        Self {
            enable_wind: false,
            enable_lift: false,
            enable_drag: false,
        }
    }

    /// Wind vector felt by the ball at the given height, m/s.
    ///
    /// With the logarithmic profile enabled the nominal speed applies at
    /// the 10 m reference height and falls off toward the ground:
    ///
    /// v(h) = v_ref · ln(h / z0) / ln(h_ref / z0)
    ///
    /// Heights below the roughness length z0 are clamped up to it, which
    /// keeps the logarithm positive and finite at ground level.
    pub fn wind_force(&self, wind: &Wind, ball_height: f64) -> Vec3 {
        if !self.enable_wind {
            return Vec3::ZERO;
        }

        let mut wind_force = wind.velocity_ms();

        if wind.log_profile {
            let height = ball_height.max(constants::ROUGHNESS_LENGTH);
            let scale = (height / constants::ROUGHNESS_LENGTH).ln()
                / (constants::WIND_REFERENCE_HEIGHT / constants::ROUGHNESS_LENGTH).ln();
            wind_force = wind_force * scale;
        }

        wind_force
    }

    /// Magnus lift from spin, perpendicular to both the spin axis and the
    /// air-speed vector.
    pub fn lift_force(&self, air_velocity: Vec3, rotation_axis: Vec3, lift_coefficient: f64) -> Vec3 {
        if !self.enable_lift {
            return Vec3::ZERO;
        }

        let magnus = rotation_axis.cross(&air_velocity);
        magnus * (constants::LIFT_CONST * lift_coefficient * magnus.magnitude())
    }

    /// Quadratic drag opposing the air-speed vector.
    pub fn drag_force(&self, air_velocity: Vec3, drag_coefficient: f64) -> Vec3 {
        if !self.enable_drag {
            return Vec3::ZERO;
        }

        air_velocity * (constants::DRAG_CONST * drag_coefficient * air_velocity.magnitude())
    }
}

/// Rolling friction from the turf: constant magnitude, opposing the unit
/// velocity. Coulomb friction for rolling, not sliding — the (5/7) factor
/// folds in the rotational inertia of a rolling solid sphere.
pub fn friction_force(velocity: Vec3, rolling_friction: f64) -> Vec3 {
    let direction = -velocity.normalized();
    let magnitude = (5.0 / 7.0) * rolling_friction * constants::BALL_WEIGHT.magnitude();
    direction * magnitude
}

// =============================================================================
// Tests
// =============================================================================
