//! Core types for the physics simulation.
//!
//! All units are SI unless a field name says otherwise:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Spin rate: revolutions per minute (rpm) in stored state,
//!   radians per second (rad/s) inside the impact model
//! - Force: Newtons (N)
//!
//! Wind speed is the one deliberate exception: it is stored in mph because
//! that is the unit the caller adjusts it in, and converted on every read.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::units::{deg_to_rad, mph_to_ms};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, forces, and rotation axes.
///
/// Coordinate system:
/// - X: horizontal, downrange (positive toward the target)
/// - Y: horizontal, cross-range
/// - Z: vertical (positive upward; the ground plane is z = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// World up, the ground-plane normal.
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons and table lookups)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is
    /// (near) zero. Callers that divide by the result must check for zero.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Horizontal (x-y plane) squared speed, used for the roll/rest cutoff
    pub fn horizontal_magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Ball
// =============================================================================

/// Complete state of one ball.
///
/// Spin is stored as a scalar rate (rpm) plus a unit rotation axis rather
/// than a single angular-velocity vector, because the aerodynamic table is
/// indexed by the scalar rate and the rate decays independently of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,

    /// Unit spin axis (right-hand rule)
    pub rotation_axis: Vec3,

    /// Instantaneous spin rate in rpm, decayed from `launch_spin_rate`
    pub current_spin_rate: f64,
    /// Reference spin rate (rpm) at the start of the current flight segment
    pub launch_spin_rate: f64,
    /// Seconds since the start of the current flight segment.
    /// Resets at every bounce: spin decay is relative to the segment, not
    /// the whole shot.
    pub elapsed_time: f64,

    /// Apex of the current flight segment, latched when vz first turns
    /// negative. Decides bounce vs. settle on the next ground contact.
    pub max_height: f64,
    pub max_height_reached: bool,

    /// Terminal ground regime: once set, the aerial force pipeline is
    /// skipped for good.
    pub is_rolling: bool,

    /// Force accumulator, cleared after each integration step
    pub sum_forces: Vec3,

    // Last computed per-force contributions, kept for diagnostics display.
    pub wind_force: Vec3,
    pub lift_force: Vec3,
    pub drag_force: Vec3,
}

impl Ball {
    pub fn new(position: Vec3, velocity: Vec3, rotation_axis: Vec3, spin_rate: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            rotation_axis,
            current_spin_rate: spin_rate,
            launch_spin_rate: spin_rate,
            elapsed_time: 0.0,
            max_height: position.z,
            max_height_reached: false,
            is_rolling: false,
            sum_forces: Vec3::ZERO,
            wind_force: Vec3::ZERO,
            lift_force: Vec3::ZERO,
            drag_force: Vec3::ZERO,
        }
    }

    /// True once the ball is rolling and has decelerated below the rest
    /// threshold.
    pub fn is_at_rest(&self) -> bool {
        self.is_rolling
            && self.velocity.horizontal_magnitude_squared() < constants::MIN_ROLL_SPEED_SQUARED
    }
}

/// Stable index of a ball in the simulation's arena.
///
/// Handles stay valid until [`clear`](crate::simulation::Simulation::clear);
/// balls are never removed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BallHandle(pub(crate) usize);

impl BallHandle {
    /// Rebuild a handle from a raw index, e.g. one round-tripped through
    /// a bindings layer. The caller is responsible for its validity.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

// =============================================================================
// Wind
// =============================================================================

/// Shared wind context, read by every ball's force computation each step.
///
/// The caller may mutate it freely between steps; there is no snapshotting,
/// so a change takes effect on the very next step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed in mph (UI units; converted to m/s on every read)
    pub speed_mph: f64,
    /// Direction the wind blows toward, radians from the +X axis
    pub direction_rad: f64,
    /// Scale the wind with height using the logarithmic profile instead of
    /// applying it uniformly
    pub log_profile: bool,
}

impl Wind {
    pub fn new(speed_mph: f64, direction_rad: f64, log_profile: bool) -> Self {
        Self {
            speed_mph,
            direction_rad,
            log_profile,
        }
    }

    pub fn calm() -> Self {
        Self::new(0.0, 0.0, false)
    }

    /// Horizontal wind vector at the reference height, in m/s.
    /// The wind never has a vertical component.
    pub fn velocity_ms(&self) -> Vec3 {
        let speed = mph_to_ms(self.speed_mph);
        Vec3::new(
            speed * self.direction_rad.cos(),
            speed * self.direction_rad.sin(),
            0.0,
        )
    }
}

impl Default for Wind {
    fn default() -> Self {
        Self::calm()
    }
}

// =============================================================================
// Launch Parameters
// =============================================================================

/// Launch conditions in the units the user adjusts them in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    pub speed_mph: f64,
    pub launch_angle_deg: f64,
    /// Positive heading aims right of the target line
    pub heading_deg: f64,
    pub spin_rate_rpm: f64,
    /// Tilt of the spin axis away from pure backspin; nonzero values
    /// produce draw/fade curvature
    pub spin_axis_deg: f64,
    pub tee_height: f64,
}

impl LaunchParams {
    /// Initial world position of the ball.
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.tee_height)
    }

    /// Initial velocity vector from speed, launch angle, and heading.
    pub fn velocity(&self) -> Vec3 {
        let speed = mph_to_ms(self.speed_mph);
        let angle = deg_to_rad(self.launch_angle_deg);
        // Heading is negated so positive slider values aim right.
        let heading = -deg_to_rad(self.heading_deg);
        Vec3::new(
            speed * angle.cos() * heading.cos(),
            speed * angle.cos() * heading.sin(),
            speed * angle.sin(),
        )
    }

    /// 3D rotation axis from the heading and the 2D spin-axis tilt.
    ///
    /// At zero tilt and zero heading this is (0, -1, 0): pure backspin for a
    /// ball flying along +X.
    pub fn rotation_axis(&self) -> Vec3 {
        let heading = -deg_to_rad(self.heading_deg);
        let tilt = deg_to_rad(self.spin_axis_deg);
        Vec3::new(
            tilt.cos() * heading.sin(),
            -tilt.cos() * heading.cos(),
            tilt,
        )
    }
}

impl Default for LaunchParams {
    fn default() -> Self {
        // A representative driver shot.
        Self {
            speed_mph: 167.0,
            launch_angle_deg: 10.9,
            heading_deg: 0.0,
            spin_rate_rpm: 2600.0,
            spin_axis_deg: 0.0,
            tee_height: constants::TEE_HEIGHT,
        }
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    use super::Vec3;

    /// Golf ball radius (m)
    pub const BALL_RADIUS: f64 = 0.0213;

    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Ball weight vector: mass (0.0459 kg) times gravity
    pub const BALL_WEIGHT: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: -0.450279,
    };

    /// 1 / ball mass (kg⁻¹)
    pub const INV_BALL_MASS: f64 = 21.77226213803614;

    /// Lift/drag force scale: 0.5 times the ball reference area
    /// (0.001425 m²) times the air density (1.2 kg/m³)
    pub const LIFT_CONST: f64 = 8.551855026042919e-4;

    /// Negated for drag, which opposes the air-speed vector
    pub const DRAG_CONST: f64 = -8.551855026042919e-4;

    /// Aerodynamic roughness length of the ground (m); wind heights are
    /// clamped up to this to keep the log profile finite and positive
    pub const ROUGHNESS_LENGTH: f64 = 0.4;

    /// Height at which the nominal wind speed applies (m)
    pub const WIND_REFERENCE_HEIGHT: f64 = 10.0;

    /// Time constant of exponential spin decay (s)
    pub const SPIN_DECAY_RATE: f64 = 24.5;

    /// Flight-segment apex below which a ground contact settles into a
    /// roll instead of bouncing (m)
    pub const MIN_BOUNCE_HEIGHT: f64 = 0.005;

    /// Squared horizontal speed below which a rolling ball stops (m²/s²)
    pub const MIN_ROLL_SPEED_SQUARED: f64 = 1e-4;

    /// Default tee height (m), 1.5 inches
    pub const TEE_HEIGHT: f64 = 0.0381;

    /// Small value for floating-point guards
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
