//! Flight/bounce/roll state machine and the main simulation orchestrator.
//!
//! Every step, each ball is advanced through one of three regimes:
//!
//! ```text
//!            apex ≥ 5 mm: bounce, back to flight
//!           ┌──────────────┐
//!           ▼              │
//!        Flight ──── ground contact
//!           │              │
//!           │       apex < 5 mm
//!           ▼              ▼
//!         (air)         Rolling ──── |v|² < threshold ──── Rest
//! ```
//!
//! Flight runs the aerodynamic pipeline (wind → air speed → spin decay →
//! coefficient lookup → lift/drag/gravity) and integrates. Ground contact
//! either settles the ball into a roll or resolves an oblique bounce in a
//! local frame built from the impact velocity.
//!
//! Balls are independent: no inter-ball interaction, and the shared wind
//! context is read fresh each step, so the caller may retune it between
//! steps with no lag.

use crate::coefficients::{drag_and_lift_coefficients, restitution};
use crate::forces::{friction_force, FlightForces};
use crate::integrator::SemiImplicitEuler;
use crate::surfaces::SurfaceProperties;
use crate::types::{constants, Ball, BallHandle, LaunchParams, Vec3, Wind};
use crate::units::{fast_atan, rad_s_to_rpm, rpm_to_rad_s};

/// Spin rate after `elapsed` seconds of flight, decaying exponentially
/// from the segment's launch rate.
pub fn spin_rate_after(launch_spin_rate: f64, elapsed: f64) -> f64 {
    launch_spin_rate * (-elapsed / constants::SPIN_DECAY_RATE).exp()
}

/// The simulation: an arena of independent balls plus the shared wind and
/// surface context.
pub struct Simulation {
    balls: Vec<Ball>,
    /// Shared wind context; adjustable between steps, read every step.
    pub wind: Wind,
    /// Ground surface the balls bounce on and roll over.
    pub surface: SurfaceProperties,
    /// Aerodynamic force model (enable flags are test seams).
    pub forces: FlightForces,
}

impl Simulation {
    pub fn new(wind: Wind, surface: SurfaceProperties) -> Self {
        Self {
            balls: Vec::new(),
            wind,
            surface,
            forces: FlightForces::new(),
        }
    }

    /// Launch a ball from user-facing launch parameters.
    pub fn launch(&mut self, params: &LaunchParams) -> BallHandle {
        self.launch_state(
            params.position(),
            params.velocity(),
            params.rotation_axis(),
            params.spin_rate_rpm,
        )
    }

    /// Launch a ball from an explicit initial state.
    pub fn launch_state(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        rotation_axis: Vec3,
        spin_rate_rpm: f64,
    ) -> BallHandle {
        log::debug!(
            "launch: |v|={:.2} m/s, spin={:.0} rpm",
            velocity.magnitude(),
            spin_rate_rpm
        );
        self.balls
            .push(Ball::new(position, velocity, rotation_axis, spin_rate_rpm));
        BallHandle(self.balls.len() - 1)
    }

    /// Advance a single ball by one timestep.
    pub fn step(&mut self, handle: BallHandle, dt: f64) {
        step_ball(
            &mut self.balls[handle.0],
            dt,
            &self.wind,
            &self.surface,
            &self.forces,
        );
    }

    /// Advance every ball by one timestep. Balls are independent, so the
    /// result does not depend on iteration order.
    pub fn step_all(&mut self, dt: f64) {
        for ball in &mut self.balls {
            step_ball(ball, dt, &self.wind, &self.surface, &self.forces);
        }
    }

    pub fn ball(&self, handle: BallHandle) -> &Ball {
        &self.balls[handle.0]
    }

    /// Bounds-checked lookup for callers holding possibly-stale handles,
    /// e.g. a bindings layer whose handles outlive a `clear`.
    pub fn try_ball(&self, handle: BallHandle) -> Option<&Ball> {
        self.balls.get(handle.0)
    }

    pub fn ball_mut(&mut self, handle: BallHandle) -> &mut Ball {
        &mut self.balls[handle.0]
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Remove all balls. Existing handles become invalid.
    pub fn clear(&mut self) {
        self.balls.clear();
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Wind::calm(), SurfaceProperties::default())
    }
}

/// Advance one ball by one fixed timestep.
///
/// The regime checks run in a fixed order: the flight pipeline first (when
/// airborne and not rolling), then ground handling if the step ended at or
/// below the ground plane, so a bounce is resolved in the same step that
/// detects the crossing.
pub fn step_ball(
    ball: &mut Ball,
    dt: f64,
    wind: &Wind,
    surface: &SurfaceProperties,
    forces: &FlightForces,
) {
    if ball.position.z >= 0.0 && !ball.is_rolling {
        fly(ball, dt, wind, forces);
    }

    if ball.position.z <= 0.0 {
        ball.position.z = 0.0;

        // A flight segment that never cleared the minimum bounce height
        // settles straight into the rolling regime.
        if ball.max_height < constants::MIN_BOUNCE_HEIGHT {
            roll(ball, dt, surface);
        } else if !resolve_bounce(ball, surface) {
            // Degenerate impact (no usable normal component): skip the
            // impulse model and let the ball roll out.
            roll(ball, dt, surface);
        }
    }
}

/// Aerial force pipeline and integration for one step.
fn fly(ball: &mut Ball, dt: f64, wind: &Wind, forces: &FlightForces) {
    ball.wind_force = forces.wind_force(wind, ball.position.z);

    // The ball flies relative to the moving air mass.
    let air_speed = ball.velocity - ball.wind_force;

    ball.current_spin_rate = spin_rate_after(ball.launch_spin_rate, ball.elapsed_time);

    // Squared speed indexes the table directly; no sqrt on the hot path.
    let air_speed_squared = air_speed.magnitude_squared();
    let (drag_coefficient, lift_coefficient) =
        drag_and_lift_coefficients(air_speed_squared, ball.current_spin_rate);

    ball.lift_force = forces.lift_force(air_speed, ball.rotation_axis, lift_coefficient);
    ball.drag_force = forces.drag_force(air_speed, drag_coefficient);

    ball.sum_forces = ball.lift_force + ball.drag_force + constants::BALL_WEIGHT;

    SemiImplicitEuler::step(ball, dt);

    // Latch the apex of this flight segment the first time the ball starts
    // descending.
    if ball.velocity.z < 0.0 && !ball.max_height_reached {
        ball.max_height = ball.position.z;
        ball.max_height_reached = true;
    }

    ball.elapsed_time += dt;
}

/// Rolling regime: aerial forces are gone for good; constant-magnitude
/// friction decelerates the ball until it drops below the rest threshold.
fn roll(ball: &mut Ball, dt: f64, surface: &SurfaceProperties) {
    if !ball.is_rolling {
        log::debug!(
            "settle: rolling out at {:.2} m/s",
            ball.velocity.magnitude()
        );
    }
    ball.is_rolling = true;
    ball.acceleration = Vec3::ZERO;
    ball.wind_force = Vec3::ZERO;
    ball.lift_force = Vec3::ZERO;
    ball.drag_force = Vec3::ZERO;
    ball.position.z = 0.0;
    ball.velocity.z = 0.0;

    if ball.velocity.horizontal_magnitude_squared() > constants::MIN_ROLL_SPEED_SQUARED {
        ball.sum_forces = friction_force(ball.velocity, surface.rolling_friction);
        SemiImplicitEuler::step(ball, dt);
        // Friction must never push the ball below ground.
        ball.position.z = 0.0;
        ball.velocity.z = 0.0;
    }

    // Re-check after integrating: the step that crosses the rest threshold
    // zeroes the state immediately, so a ball reporting at-rest never
    // carries residual velocity or a stale spin rate.
    if ball.velocity.horizontal_magnitude_squared() <= constants::MIN_ROLL_SPEED_SQUARED {
        ball.velocity = Vec3::ZERO;
        ball.acceleration = Vec3::ZERO;
        ball.current_spin_rate = 0.0;
    }
}

/// Oblique-impact bounce resolution.
///
/// The 3D collision reduces to two 2D problems in a local frame built at
/// impact: x̂ along the horizontal component of the velocity, ŷ the ground
/// normal, ẑ completing the basis. The ball plows into compliant turf, so
/// the impact effectively happens against a plane tilted by `theta_c`; the
/// velocity is rotated into that tilted frame, sliding-or-rolling impulse
/// updates run in each tangential plane, and everything rotates back.
///
/// Returns false when the impact has no usable normal component (grazing,
/// nearly horizontal contact); the caller treats that as an immediate roll
/// instead of dividing by a vanishing normal speed.
fn resolve_bounce(ball: &mut Ball, surface: &SurfaceProperties) -> bool {
    const RADIUS: f64 = constants::BALL_RADIUS;

    // Local orthonormal ground frame. For a near-vertical drop the cross
    // product degenerates; fall back to a fixed cross-range axis, which
    // makes x̂ point downrange.
    let y_unit = Vec3::UP;
    let mut z_unit = ball.velocity.cross(&y_unit).normalized();
    if z_unit == Vec3::ZERO {
        z_unit = Vec3::new(0.0, -1.0, 0.0);
    }
    let x_unit = y_unit.cross(&z_unit);

    let velocity_ground_x = ball.velocity.dot(&x_unit);
    let velocity_ground_y = ball.velocity.dot(&y_unit);

    // The frame is built so the velocity lies in its x-y plane.
    debug_assert!(
        ball.velocity.dot(&z_unit).abs() < 1e-6,
        "impact velocity has a z-component in its own ground frame"
    );

    // Angular velocity of the ball projected onto the ground frame.
    ball.current_spin_rate = spin_rate_after(ball.launch_spin_rate, ball.elapsed_time);
    let spin_rad_s = rpm_to_rad_s(ball.current_spin_rate);
    let mut angular_velocity_ground_x = spin_rad_s * ball.rotation_axis.dot(&x_unit);
    let angular_velocity_ground_y = spin_rad_s * ball.rotation_axis.dot(&y_unit);
    let mut angular_velocity_ground_z = spin_rad_s * ball.rotation_axis.dot(&z_unit);

    // Effective tilt of the impact plane from the turf giving way. The
    // arctangent ratio keeps the smaller component on top so the angle
    // stays in a stable range for both steep and shallow impacts.
    let ball_speed = ball.velocity.magnitude();
    let ball_x_speed = velocity_ground_x.abs();
    let ball_y_speed = velocity_ground_y.abs();

    let larger = ball_x_speed.max(ball_y_speed);
    let theta_c = if larger < constants::EPSILON {
        0.0
    } else {
        surface.firmness * ball_speed * fast_atan(ball_x_speed.min(ball_y_speed) / larger)
    };

    // Rotate the velocity into the tilted x'-y' frame.
    let (sin_theta, cos_theta) = (theta_c.sin(), theta_c.cos());
    let mut velocity_tilted_x = velocity_ground_x * cos_theta + velocity_ground_y * sin_theta;
    let mut velocity_tilted_y = -(velocity_ground_x * sin_theta) + velocity_ground_y * cos_theta;

    let normal_speed = velocity_tilted_y.abs();
    if normal_speed < 1e-6 {
        // Purely tangential contact; no impulse to resolve.
        return false;
    }

    let e = restitution(normal_speed);

    // Critical friction coefficients: above these the surface grips enough
    // that the ball rolls instead of sliding through impact, separately in
    // each tangential plane.
    let impulse_scale = normal_speed * (1.0 + e);
    let mu_cz =
        (-2.0 / 7.0) * (velocity_tilted_x + RADIUS * angular_velocity_ground_z) / impulse_scale;
    let mu_cx = (2.0 / 7.0) * (RADIUS * angular_velocity_ground_x) / impulse_scale;

    // x'-y' plane (downrange and normal).
    if surface.friction < mu_cz {
        // Sliding through impact
        velocity_tilted_x -= surface.friction * impulse_scale;
        velocity_tilted_y = e * normal_speed;
        angular_velocity_ground_z -= (5.0 * surface.friction / (2.0 * RADIUS)) * impulse_scale;
    } else {
        // Rolling through impact
        velocity_tilted_x =
            (1.0 / 7.0) * (5.0 * velocity_tilted_x - 2.0 * RADIUS * angular_velocity_ground_z);
        velocity_tilted_y = e * normal_speed;
        angular_velocity_ground_z = -(velocity_tilted_x / RADIUS);
    }

    // z-y' plane (cross-range and normal). Sign convention: the sideways
    // kick opposes the existing angular momentum about the downrange axis.
    let velocity_ground_z;
    if surface.friction < mu_cx {
        velocity_ground_z = -surface.friction * impulse_scale;
        angular_velocity_ground_x -= (5.0 * surface.friction / (2.0 * RADIUS)) * impulse_scale;
    } else {
        velocity_ground_z = (-2.0 / 7.0) * RADIUS * angular_velocity_ground_x;
        angular_velocity_ground_x = -(velocity_ground_z / RADIUS);
    }

    // Rotate back out of the tilted frame, then out of the ground frame.
    let velocity_ground_x = velocity_tilted_x * cos_theta - velocity_tilted_y * sin_theta;
    let velocity_ground_y = velocity_tilted_x * sin_theta + velocity_tilted_y * cos_theta;

    ball.velocity =
        x_unit * velocity_ground_x + y_unit * velocity_ground_y + z_unit * velocity_ground_z;

    let angular_velocity = x_unit * angular_velocity_ground_x
        + y_unit * angular_velocity_ground_y
        + z_unit * angular_velocity_ground_z;

    let angular_speed = angular_velocity.magnitude();
    if angular_speed < constants::EPSILON {
        // Spin fully killed by the impact; keep the previous axis rather
        // than normalizing a zero vector.
        ball.launch_spin_rate = 0.0;
    } else {
        ball.launch_spin_rate = rad_s_to_rpm(angular_speed);
        ball.rotation_axis = angular_velocity / angular_speed;
    }
    ball.current_spin_rate = ball.launch_spin_rate;

    // Spin decay restarts with the new flight segment.
    ball.elapsed_time = 0.0;
    ball.max_height_reached = false;

    log::trace!(
        "bounce: normal {:.2} m/s, e={:.3}, out |v|={:.2} m/s",
        normal_speed,
        e,
        ball.velocity.magnitude()
    );

    true
}

// =============================================================================
// Tests
// =============================================================================
