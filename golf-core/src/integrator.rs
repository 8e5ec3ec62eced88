//! Numerical integration of the accumulated forces.
//!
//! The simulation uses semi-implicit (symplectic) Euler over a fixed,
//! caller-supplied timestep:
//!
//! ```text
//! 1. a = sum_forces / m
//! 2. v += a·dt          // velocity first
//! 3. x += v·dt          // position uses the *new* velocity
//! 4. sum_forces = 0
//! ```
//!
//! Updating velocity before position makes the scheme symplectic, which
//! keeps trajectories stable over many steps where plain forward Euler
//! drifts. There is no sub-stepping or adaptive dt: accuracy is governed
//! entirely by the timestep the caller picks (the frame interval in
//! interactive use, 0.01 s in batch runs), and that fixed-dt contract is
//! part of the model's calibration.

use crate::types::{constants, Ball};

/// Semi-implicit Euler integrator.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance the ball by one timestep, consuming its force accumulator.
    pub fn step(ball: &mut Ball, dt: f64) {
        ball.acceleration = ball.sum_forces * constants::INV_BALL_MASS;

        ball.velocity += ball.acceleration * dt;
        ball.position += ball.velocity * dt;

        ball.sum_forces = crate::types::Vec3::ZERO;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{constants, Vec3};

    fn test_ball(position: Vec3, velocity: Vec3) -> Ball {
        Ball::new(position, velocity, Vec3::new(0.0, -1.0, 0.0), 0.0)
    }

    #[test]
    fn test_free_fall() {
        let mut ball = test_ball(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let dt = 0.001;
        let steps = 1000; // 1 second
        for _ in 0..steps {
            ball.sum_forces = constants::BALL_WEIGHT;
            SemiImplicitEuler::step(&mut ball, dt);
        }

        // After 1 s: v = -g·t, z = 10 - g·t²/2 (within first-order error)
        assert!(
            (ball.velocity.z + constants::GRAVITY).abs() < 0.01,
            "vz should be ≈ -9.81, got {}",
            ball.velocity.z
        );
        assert!(
            (ball.position.z - (10.0 - 0.5 * constants::GRAVITY)).abs() < 0.01,
            "z should be ≈ 5.095, got {}",
            ball.position.z
        );
    }

    #[test]
    fn test_no_forces_straight_line() {
        let mut ball = test_ball(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        SemiImplicitEuler::step(&mut ball, 1.0);

        assert!((ball.position.x - 10.0).abs() < 1e-12);
        assert!((ball.velocity.x - 10.0).abs() < 1e-12);
        assert_eq!(ball.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_forces_cleared_after_step() {
        let mut ball = test_ball(Vec3::ZERO, Vec3::ZERO);
        ball.sum_forces = Vec3::new(1.0, 2.0, 3.0);

        SemiImplicitEuler::step(&mut ball, 0.01);

        assert_eq!(ball.sum_forces, Vec3::ZERO);
    }

    #[test]
    fn test_acceleration_uses_inverse_mass() {
        let mut ball = test_ball(Vec3::ZERO, Vec3::ZERO);
        ball.sum_forces = Vec3::new(1.0, 0.0, 0.0);

        SemiImplicitEuler::step(&mut ball, 0.01);

        assert!((ball.acceleration.x - constants::INV_BALL_MASS).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let run = || {
            let mut ball = test_ball(Vec3::new(0.0, 0.0, 1.0), Vec3::new(30.0, 0.0, 10.0));
            for _ in 0..500 {
                ball.sum_forces = constants::BALL_WEIGHT;
                SemiImplicitEuler::step(&mut ball, 0.01);
            }
            ball.position
        };
        assert_eq!(run(), run());
    }
}
