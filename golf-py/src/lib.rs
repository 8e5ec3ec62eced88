//! Python bindings for the golf-core flight simulator.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from golf_physics import Simulation
//!
//! sim = Simulation()
//! sim.set_wind(10.0, 0.5, True)
//! ball = sim.launch(167.0, 10.9, 0.0, 2600.0, 0.0)
//!
//! while not sim.is_at_rest(ball):
//!     sim.step_all(0.01)
//!     x, y, z = sim.ball_position(ball)
//! ```

use pyo3::prelude::*;

use golf_core::simulation::Simulation as CoreSimulation;
use golf_core::surfaces::{SurfaceLoader, SurfaceProperties};
use golf_core::types::{Ball, BallHandle, LaunchParams, Vec3 as CoreVec3, Wind};

/// 3D vector for positions, velocities, etc.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Main simulation class.
///
/// Owns the ball arena, the wind context, and the ground surface.
#[pyclass]
pub struct Simulation {
    sim: CoreSimulation,
    time: f64,
}

impl Simulation {
    /// Resolve a raw Python-side handle, mapping stale or out-of-range
    /// values (e.g. after `clear`) to an IndexError instead of a panic.
    fn core_ball(&self, handle: usize) -> PyResult<&Ball> {
        self.sim
            .try_ball(BallHandle::from_index(handle))
            .ok_or_else(|| {
                pyo3::exceptions::PyIndexError::new_err(format!("invalid ball handle {handle}"))
            })
    }
}

#[pymethods]
impl Simulation {
    /// Create a new simulation with calm wind and a fairway surface.
    #[new]
    fn new() -> Self {
        Self {
            sim: CoreSimulation::default(),
            time: 0.0,
        }
    }

    /// Current simulation time in seconds.
    #[getter]
    fn time(&self) -> f64 {
        self.time
    }

    /// Launch a ball. Returns its handle (a stable index).
    ///
    /// Arguments: speed (mph), launch angle (deg), heading (deg),
    /// spin rate (rpm), spin-axis tilt (deg).
    fn launch(
        &mut self,
        speed_mph: f64,
        launch_angle_deg: f64,
        heading_deg: f64,
        spin_rate_rpm: f64,
        spin_axis_deg: f64,
    ) -> usize {
        let params = LaunchParams {
            speed_mph,
            launch_angle_deg,
            heading_deg,
            spin_rate_rpm,
            spin_axis_deg,
            ..LaunchParams::default()
        };
        self.sim.launch(&params).index()
    }

    /// Set the wind: speed in mph, direction in radians, and whether to
    /// use the logarithmic height profile. Takes effect on the next step.
    fn set_wind(&mut self, speed_mph: f64, direction_rad: f64, log_profile: bool) {
        self.sim.wind = Wind::new(speed_mph, direction_rad, log_profile);
    }

    /// Load a named surface preset from a materials directory.
    fn load_surface(&mut self, materials_path: &str, name: &str) -> PyResult<()> {
        let loader = SurfaceLoader::new(materials_path);
        self.sim.surface = loader
            .load(name)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(())
    }

    /// Name of the current surface preset.
    fn surface_name(&self) -> String {
        self.sim.surface.name.clone()
    }

    /// Reset to the default fairway surface.
    fn reset_surface(&mut self) {
        self.sim.surface = SurfaceProperties::default();
    }

    /// Advance every ball by dt seconds.
    fn step_all(&mut self, dt: f64) {
        self.sim.step_all(dt);
        self.time += dt;
    }

    /// Run multiple steps at once (more efficient).
    fn step_n(&mut self, dt: f64, steps: usize) {
        for _ in 0..steps {
            self.sim.step_all(dt);
        }
        self.time += dt * steps as f64;
    }

    /// Number of balls in the scene.
    fn num_balls(&self) -> usize {
        self.sim.len()
    }

    /// Remove all balls. Handles become invalid.
    fn clear(&mut self) {
        self.sim.clear();
    }

    /// Ball position as (x, y, z) in meters.
    fn ball_position(&self, handle: usize) -> PyResult<(f64, f64, f64)> {
        let p = self.core_ball(handle)?.position;
        Ok((p.x, p.y, p.z))
    }

    /// Ball velocity as (vx, vy, vz) in m/s.
    fn ball_velocity(&self, handle: usize) -> PyResult<(f64, f64, f64)> {
        let v = self.core_ball(handle)?.velocity;
        Ok((v.x, v.y, v.z))
    }

    /// Ball speed in m/s.
    fn ball_speed(&self, handle: usize) -> PyResult<f64> {
        Ok(self.core_ball(handle)?.velocity.magnitude())
    }

    /// Current spin rate in rpm.
    fn ball_spin_rpm(&self, handle: usize) -> PyResult<f64> {
        Ok(self.core_ball(handle)?.current_spin_rate)
    }

    /// Apex height of the current flight segment, in meters.
    fn ball_max_height(&self, handle: usize) -> PyResult<f64> {
        Ok(self.core_ball(handle)?.max_height)
    }

    /// True once the ball has left the air for good.
    fn is_rolling(&self, handle: usize) -> PyResult<bool> {
        Ok(self.core_ball(handle)?.is_rolling)
    }

    /// True once the ball has rolled out and stopped.
    fn is_at_rest(&self, handle: usize) -> PyResult<bool> {
        Ok(self.core_ball(handle)?.is_at_rest())
    }

    /// Get one ball's state as a dict for easy inspection.
    fn state_dict(&self, py: Python<'_>, handle: usize) -> PyResult<PyObject> {
        let ball = self.core_ball(handle)?;
        let dict = pyo3::types::PyDict::new_bound(py);
        dict.set_item("time", self.time)?;
        dict.set_item("x", ball.position.x)?;
        dict.set_item("y", ball.position.y)?;
        dict.set_item("z", ball.position.z)?;
        dict.set_item("vx", ball.velocity.x)?;
        dict.set_item("vy", ball.velocity.y)?;
        dict.set_item("vz", ball.velocity.z)?;
        dict.set_item("speed", ball.velocity.magnitude())?;
        dict.set_item("spin_rpm", ball.current_spin_rate)?;
        dict.set_item("max_height", ball.max_height)?;
        dict.set_item("is_rolling", ball.is_rolling)?;
        Ok(dict.into_any().unbind())
    }
}

/// Python module definition.
#[pymodule]
fn golf_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
