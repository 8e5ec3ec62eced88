//! # Golf Core
//!
//! A physics engine for golf ball flight, bounce, and roll simulation.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, ball/wind state, constants)
//! - `units`: Unit conversions and fast polynomial atan/atan2
//! - `coefficients`: Aerodynamic drag/lift lookup table and restitution
//! - `forces`: Physical forces (wind, lift, drag, rolling friction)
//! - `integrator`: Semi-implicit Euler over a fixed timestep
//! - `surfaces`: YAML-based ground surface presets
//! - `simulation`: Flight/bounce/roll state machine and ball arena

pub mod coefficients;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod surfaces;
pub mod types;
pub mod units;
