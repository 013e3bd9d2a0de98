// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Numerical integration of ball motion
//!
//! Each frame the accumulated (frame-local) acceleration of every ball is
//! consumed by an [`Integrator`], which advances position and velocity and
//! then clears the acceleration.
//!
//! [`VelocityVerletIntegrator`] applies `x += v·dt + ½·a·dt²`, `v += a·dt`,
//! which is exact for constant acceleration over the frame.
//!
//! # Timestep Guidelines
//!
//! The frame time comes from the host's clock and is therefore variable.
//! Negative or non-finite values are rejected by [`validate_timestep`];
//! very large values (a stalled window, a debugger pause) are clamped to a
//! configured maximum so a single frame cannot tunnel balls through walls.

use crate::bodies::Ball;
use crate::error::SimulationError;
use crate::geometry::{Float, Point, Vector};
use tracing::warn;

mod verlet;

pub use verlet::VelocityVerletIntegrator;

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance every ball by `dt` seconds and clear its acceleration
    ///
    /// Returns the number of balls whose state is still finite afterwards.
    fn integrate(&self, balls: &mut [Ball], dt: Float) -> usize;
}

/// Validate a frame time and clamp it to `max_timestep`
///
/// # Errors
///
/// [`SimulationError::InvalidTimestep`] for negative, NaN, or infinite `dt`.
pub fn validate_timestep(dt: Float, max_timestep: Float) -> Result<Float, SimulationError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimulationError::InvalidTimestep(dt));
    }
    if dt > max_timestep {
        warn!(dt, max_timestep, "frame time exceeds maximum, clamping");
        return Ok(max_timestep);
    }
    Ok(dt)
}

/// Total kinetic energy of a set of balls
pub fn total_kinetic_energy(balls: &[Ball]) -> Float {
    balls.iter().map(Ball::kinetic_energy).sum()
}

/// Total linear momentum of a set of balls
pub fn total_momentum(balls: &[Ball]) -> Vector {
    balls
        .iter()
        .fold(Vector::zero(), |acc, ball| acc + ball.momentum())
}

/// Mass-weighted center of a set of balls
///
/// Returns `None` for an empty set.
pub fn center_of_mass(balls: &[Ball]) -> Option<Point> {
    let total_mass: Float = balls.iter().map(Ball::mass).sum();
    if balls.is_empty() || total_mass <= 0.0 {
        return None;
    }
    let weighted = balls
        .iter()
        .fold(Vector::zero(), |acc, ball| acc + ball.center().as_vector() * ball.mass());
    Some((weighted / total_mass).as_point())
}
