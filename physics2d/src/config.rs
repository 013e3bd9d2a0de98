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
//! Simulation and scene configuration
//!
//! Both structs are plain data with a [`Default`]; call `validate()` before
//! handing one to the simulation. World units are pixels with the y axis
//! pointing down, matching the screen.

use crate::collision::WallResponse;
use crate::error::SimulationError;
use crate::geometry::{Float, Vector};

/// Downward gravity in pixels per second squared
pub const DEFAULT_GRAVITY: Vector = Vector { x: 0.0, y: 400.0 };

/// Runtime parameters of a [`Simulation`](crate::simulation::Simulation)
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Uniform acceleration applied to every ball; zero disables gravity
    pub gravity: Vector,
    /// Coefficient of restitution in `[0, 1]`
    pub restitution: Float,
    /// Wall model for dynamic resolution
    pub wall_response: WallResponse,
    /// Frame times above this are clamped (seconds)
    pub max_timestep: Float,
    /// Upper bound on the summed acceleration of a ball
    pub max_acceleration: Float,
    /// Velocity per unit of cue length for right-button shots
    pub launch_gain: Float,
    /// Viewport width in world units
    pub width: Float,
    /// Viewport height in world units
    pub height: Float,
    /// Record contact normals and points in the debug overlay
    pub debug_contacts: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravity: DEFAULT_GRAVITY,
            restitution: 1.0,
            wall_response: WallResponse::default(),
            max_timestep: 0.05,
            max_acceleration: 1e6,
            launch_gain: 2.0,
            width: 800.0,
            height: 600.0,
            debug_contacts: false,
        }
    }
}

impl SimulationConfig {
    /// Zero-gravity configuration, useful for billiard-style scenes
    pub fn without_gravity() -> Self {
        SimulationConfig {
            gravity: Vector::zero(),
            ..Self::default()
        }
    }

    /// Check every field against its documented range
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.gravity.is_valid() {
            return Err(invalid("gravity must be finite"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if let WallResponse::HeavyBall { mass } = self.wall_response {
            if !(mass > 0.0 && mass.is_finite()) {
                return Err(invalid(format!("wall proxy mass must be positive, got {mass}")));
            }
        }
        if !(self.max_timestep > 0.0 && self.max_timestep.is_finite()) {
            return Err(invalid(format!(
                "max_timestep must be positive, got {}",
                self.max_timestep
            )));
        }
        if !(self.max_acceleration > 0.0) {
            return Err(invalid(format!(
                "max_acceleration must be positive, got {}",
                self.max_acceleration
            )));
        }
        if !self.launch_gain.is_finite() {
            return Err(invalid("launch_gain must be finite"));
        }
        let finite = self.width.is_finite() && self.height.is_finite();
        if !(finite && self.width > 0.0 && self.height > 0.0) {
            return Err(invalid(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Parameters for [`build_scene`](crate::scene::build_scene)
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Number of balls
    pub ball_count: usize,
    /// Smallest ball radius
    pub min_radius: Float,
    /// Largest ball radius
    pub max_radius: Float,
    /// Mass per unit of radius
    pub mass_per_radius: Float,
    /// Largest initial speed along each axis
    pub max_speed: Float,
    /// RNG seed; equal seeds give equal scenes
    pub seed: u64,
    /// Scene width
    pub width: Float,
    /// Scene height
    pub height: Float,
    /// Radius of the generated walls
    pub wall_radius: Float,
    /// Add a wall along each edge of the viewport
    pub border_walls: bool,
    /// Add two slanted walls inside the viewport
    pub interior_walls: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            ball_count: 20,
            min_radius: 10.0,
            max_radius: 30.0,
            mass_per_radius: 10.0,
            max_speed: 100.0,
            seed: 42,
            width: 800.0,
            height: 600.0,
            wall_radius: 8.0,
            border_walls: true,
            interior_walls: true,
        }
    }
}

impl SceneConfig {
    /// Check ranges
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let ordered = self.min_radius > 0.0 && self.min_radius <= self.max_radius;
        if !(ordered && self.max_radius.is_finite()) {
            return Err(invalid(format!(
                "radius range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.mass_per_radius > 0.0 && self.mass_per_radius.is_finite()) {
            return Err(invalid("mass_per_radius must be positive"));
        }
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(invalid("max_speed must be non-negative"));
        }
        if !(self.wall_radius >= 0.0 && self.wall_radius.is_finite()) {
            return Err(invalid("wall_radius must be non-negative"));
        }
        let margin = 2.0 * (self.max_radius + self.wall_radius);
        if !(self.width > margin && self.height > margin) {
            return Err(invalid(format!(
                "viewport {}x{} too small for radius {} and walls {}",
                self.width, self.height, self.max_radius, self.wall_radius
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig(message.into())
}
