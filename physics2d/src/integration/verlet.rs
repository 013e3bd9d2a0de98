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
//! Velocity Verlet integrator
//!
//! # Algorithm
//!
//! Accelerations are frame-local impulses: they are accumulated before the
//! step, held constant across it, and cleared afterwards. Under that model
//! the velocity Verlet update collapses to
//!
//! ```text
//! x(t + dt) = x(t) + v(t)*dt + 0.5*a*dt²
//! v(t + dt) = v(t) + a*dt
//! ```
//!
//! which is exact for constant acceleration.
//!
//! # References
//!
//! - Swope, W. C., Andersen, H. C., Berens, P. H., & Wilson, K. R. (1982).
//!   The Journal of Chemical Physics, 76(1), 637-649.
//! - Verlet, L. (1967). Physical Review, 159(1), 98-103.

use super::Integrator;
use crate::bodies::Ball;
use crate::geometry::Float;
use tracing::warn;

/// Velocity Verlet integrator for frame-local accelerations
///
/// # Example
///
/// ```
/// use physics2d::integration::{Integrator, VelocityVerletIntegrator};
///
/// let integrator = VelocityVerletIntegrator::new();
/// assert_eq!(integrator.name(), "Velocity Verlet");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerletIntegrator;

impl VelocityVerletIntegrator {
    /// Create a new velocity Verlet integrator
    pub fn new() -> Self {
        VelocityVerletIntegrator
    }
}

impl Integrator for VelocityVerletIntegrator {
    fn name(&self) -> &str {
        "Velocity Verlet"
    }

    fn integrate(&self, balls: &mut [Ball], dt: Float) -> usize {
        let mut updated_count = 0;
        for (index, ball) in balls.iter_mut().enumerate() {
            ball.advance(dt);
            if !ball.is_valid() {
                warn!(ball = index, "invalid state after Verlet update");
                continue;
            }
            updated_count += 1;
        }
        updated_count
    }
}
