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
//! External accelerations
//!
//! Accelerations on a [`Ball`] are frame-local and cleared by integration,
//! so anything that acts every frame (gravity, or a field the host adds)
//! is modeled as a [`ForceProvider`] registered once and re-applied by
//! the [`ForceRegistry`] at the start of each step.

use crate::bodies::Ball;
use crate::geometry::{Float, Vector};
use tracing::warn;

/// Source of acceleration applied to balls each frame
pub trait ForceProvider: Send + Sync {
    /// Acceleration to add to `ball` this frame
    ///
    /// Returns `None` when the provider does not act on this ball.
    fn compute_acceleration(&self, ball: &Ball) -> Option<Vector>;

    /// Descriptive name for logging
    fn name(&self) -> &str;
}

/// Constant acceleration field, independent of mass
///
/// # Examples
///
/// ```
/// use physics2d::forces::{ForceProvider, UniformGravity};
/// use physics2d::bodies::Ball;
/// use physics2d::geometry::{Point, Vector};
///
/// let gravity = UniformGravity::new(Vector::new(0.0, 9.81));
/// let ball = Ball::new(Point::new(0.0, 0.0), 1.0, 5.0).unwrap();
/// assert_eq!(gravity.compute_acceleration(&ball), Some(Vector::new(0.0, 9.81)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    acceleration: Vector,
}

impl UniformGravity {
    /// Gravity with the given acceleration vector
    pub fn new(acceleration: Vector) -> Self {
        UniformGravity { acceleration }
    }

    /// The acceleration vector
    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }
}

impl ForceProvider for UniformGravity {
    fn compute_acceleration(&self, _ball: &Ball) -> Option<Vector> {
        Some(self.acceleration)
    }

    fn name(&self) -> &str {
        "UniformGravity"
    }
}

/// Registry of force providers applied to every ball each frame
///
/// Provider output is validated: non-finite accelerations are dropped and
/// the summed acceleration is clamped to `max_acceleration`.
pub struct ForceRegistry {
    providers: Vec<Box<dyn ForceProvider>>,
    /// Upper bound on the summed acceleration magnitude
    pub max_acceleration: Float,
    /// Whether to log dropped or clamped accelerations
    pub warn_on_invalid: bool,
}

impl ForceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        ForceRegistry {
            providers: Vec::new(),
            max_acceleration: 1e6,
            warn_on_invalid: true,
        }
    }

    /// Register a provider
    pub fn register_provider(&mut self, provider: Box<dyn ForceProvider>) {
        self.providers.push(provider);
    }

    /// Remove all providers
    pub fn clear(&mut self) {
        self.providers.clear();
    }

    /// Number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Summed acceleration from all providers for `ball`
    ///
    /// Returns `None` when no provider acts on the ball.
    pub fn accumulate(&self, ball: &Ball) -> Option<Vector> {
        let mut total = Vector::zero();
        let mut has_any = false;

        for provider in &self.providers {
            if let Some(acc) = provider.compute_acceleration(ball) {
                if !acc.is_valid() {
                    if self.warn_on_invalid {
                        warn!(
                            provider = provider.name(),
                            "provider produced non-finite acceleration"
                        );
                    }
                    continue;
                }
                total += acc;
                has_any = true;
            }
        }

        if !has_any {
            return None;
        }

        let magnitude = total.length();
        if magnitude > self.max_acceleration {
            if self.warn_on_invalid {
                warn!(
                    magnitude,
                    limit = self.max_acceleration,
                    "acceleration exceeds limit, clamping"
                );
            }
            total *= self.max_acceleration / magnitude;
        }

        Some(total)
    }

    /// Add each ball's accumulated acceleration
    ///
    /// Returns the number of balls that received an acceleration.
    pub fn apply(&self, balls: &mut [Ball]) -> usize {
        let mut updated = 0;
        for ball in balls.iter_mut() {
            if let Some(acc) = self.accumulate(ball) {
                ball.apply_acceleration(acc);
                updated += 1;
            }
        }
        updated
    }
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ForceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceRegistry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("max_acceleration", &self.max_acceleration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    struct Constant(Vector);

    impl ForceProvider for Constant {
        fn compute_acceleration(&self, _ball: &Ball) -> Option<Vector> {
            Some(self.0)
        }

        fn name(&self) -> &str {
            "Constant"
        }
    }

    fn ball() -> Ball {
        Ball::new(Point::origin(), 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_empty_registry() {
        let registry = ForceRegistry::new();
        assert_eq!(registry.provider_count(), 0);
        assert_eq!(registry.accumulate(&ball()), None);
    }

    #[test]
    fn test_accumulate_sums_providers() {
        let mut registry = ForceRegistry::new();
        registry.register_provider(Box::new(UniformGravity::new(Vector::new(0.0, 10.0))));
        registry.register_provider(Box::new(Constant(Vector::new(1.0, 0.0))));
        assert_eq!(registry.accumulate(&ball()), Some(Vector::new(1.0, 10.0)));
    }

    #[test]
    fn test_invalid_acceleration_skipped() {
        let mut registry = ForceRegistry::new();
        registry.warn_on_invalid = false;
        registry.register_provider(Box::new(Constant(Vector::new(Float::NAN, 0.0))));
        assert_eq!(registry.accumulate(&ball()), None);

        registry.register_provider(Box::new(Constant(Vector::new(0.0, 3.0))));
        assert_eq!(registry.accumulate(&ball()), Some(Vector::new(0.0, 3.0)));
    }

    #[test]
    fn test_acceleration_clamped() {
        let mut registry = ForceRegistry::new();
        registry.warn_on_invalid = false;
        registry.max_acceleration = 5.0;
        registry.register_provider(Box::new(Constant(Vector::new(30.0, 40.0))));
        let acc = registry.accumulate(&ball()).unwrap();
        assert!((acc.length() - 5.0).abs() < 1e-12);
        assert!((acc.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_adds_to_balls() {
        let mut registry = ForceRegistry::new();
        registry.register_provider(Box::new(UniformGravity::new(Vector::new(0.0, -9.0))));
        let mut balls = vec![ball(), ball()];
        assert_eq!(registry.apply(&mut balls), 2);
        assert_eq!(registry.apply(&mut balls), 2);
        assert_eq!(balls[0].acceleration(), Vector::new(0.0, -18.0));

        registry.clear();
        assert_eq!(registry.apply(&mut balls), 0);
    }
}
