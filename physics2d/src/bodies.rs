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
//! Rigid bodies
//!
//! [`Ball`] is a dynamic, non-rotating disc. [`Wall`] is a static capsule
//! with infinite mass. Both hold their shape by composition and expose it
//! read-only; only the simulation phases move a ball.

use crate::error::BodyError;
use crate::geometry::{Circle, Float, Point, Stadium, Vector};

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Opaque red
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Opaque green
    pub const GREEN: Color = Color::rgb(0.0, 0.5, 0.0);
    /// Opaque blue
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    /// Alice blue, the default background
    pub const ALICE_BLUE: Color = Color::rgb(0.941, 0.973, 1.0);
    /// Slate gray, the default wall color
    pub const SLATE_GRAY: Color = Color::rgb(0.439, 0.502, 0.565);

    /// Opaque color from red, green and blue
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Color with explicit alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Dynamic circular body
///
/// # Examples
///
/// ```
/// use physics2d::bodies::Ball;
/// use physics2d::geometry::{Point, Vector};
///
/// let ball = Ball::new(Point::new(0.0, 0.0), 10.0, 2.0)
///     .unwrap()
///     .with_velocity(Vector::new(3.0, 0.0));
/// assert_eq!(ball.kinetic_energy(), 9.0);
///
/// assert!(Ball::new(Point::new(0.0, 0.0), 10.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    circle: Circle,
    mass: Float,
    velocity: Vector,
    acceleration: Vector,
    color: Color,
}

impl Ball {
    /// Ball at rest at `center`
    ///
    /// # Errors
    ///
    /// [`BodyError::NonPositiveRadius`] and [`BodyError::NonPositiveMass`]
    /// when either is not strictly positive and finite.
    pub fn new(center: Point, radius: Float, mass: Float) -> Result<Self, BodyError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(BodyError::NonPositiveRadius(radius));
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        Ok(Ball {
            circle: Circle::new(center, radius)?,
            mass,
            velocity: Vector::zero(),
            acceleration: Vector::zero(),
            color: Color::default(),
        })
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Shape of the ball
    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    /// Current center
    pub fn center(&self) -> Point {
        self.circle.center()
    }

    /// Radius
    pub fn radius(&self) -> Float {
        self.circle.radius()
    }

    /// Mass
    pub fn mass(&self) -> Float {
        self.mass
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Acceleration accumulated for the current frame
    pub fn acceleration(&self) -> Vector {
        self.acceleration
    }

    /// Fill color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Teleport the center
    pub fn set_center(&mut self, center: Point) {
        self.circle.set_center(center);
    }

    /// Move the center by `offset`
    pub fn translate(&mut self, offset: Vector) {
        self.circle.translate(offset);
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    /// Add to this frame's acceleration
    ///
    /// Accelerations are frame-local: [`Ball::advance`] consumes and clears
    /// them, so persistent fields such as gravity are re-applied every frame.
    pub fn apply_acceleration(&mut self, acceleration: Vector) {
        self.acceleration += acceleration;
    }

    /// Drop this frame's accumulated acceleration
    pub fn clear_acceleration(&mut self) {
        self.acceleration = Vector::zero();
    }

    /// Advance by `dt` seconds under the accumulated acceleration
    ///
    /// ```text
    /// center   += v·dt + ½·a·dt²
    /// velocity += a·dt
    /// a         = 0
    /// ```
    ///
    /// `dt` is trusted to be non-negative.
    pub fn advance(&mut self, dt: Float) {
        let a = self.acceleration;
        self.circle.translate(self.velocity * dt + a * (0.5 * dt * dt));
        self.velocity += a * dt;
        self.acceleration = Vector::zero();
    }

    /// Kinetic energy `½·m·|v|²`
    pub fn kinetic_energy(&self) -> Float {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum `m·v`
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    /// Check that position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.center().is_valid() && self.velocity.is_valid()
    }
}

/// Static capsule-shaped obstacle with infinite mass
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    stadium: Stadium,
    color: Color,
}

impl Wall {
    /// Wall around the segment `beg`–`end`
    ///
    /// # Errors
    ///
    /// Fails when the endpoints coincide or the radius is negative.
    pub fn new(beg: Point, end: Point, radius: Float) -> Result<Self, BodyError> {
        Ok(Wall {
            stadium: Stadium::new(beg, end, radius)?,
            color: Color::SLATE_GRAY,
        })
    }

    /// Set the fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Shape of the wall
    pub fn stadium(&self) -> &Stadium {
        &self.stadium
    }

    /// Radius around the axis
    pub fn radius(&self) -> Float {
        self.stadium.radius()
    }

    /// Fill color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Local collision proxy for a body centered at `p`
    pub fn closest_circle(&self, p: Point) -> Circle {
        self.stadium.closest_circle(p)
    }
}
