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
//! 2D geometry algebra
//!
//! This module provides the value types the collision pipeline is built on:
//! free vectors, absolute points, unit directions, 2x2 transform matrices and
//! the bounded/unbounded primitives (lines, segments, circles, stadiums).
//!
//! # Numeric policy
//!
//! A single floating-point type, [`Float`], is used throughout. Degenerate
//! cases (zero-length vectors, parallel lines) are detected with a fixed
//! epsilon of `1e-6`:
//!
//! - [`nearly_zero`]: `|x| < ε`
//! - [`nearly_equal`]: `|a - b| < ε·|b|`, falling back to `nearly_zero(a - b)`
//!   so values around zero still compare equal
//!
//! # Angle convention
//!
//! Positive angles rotate counter-clockwise in a y-up frame. In a y-down
//! screen frame the same rotation appears clockwise on screen.

mod matrix;
mod primitives;
mod vector;

pub use matrix::Matrix;
pub use primitives::{
    distance_squared_to_line, distance_to_line, lines_intersection, orthogonal_projection,
    reflection, segments_intersection, Circle, Line, LineIntersection, LineSegment, Stadium,
};
pub use vector::{det, dot, DirectionVector, Point, Vector};

/// Floating-point type used by every geometric and physical quantity
pub type Float = f64;

/// Tolerance used for degenerate-case detection
pub const EPSILON: Float = 1e-6;

/// Archimedes' constant in [`Float`] precision
pub const PI: Float = std::f64::consts::PI;

/// Check whether `x` is within [`EPSILON`] of zero
#[inline]
pub fn nearly_zero(x: Float) -> bool {
    x.abs() < EPSILON
}

/// Check whether `a` and `b` agree to within a relative [`EPSILON`]
///
/// The comparison is relative to `b`. When `b` is zero (or tiny) the
/// relative bound collapses, so an absolute [`nearly_zero`] test on the
/// difference is accepted as well.
#[inline]
pub fn nearly_equal(a: Float, b: Float) -> bool {
    let diff = (a - b).abs();
    diff < EPSILON * b.abs() || nearly_zero(diff)
}

/// Convert radians to degrees
#[inline]
pub fn deg(rad: Float) -> Float {
    rad * 180.0 / PI
}

/// Convert degrees to radians
#[inline]
pub fn rad(deg: Float) -> Float {
    deg * PI / 180.0
}
