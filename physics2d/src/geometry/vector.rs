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
//! Vectors, points and unit directions
//!
//! [`Vector`] is a free displacement and [`Point`] an absolute position. The
//! two are kept apart so that `point + vector` is a point while the
//! difference of two points is a vector. [`DirectionVector`] is a vector of
//! unit length that can only be produced by normalization or from an angle.

use super::{nearly_zero, Float};
use crate::error::GeometryError;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D free vector (displacement, velocity, acceleration)
///
/// # Examples
///
/// ```
/// use physics2d::geometry::Vector;
///
/// let v = Vector::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.perp(), Vector::new(-4.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// X component
    pub x: Float,
    /// Y component
    pub y: Float,
}

impl Vector {
    /// Create a new vector
    pub const fn new(x: Float, y: Float) -> Self {
        Vector { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector::new(0.0, 0.0)
    }

    /// Vector pointing from `begin` to `end`
    pub fn between(begin: Point, end: Point) -> Self {
        Vector::new(end.x - begin.x, end.y - begin.y)
    }

    /// Component-wise sum
    pub fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference
    pub fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// Multiply by a scalar
    pub fn scale(self, s: Float) -> Vector {
        Vector::new(self.x * s, self.y * s)
    }

    /// Dot product
    pub fn dot(self, other: Vector) -> Float {
        dot(self, other)
    }

    /// 2D cross product, see [`det`]
    pub fn det(self, other: Vector) -> Float {
        det(self, other)
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> Float {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length, finite for every finite vector
    pub fn length(self) -> Float {
        self.x.hypot(self.y)
    }

    /// The vector rotated a quarter turn counter-clockwise: `(-y, x)`
    pub fn perp(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Rotate counter-clockwise by `theta` radians
    pub fn rotate(self, theta: Float) -> Vector {
        let (sin, cos) = theta.sin_cos();
        Vector::new(
            self.x * cos - self.y * sin,
            self.y * cos + self.x * sin,
        )
    }

    /// Unit vector with the same direction
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthVector`] when the length is nearly
    /// zero. Stationary vectors have to be special-cased by the caller.
    pub fn normalize(self) -> Result<DirectionVector, GeometryError> {
        DirectionVector::try_from(self)
    }

    /// Reinterpret as a position relative to the origin
    pub fn as_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check that both components are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Dot product of two vectors
#[inline]
pub fn dot(p: Vector, q: Vector) -> Float {
    p.x * q.x + p.y * q.y
}

/// 2D cross product `p.x·q.y − q.x·p.y`
///
/// Signed area of the parallelogram spanned by `p` and `q`; zero when the
/// vectors are parallel.
#[inline]
pub fn det(p: Vector, q: Vector) -> Float {
    p.x * q.y - q.x * p.y
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::add(self, rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::sub(self, rhs)
    }
}

impl Mul<Float> for Vector {
    type Output = Vector;
    fn mul(self, rhs: Float) -> Vector {
        self.scale(rhs)
    }
}

impl Mul<Vector> for Float {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs.scale(self)
    }
}

impl Div<Float> for Vector {
    type Output = Vector;
    fn div(self, rhs: Float) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<Float> for Vector {
    fn mul_assign(&mut self, rhs: Float) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<Float> for Vector {
    fn div_assign(&mut self, rhs: Float) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

/// 2D absolute position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: Float,
    /// Y coordinate
    pub y: Float,
}

impl Point {
    /// Create a new point
    pub const fn new(x: Float, y: Float) -> Self {
        Point { x, y }
    }

    /// The origin
    pub const fn origin() -> Self {
        Point::new(0.0, 0.0)
    }

    /// Position vector relative to the origin
    pub fn as_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Squared distance to `other`
    pub fn distance_squared(self, other: Point) -> Float {
        Vector::between(self, other).length_squared()
    }

    /// Distance to `other`
    pub fn distance(self, other: Point) -> Float {
        Vector::between(self, other).length()
    }

    /// Component-wise comparison under [`super::nearly_equal`]
    pub fn nearly_equals(self, other: Point) -> bool {
        super::nearly_equal(self.x, other.x) && super::nearly_equal(self.y, other.y)
    }

    /// Check that both coordinates are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Vector {
        Vector::between(rhs, self)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Vector of unit length
///
/// Only obtainable through [`Vector::normalize`] or
/// [`DirectionVector::from_angle`], so `|v| == 1` holds for its whole
/// lifetime. Derived directions (negation, perpendicular) stay unit length.
///
/// # Examples
///
/// ```
/// use physics2d::geometry::{DirectionVector, Vector};
///
/// let n = Vector::new(0.0, 2.0).normalize().unwrap();
/// assert_eq!(n.y(), 1.0);
/// assert_eq!(Vector::from(n.perp()), Vector::new(-1.0, 0.0));
///
/// assert!(Vector::zero().normalize().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionVector {
    x: Float,
    y: Float,
}

impl DirectionVector {
    /// Unit vector at `theta` radians counter-clockwise from the x axis
    ///
    /// `theta` must be finite; use [`DirectionVector::try_from_angle`] for
    /// angles that come from outside the crate. A NaN or infinite angle
    /// trips a debug assertion and yields NaN components in release builds.
    pub fn from_angle(theta: Float) -> Self {
        debug_assert!(theta.is_finite(), "non-finite angle {theta}");
        let (sin, cos) = theta.sin_cos();
        DirectionVector { x: cos, y: sin }
    }

    /// Checked [`DirectionVector::from_angle`]
    ///
    /// # Errors
    ///
    /// [`GeometryError::NonFinite`] when `theta` is NaN or infinite.
    pub fn try_from_angle(theta: Float) -> Result<Self, GeometryError> {
        if !theta.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        Ok(DirectionVector::from_angle(theta))
    }

    /// Unit vector along +x
    pub const fn unit_x() -> Self {
        DirectionVector { x: 1.0, y: 0.0 }
    }

    /// Unit vector along +y
    pub const fn unit_y() -> Self {
        DirectionVector { x: 0.0, y: 1.0 }
    }

    /// X component
    pub fn x(&self) -> Float {
        self.x
    }

    /// Y component
    pub fn y(&self) -> Float {
        self.y
    }

    /// Angle from the x axis in `(-π, π]`
    pub fn angle(&self) -> Float {
        self.y.atan2(self.x)
    }

    /// Perpendicular direction, a quarter turn counter-clockwise
    pub fn perp(self) -> DirectionVector {
        DirectionVector {
            x: -self.y,
            y: self.x,
        }
    }

    /// Length, always one
    pub fn length(&self) -> Float {
        1.0
    }

    /// The direction as a free vector
    pub fn as_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Reinterpret as a position relative to the origin
    pub fn as_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl TryFrom<Vector> for DirectionVector {
    type Error = GeometryError;

    fn try_from(v: Vector) -> Result<Self, Self::Error> {
        if !v.is_valid() {
            return Err(GeometryError::NonFinite);
        }
        let len = v.length();
        if nearly_zero(len) {
            return Err(GeometryError::ZeroLengthVector);
        }
        // hypot overflows only within a factor of sqrt(2) of Float::MAX
        let v = if len.is_finite() { v } else { v * 0.5 };
        let len = v.length();
        Ok(DirectionVector {
            x: v.x / len,
            y: v.y / len,
        })
    }
}

impl From<DirectionVector> for Vector {
    fn from(d: DirectionVector) -> Vector {
        d.as_vector()
    }
}

impl Neg for DirectionVector {
    type Output = DirectionVector;
    fn neg(self) -> DirectionVector {
        DirectionVector {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<Float> for DirectionVector {
    type Output = Vector;
    fn mul(self, rhs: Float) -> Vector {
        self.as_vector().scale(rhs)
    }
}

impl Mul<DirectionVector> for Float {
    type Output = Vector;
    fn mul(self, rhs: DirectionVector) -> Vector {
        rhs.as_vector().scale(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{rad, PI};

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        assert_eq!(a + b, Vector::new(4.0, 1.0));
        assert_eq!(a - b, Vector::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(2.0 * a, a.scale(2.0));
        assert_eq!(b / 2.0, Vector::new(1.5, -0.5));
        assert_eq!(-a, Vector::new(-1.0, -2.0));

        let mut c = a;
        c += b;
        c -= a;
        c *= 3.0;
        c /= 3.0;
        assert_eq!(c, b);
    }

    #[test]
    fn test_dot_and_det() {
        let a = Vector::new(2.0, 0.0);
        let b = Vector::new(0.0, 3.0);
        assert_eq!(dot(a, b), 0.0);
        assert_eq!(det(a, b), 6.0);
        assert_eq!(det(b, a), -6.0);
        assert_eq!(det(a, a * 5.0), 0.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vector::new(1.0, 0.0).rotate(PI / 2.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);

        // Quarter turn matches perp
        let w = Vector::new(2.0, 5.0);
        let r = w.rotate(rad(90.0));
        assert!((r - w.perp()).length() < 1e-12);
    }

    #[test]
    fn test_normalize() {
        let n = Vector::new(3.0, 4.0).normalize().unwrap();
        assert!((n.x() - 0.6).abs() < 1e-12);
        assert!((n.y() - 0.8).abs() < 1e-12);
        assert!((n.as_vector().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(
            Vector::zero().normalize(),
            Err(GeometryError::ZeroLengthVector)
        );
        assert_eq!(
            Vector::new(1e-8, 0.0).normalize(),
            Err(GeometryError::ZeroLengthVector)
        );
        assert_eq!(
            Vector::new(Float::NAN, 1.0).normalize(),
            Err(GeometryError::NonFinite)
        );
    }

    #[test]
    fn test_point_vector_relations() {
        let p = Point::new(1.0, 1.0);
        let q = Point::new(4.0, 5.0);
        let v = Vector::between(p, q);
        assert_eq!(v, Vector::new(3.0, 4.0));
        assert_eq!(q - p, v);
        assert_eq!(p + v, q);
        assert_eq!(q - v, p);
        assert_eq!(p.distance(q), 5.0);
        assert_eq!(p.distance_squared(q), 25.0);
    }

    #[test]
    fn test_direction_from_angle() {
        let d = DirectionVector::from_angle(PI);
        assert!((d.x() + 1.0).abs() < 1e-12);
        assert!(d.y().abs() < 1e-12);
        assert!((d.angle() - PI).abs() < 1e-12);

        let neg = -DirectionVector::unit_x();
        assert_eq!(neg.as_vector(), Vector::new(-1.0, 0.0));
        assert_eq!(DirectionVector::unit_x().perp(), DirectionVector::unit_y());
    }

    #[test]
    fn test_normalize_huge_vectors() {
        for v in [
            Vector::new(1e200, 1e200),
            Vector::new(-3e250, 4e250),
            Vector::new(Float::MAX, Float::MAX),
            Vector::new(0.0, -Float::MAX),
        ] {
            assert!(v.length().is_finite() || v.x.abs() == Float::MAX);
            let n = v.normalize().unwrap();
            assert!((n.as_vector().length() - 1.0).abs() < 1e-12, "{:?} -> {:?}", v, n);
            assert!(det(n.as_vector(), v / v.x.abs().max(v.y.abs())).abs() < 1e-12);
        }
        let n = Vector::new(-3e250, 4e250).normalize().unwrap();
        assert!((n.x() + 0.6).abs() < 1e-12);
        assert!((n.y() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_try_from_angle() {
        let d = DirectionVector::try_from_angle(PI / 2.0).unwrap();
        assert!(d.x().abs() < 1e-12);
        assert!((d.y() - 1.0).abs() < 1e-12);

        for theta in [Float::NAN, Float::INFINITY, Float::NEG_INFINITY] {
            assert_eq!(
                DirectionVector::try_from_angle(theta),
                Err(GeometryError::NonFinite)
            );
        }
    }
}
