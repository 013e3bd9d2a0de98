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
//! 2x2 linear transforms
//!
//! ```text
//! | a b |
//! | c d |
//! ```
//!
//! Matrices act on column vectors: `M * v = (a·x + b·y, c·x + d·y)`.
//! Products compose right-to-left, so `(A * B) * v == A * (B * v)`.

use super::vector::{DirectionVector, Vector};
use super::{nearly_zero, Float};
use crate::error::GeometryError;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// 2x2 matrix for rotations, reflections, projections and scalings
///
/// # Examples
///
/// ```
/// use physics2d::geometry::{Matrix, Vector, PI};
///
/// let quarter = Matrix::counterclockwise_rotation(PI / 2.0);
/// let v = quarter * Vector::new(1.0, 0.0);
/// assert!(v.x.abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Row 0, column 0
    pub a: Float,
    /// Row 0, column 1
    pub b: Float,
    /// Row 1, column 0
    pub c: Float,
    /// Row 1, column 1
    pub d: Float,
}

impl Matrix {
    /// Create a matrix from its entries in row order
    pub const fn new(a: Float, b: Float, c: Float, d: Float) -> Self {
        Matrix { a, b, c, d }
    }

    /// Create a matrix whose columns are the given vectors
    pub fn from_columns(column_1: Vector, column_2: Vector) -> Self {
        Matrix::new(column_1.x, column_2.x, column_1.y, column_2.y)
    }

    /// Identity transform
    pub const fn identity() -> Self {
        Matrix::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Rotation by `theta` radians clockwise (y-up frame)
    pub fn clockwise_rotation(theta: Float) -> Self {
        let (sin, cos) = theta.sin_cos();
        Matrix::new(cos, sin, -sin, cos)
    }

    /// Rotation by `theta` radians counter-clockwise (y-up frame)
    ///
    /// Agrees with [`Vector::rotate`].
    pub fn counterclockwise_rotation(theta: Float) -> Self {
        let (sin, cos) = theta.sin_cos();
        Matrix::new(cos, -sin, sin, cos)
    }

    /// Stretch along the x axis by `k`
    pub const fn stretching_x(k: Float) -> Self {
        Matrix::new(k, 0.0, 0.0, 1.0)
    }

    /// Stretch along the y axis by `k`
    pub const fn stretching_y(k: Float) -> Self {
        Matrix::new(1.0, 0.0, 0.0, k)
    }

    /// Uniform scaling by `k`
    pub const fn scaling(k: Float) -> Self {
        Matrix::new(k, 0.0, 0.0, k)
    }

    /// Shear parallel to the x axis
    pub const fn shearing_x(k: Float) -> Self {
        Matrix::new(1.0, k, 0.0, 1.0)
    }

    /// Shear parallel to the y axis
    pub const fn shearing_y(k: Float) -> Self {
        Matrix::new(1.0, 0.0, k, 1.0)
    }

    /// Reflection across the line through the origin along `v`
    ///
    /// # Errors
    ///
    /// [`GeometryError::ZeroLengthVector`] when `|v|` is nearly zero, the
    /// same threshold [`Vector::normalize`] applies.
    pub fn reflection(v: Vector) -> Result<Self, GeometryError> {
        Ok(Matrix::reflection_across(v.normalize()?))
    }

    /// Orthogonal projection onto the line through the origin along `u`
    ///
    /// # Errors
    ///
    /// [`GeometryError::ZeroLengthVector`] when `|u|` is nearly zero.
    pub fn orthogonal_projection(u: Vector) -> Result<Self, GeometryError> {
        Ok(Matrix::projection_along(u.normalize()?))
    }

    /// Reflection across a unit direction; cannot fail
    pub fn reflection_across(direction: DirectionVector) -> Self {
        let (x, y) = (direction.x(), direction.y());
        Matrix::new(x * x - y * y, 2.0 * x * y, 2.0 * x * y, y * y - x * x)
    }

    /// Projection onto a unit direction; cannot fail
    pub fn projection_along(direction: DirectionVector) -> Self {
        Matrix::projection_onto(direction.as_vector())
    }

    fn projection_onto(u: Vector) -> Self {
        Matrix::new(u.x * u.x, u.x * u.y, u.x * u.y, u.y * u.y)
    }

    /// Matrix mapping coordinates in the basis `(new_basis_1, new_basis_2)`
    /// to standard coordinates
    pub fn change_basis(new_basis_1: Vector, new_basis_2: Vector) -> Self {
        Matrix::from_columns(new_basis_1, new_basis_2)
    }

    /// Determinant
    pub fn det(&self) -> Float {
        self.a * self.d - self.b * self.c
    }

    /// Adjugate; `M * adj(M) == det(M) * I`
    pub fn adjugate(&self) -> Self {
        Matrix::new(self.d, -self.b, -self.c, self.a)
    }

    /// Transpose
    pub fn transpose(&self) -> Self {
        Matrix::new(self.a, self.c, self.b, self.d)
    }

    /// Inverse via the adjugate
    ///
    /// # Errors
    ///
    /// [`GeometryError::SingularMatrix`] when the determinant is nearly zero.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let det = self.det();
        if nearly_zero(det) {
            return Err(GeometryError::SingularMatrix);
        }
        Ok(self.adjugate() / det)
    }

    /// Apply to a vector
    pub fn transform(&self, v: Vector) -> Vector {
        Vector::new(v.x * self.a + v.y * self.b, v.x * self.c + v.y * self.d)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;
    fn mul(self, m: Matrix) -> Matrix {
        Matrix::new(
            self.a * m.a + self.b * m.c,
            self.a * m.b + self.b * m.d,
            self.c * m.a + self.d * m.c,
            self.c * m.b + self.d * m.d,
        )
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        self.transform(v)
    }
}

impl Mul<Float> for Matrix {
    type Output = Matrix;
    fn mul(self, s: Float) -> Matrix {
        Matrix::new(self.a * s, self.b * s, self.c * s, self.d * s)
    }
}

impl Div<Float> for Matrix {
    type Output = Matrix;
    fn div(self, s: Float) -> Matrix {
        Matrix::new(self.a / s, self.b / s, self.c / s, self.d / s)
    }
}

impl Add for Matrix {
    type Output = Matrix;
    fn add(self, m: Matrix) -> Matrix {
        Matrix::new(self.a + m.a, self.b + m.b, self.c + m.c, self.d + m.d)
    }
}

impl Sub for Matrix {
    type Output = Matrix;
    fn sub(self, m: Matrix) -> Matrix {
        Matrix::new(self.a - m.a, self.b - m.b, self.c - m.c, self.d - m.d)
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        Matrix::new(-self.a, -self.b, -self.c, -self.d)
    }
}
