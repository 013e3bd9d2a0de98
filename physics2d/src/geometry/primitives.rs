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
//! Lines, segments, circles and stadiums
//!
//! Shapes validate their invariants on construction (distinct endpoints,
//! non-negative radius) and are immutable afterwards, except for moving a
//! circle's center.

use super::matrix::Matrix;
use super::vector::{det, DirectionVector, Point, Vector};
use super::{nearly_zero, Float};
use crate::error::GeometryError;

/// Project `p` onto the infinite line through `beg` and `end`
///
/// # Errors
///
/// [`GeometryError::CoincidentPoints`] when `beg` and `end` coincide.
pub fn orthogonal_projection(beg: Point, end: Point, p: Point) -> Result<Point, GeometryError> {
    let projection = Matrix::orthogonal_projection(Vector::between(beg, end))
        .map_err(|_| GeometryError::CoincidentPoints)?;
    Ok(beg + projection * (p - beg))
}

/// Mirror `p` across the infinite line through `beg` and `end`
///
/// # Errors
///
/// [`GeometryError::CoincidentPoints`] when `beg` and `end` coincide.
pub fn reflection(beg: Point, end: Point, p: Point) -> Result<Point, GeometryError> {
    let mirror = Matrix::reflection(Vector::between(beg, end))
        .map_err(|_| GeometryError::CoincidentPoints)?;
    Ok(beg + mirror * (p - beg))
}

/// Squared distance from `p` to the infinite line through `beg` and `end`
pub fn distance_squared_to_line(beg: Point, end: Point, p: Point) -> Result<Float, GeometryError> {
    Ok(orthogonal_projection(beg, end, p)?.distance_squared(p))
}

/// Distance from `p` to the infinite line through `beg` and `end`
pub fn distance_to_line(beg: Point, end: Point, p: Point) -> Result<Float, GeometryError> {
    Ok(distance_squared_to_line(beg, end, p)?.sqrt())
}

/// Outcome of intersecting two lines or two segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection {
    /// Parallel and distinct, or segments that do not meet
    None,
    /// Exactly one crossing point
    Point(Point),
    /// The two shapes lie on the same line
    ///
    /// Carries one defining point of each input. These are NOT two
    /// intersection points.
    Coincident(Point, Point),
}

impl LineIntersection {
    /// The crossing point, if there is exactly one
    pub fn point(&self) -> Option<Point> {
        match self {
            LineIntersection::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether the inputs were found to be coincident
    pub fn is_coincident(&self) -> bool {
        matches!(self, LineIntersection::Coincident(..))
    }
}

/// Cramer's rule on `beg_1 + t·d1 = beg_2 + s·d2`
///
/// Returns `Ok(t)` for crossing lines, otherwise whether the lines are
/// coincident.
fn solve_crossing(beg_1: Point, d1: Vector, beg_2: Point, d2: Vector) -> Result<Float, bool> {
    let between = Vector::between(beg_1, beg_2);
    let det_all = det(d1, -d2);
    let det_1 = det(between, -d2);
    let det_2 = det(d1, between);

    if nearly_zero(det_all) {
        Err(nearly_zero(det_1) || nearly_zero(det_2))
    } else {
        Ok(det_1 / det_all)
    }
}

/// Intersect two infinite lines
///
/// # Examples
///
/// ```
/// use physics2d::geometry::{lines_intersection, Line, LineIntersection, Point};
///
/// let l1 = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
/// let l2 = Line::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0)).unwrap();
/// let p = lines_intersection(&l1, &l2).point().unwrap();
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12);
/// ```
pub fn lines_intersection(line_1: &Line, line_2: &Line) -> LineIntersection {
    let d1 = line_1.direction.as_vector();
    match solve_crossing(line_1.point, d1, line_2.point, line_2.direction.as_vector()) {
        Ok(t) => LineIntersection::Point(line_1.point + d1 * t),
        Err(true) => LineIntersection::Coincident(line_1.point, line_2.point),
        Err(false) => LineIntersection::None,
    }
}

/// Intersect two bounded segments
///
/// Collinear segments are reported as coincident only when they overlap.
pub fn segments_intersection(seg_1: &LineSegment, seg_2: &LineSegment) -> LineIntersection {
    let d1 = seg_1.as_vector();
    match solve_crossing(seg_1.beg, d1, seg_2.beg, seg_2.as_vector()) {
        Ok(t) => {
            let crossing = seg_1.beg + d1 * t;
            if seg_1.contains(crossing) && seg_2.contains(crossing) {
                LineIntersection::Point(crossing)
            } else {
                LineIntersection::None
            }
        }
        Err(true) => {
            let overlap = seg_1.contains(seg_2.beg)
                || seg_1.contains(seg_2.end)
                || seg_2.contains(seg_1.beg)
                || seg_2.contains(seg_1.end);
            if overlap {
                LineIntersection::Coincident(seg_1.beg, seg_2.beg)
            } else {
                LineIntersection::None
            }
        }
        Err(false) => LineIntersection::None,
    }
}

/// Infinite line through a point along a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// A point on the line
    pub point: Point,
    /// Direction of the line
    pub direction: DirectionVector,
}

impl Line {
    /// Line through two distinct points, directed from `p1` to `p2`
    pub fn new(p1: Point, p2: Point) -> Result<Self, GeometryError> {
        let direction = Vector::between(p1, p2)
            .normalize()
            .map_err(|_| GeometryError::CoincidentPoints)?;
        Ok(Line {
            point: p1,
            direction,
        })
    }

    /// Line through `p` along `v`
    pub fn from_point_vector(p: Point, v: Vector) -> Result<Self, GeometryError> {
        Ok(Line {
            point: p,
            direction: v.normalize()?,
        })
    }

    /// Line through `p` along an existing direction
    pub fn with_direction(p: Point, direction: DirectionVector) -> Self {
        Line {
            point: p,
            direction,
        }
    }

    /// Point at arc-length parameter `t` from [`Line::point`]
    pub fn at(&self, t: Float) -> Point {
        self.point + self.direction * t
    }

    /// Orthogonal projection of `p` onto the line
    pub fn projection(&self, p: Point) -> Point {
        self.point + Matrix::projection_along(self.direction) * (p - self.point)
    }

    /// Mirror image of `p` across the line
    pub fn reflection(&self, p: Point) -> Point {
        self.point + Matrix::reflection_across(self.direction) * (p - self.point)
    }

    /// Whether `p` lies on the line
    pub fn contains(&self, p: Point) -> bool {
        nearly_zero(det(p - self.point, self.direction.as_vector()))
    }

    /// X coordinate where the line crosses height `y`
    ///
    /// `None` for horizontal lines.
    pub fn x_for_y(&self, y: Float) -> Option<Float> {
        let dy = self.direction.y();
        if nearly_zero(dy) {
            return None;
        }
        Some(self.at((y - self.point.y) / dy).x)
    }

    /// Y coordinate where the line crosses abscissa `x`
    ///
    /// `None` for vertical lines.
    pub fn y_for_x(&self, x: Float) -> Option<Float> {
        let dx = self.direction.x();
        if nearly_zero(dx) {
            return None;
        }
        Some(self.at((x - self.point.x) / dx).y)
    }
}

/// Bounded segment between two distinct endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    beg: Point,
    end: Point,
    axis: DirectionVector,
}

impl LineSegment {
    /// Segment from `beg` to `end`
    ///
    /// # Errors
    ///
    /// [`GeometryError::CoincidentPoints`] when the endpoints coincide.
    pub fn new(beg: Point, end: Point) -> Result<Self, GeometryError> {
        if !beg.is_valid() || !end.is_valid() {
            return Err(GeometryError::NonFinite);
        }
        let axis = Vector::between(beg, end)
            .normalize()
            .map_err(|_| GeometryError::CoincidentPoints)?;
        Ok(LineSegment { beg, end, axis })
    }

    /// First endpoint
    pub fn beg(&self) -> Point {
        self.beg
    }

    /// Second endpoint
    pub fn end(&self) -> Point {
        self.end
    }

    /// Unit direction from `beg` to `end`
    pub fn axis(&self) -> DirectionVector {
        self.axis
    }

    /// Vector from `beg` to `end`
    pub fn as_vector(&self) -> Vector {
        Vector::between(self.beg, self.end)
    }

    /// Squared length
    pub fn length_squared(&self) -> Float {
        self.beg.distance_squared(self.end)
    }

    /// Length
    pub fn length(&self) -> Float {
        self.beg.distance(self.end)
    }

    /// Infinite line carrying the segment
    pub fn line(&self) -> Line {
        Line::with_direction(self.beg, self.axis)
    }

    /// Orthogonal projection of `p` onto the carrying line
    pub fn projection(&self, p: Point) -> Point {
        self.beg + Matrix::projection_along(self.axis) * (p - self.beg)
    }

    /// Whether `p` lies on the segment, endpoints included
    pub fn contains(&self, p: Point) -> bool {
        let len2 = self.length_squared();
        self.projection(p).nearly_equals(p)
            && p.distance_squared(self.beg) <= len2
            && p.distance_squared(self.end) <= len2
    }

    /// Point of the segment nearest to `p`
    ///
    /// The projection when it falls on the segment, otherwise the nearer
    /// endpoint. Ties go to `beg`.
    pub fn closest_point(&self, p: Point) -> Point {
        let projected = self.projection(p);
        if self.contains(projected) {
            return projected;
        }
        if p.distance_squared(self.beg) <= p.distance_squared(self.end) {
            self.beg
        } else {
            self.end
        }
    }
}

/// Disc given by center and non-negative radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: Float,
}

impl Circle {
    /// Circle at `center` with `radius`
    ///
    /// # Errors
    ///
    /// [`GeometryError::NegativeRadius`] for `radius < 0`, and
    /// [`GeometryError::NonFinite`] for NaN or infinite input.
    pub fn new(center: Point, radius: Float) -> Result<Self, GeometryError> {
        if !center.is_valid() || !radius.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius(radius));
        }
        Ok(Circle { center, radius })
    }

    /// Center point
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Move the center to `center`
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Move the center by `offset`
    pub fn translate(&mut self, offset: Vector) {
        self.center += offset;
    }

    /// Whether `p` lies inside or on the circle
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}

/// Capsule: every point within `radius` of a segment
///
/// # Examples
///
/// ```
/// use physics2d::geometry::{Point, Stadium};
///
/// let s = Stadium::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0).unwrap();
/// assert!(s.contains(Point::new(50.0, 5.0)));
/// assert!(!s.contains(Point::new(50.0, 15.0)));
/// assert!(s.contains(Point::new(-5.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stadium {
    segment: LineSegment,
    radius: Float,
}

impl Stadium {
    /// Stadium around the segment `beg`–`end`
    ///
    /// # Errors
    ///
    /// [`GeometryError::CoincidentPoints`] for a zero-length axis and
    /// [`GeometryError::NegativeRadius`] for `radius < 0`.
    pub fn new(beg: Point, end: Point, radius: Float) -> Result<Self, GeometryError> {
        if !radius.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius(radius));
        }
        Ok(Stadium {
            segment: LineSegment::new(beg, end)?,
            radius,
        })
    }

    /// First axis endpoint
    pub fn beg(&self) -> Point {
        self.segment.beg()
    }

    /// Second axis endpoint
    pub fn end(&self) -> Point {
        self.segment.end()
    }

    /// Radius around the axis
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// The central axis
    pub fn segment(&self) -> &LineSegment {
        &self.segment
    }

    /// Circle of the stadium's radius centered at the axis point nearest `p`
    pub fn closest_circle(&self, p: Point) -> Circle {
        Circle {
            center: self.segment.closest_point(p),
            radius: self.radius,
        }
    }

    /// Whether `p` lies inside or on the stadium
    pub fn contains(&self, p: Point) -> bool {
        self.closest_circle(p).contains(p)
    }

    /// Unit normal of the axis, a quarter turn counter-clockwise from it
    pub fn normal(&self) -> DirectionVector {
        self.segment.axis().perp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_close(p: Point, q: Point) {
        assert!(p.distance(q) < 1e-9, "{:?} != {:?}", p, q);
    }

    #[test]
    fn test_orthogonal_projection() {
        let origin = Point::new(0.0, 0.0);
        let p = orthogonal_projection(origin, Point::new(10.0, 0.0), Point::new(3.0, 7.0)).unwrap();
        assert_point_close(p, Point::new(3.0, 0.0));

        let q = orthogonal_projection(origin, Point::new(1.0, 1.0), Point::new(2.0, 0.0)).unwrap();
        assert_point_close(q, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_projection_degenerate_line() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(
            orthogonal_projection(p, p, Point::origin()),
            Err(GeometryError::CoincidentPoints)
        );
        assert_eq!(reflection(p, p, Point::origin()), Err(GeometryError::CoincidentPoints));
    }

    #[test]
    fn test_reflection_and_distance() {
        let beg = Point::new(0.0, 1.0);
        let end = Point::new(5.0, 1.0);
        let p = Point::new(2.0, 4.0);
        assert_point_close(reflection(beg, end, p).unwrap(), Point::new(2.0, -2.0));
        assert!((distance_to_line(beg, end, p).unwrap() - 3.0).abs() < 1e-12);
        assert!((distance_squared_to_line(beg, end, p).unwrap() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_lines_intersection_crossing() {
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)).unwrap();
        let l2 = Line::new(Point::new(2.0, -3.0), Point::new(2.0, 5.0)).unwrap();
        let p = lines_intersection(&l1, &l2).point().unwrap();
        assert_point_close(p, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_lines_intersection_parallel() {
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)).unwrap();
        let l2 = Line::new(Point::new(0.0, 1.0), Point::new(4.0, 1.0)).unwrap();
        assert_eq!(lines_intersection(&l1, &l2), LineIntersection::None);
    }

    #[test]
    fn test_lines_intersection_coincident() {
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0)).unwrap();
        let l2 = Line::new(Point::new(-2.0, -2.0), Point::new(-1.0, -1.0)).unwrap();
        let result = lines_intersection(&l1, &l2);
        assert_eq!(
            result,
            LineIntersection::Coincident(Point::new(0.0, 0.0), Point::new(-2.0, -2.0))
        );
        assert!(result.is_coincident());
        assert_eq!(result.point(), None);
    }

    #[test]
    fn test_segments_intersection() {
        let s1 = LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0)).unwrap();
        let s2 = LineSegment::new(Point::new(0.0, 4.0), Point::new(4.0, 0.0)).unwrap();
        assert_point_close(segments_intersection(&s1, &s2).point().unwrap(), Point::new(2.0, 2.0));

        // Lines cross but the segments stop short
        let s3 = LineSegment::new(Point::new(0.0, 4.0), Point::new(1.0, 3.0)).unwrap();
        assert_eq!(segments_intersection(&s1, &s3), LineIntersection::None);

        // Collinear overlapping vs disjoint
        let s4 = LineSegment::new(Point::new(3.0, 3.0), Point::new(6.0, 6.0)).unwrap();
        assert!(segments_intersection(&s1, &s4).is_coincident());
        let s5 = LineSegment::new(Point::new(5.0, 5.0), Point::new(6.0, 6.0)).unwrap();
        assert_eq!(segments_intersection(&s1, &s5), LineIntersection::None);
    }

    #[test]
    fn test_line_queries() {
        let line = Line::new(Point::new(0.0, 1.0), Point::new(2.0, 3.0)).unwrap();
        assert!(line.contains(Point::new(5.0, 6.0)));
        assert!(!line.contains(Point::new(5.0, 5.0)));
        assert!((line.y_for_x(4.0).unwrap() - 5.0).abs() < 1e-12);
        assert!((line.x_for_y(-1.0).unwrap() + 2.0).abs() < 1e-12);
        assert_point_close(line.projection(Point::new(0.0, 3.0)), Point::new(1.0, 2.0));
        assert_point_close(line.reflection(Point::new(0.0, 3.0)), Point::new(2.0, 1.0));

        let horizontal = Line::from_point_vector(Point::origin(), Vector::new(1.0, 0.0)).unwrap();
        assert_eq!(horizontal.x_for_y(1.0), None);
        assert_eq!(horizontal.y_for_x(7.0), Some(0.0));
        assert!(Line::new(Point::origin(), Point::origin()).is_err());
    }

    #[test]
    fn test_segment_contains() {
        let seg = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert!(seg.contains(Point::new(0.0, 0.0)));
        assert!(seg.contains(Point::new(10.0, 0.0)));
        assert!(seg.contains(Point::new(5.0, 0.0)));
        assert!(!seg.contains(Point::new(5.0, 0.1)));
        assert!(!seg.contains(Point::new(-0.5, 0.0)));
        assert!(!seg.contains(Point::new(10.5, 0.0)));
    }

    #[test]
    fn test_segment_closest_point() {
        let seg = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert_point_close(seg.closest_point(Point::new(4.0, 3.0)), Point::new(4.0, 0.0));
        assert_eq!(seg.closest_point(Point::new(-3.0, 3.0)), Point::new(0.0, 0.0));
        assert_eq!(seg.closest_point(Point::new(13.0, -3.0)), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_segment_degenerate() {
        let p = Point::new(3.0, 3.0);
        assert_eq!(LineSegment::new(p, p), Err(GeometryError::CoincidentPoints));
    }

    #[test]
    fn test_circle() {
        let mut c = Circle::new(Point::new(1.0, 1.0), 2.0).unwrap();
        assert!(c.contains(Point::new(3.0, 1.0)));
        assert!(!c.contains(Point::new(3.1, 1.0)));
        c.translate(Vector::new(1.0, 0.0));
        assert!(c.contains(Point::new(3.1, 1.0)));
        assert_eq!(Circle::new(Point::origin(), -1.0), Err(GeometryError::NegativeRadius(-1.0)));
        assert!(Circle::new(Point::origin(), 0.0).is_ok());
    }

    #[test]
    fn test_stadium_contains() {
        let s = Stadium::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0).unwrap();
        assert!(s.contains(Point::new(50.0, 5.0)));
        assert!(!s.contains(Point::new(50.0, 15.0)));
        assert!(s.contains(Point::new(-5.0, 0.0)));
        assert!(!s.contains(Point::new(-11.0, 0.0)));
        assert!(s.contains(Point::new(107.0, 7.0)));
    }

    #[test]
    fn test_stadium_closest_circle_and_normal() {
        let s = Stadium::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0).unwrap();
        let c = s.closest_circle(Point::new(30.0, 40.0));
        assert_point_close(c.center(), Point::new(30.0, 0.0));
        assert_eq!(c.radius(), 10.0);
        assert_eq!(s.closest_circle(Point::new(150.0, 1.0)).center(), Point::new(100.0, 0.0));

        let n = s.normal();
        assert!(n.x().abs() < 1e-12);
        assert!((n.y() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stadium_invalid() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(Stadium::new(p, p, 1.0), Err(GeometryError::CoincidentPoints));
        assert_eq!(
            Stadium::new(p, Point::origin(), -2.0),
            Err(GeometryError::NegativeRadius(-2.0))
        );
    }
}
