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
//! Render interface
//!
//! The engine never talks to a window. Each frame the host takes a
//! [`FrameSnapshot`] from the simulation and hands it, together with its own
//! [`Canvas`] implementation, to [`draw_frame`].

use crate::bodies::{Ball, Color, Wall};
use crate::geometry::{
    lines_intersection, nearly_zero, DirectionVector, Float, Line, LineIntersection, Point,
};

/// Stroke width for outlines
pub const OUTLINE_WIDTH: Float = 1.0;
/// Radius of debug markers
pub const MARKER_RADIUS: Float = 3.0;
/// Color of debug geometry
pub const DEBUG_COLOR: Color = Color::RED;

/// Drawing backend supplied by the host
///
/// Coordinates are world coordinates; the host is responsible for any
/// mapping to device pixels.
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Filled disc
    fn fill_circle(&mut self, center: Point, radius: Float, color: Color);
    /// Circle outline
    fn draw_circle(&mut self, center: Point, radius: Float, color: Color, width: Float);
    /// Straight line
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: Float);
    /// Filled quadrilateral, corners in drawing order
    fn fill_quad(&mut self, corners: [Point; 4], color: Color);
    /// Axis-aligned rectangle outline
    fn draw_rectangle(&mut self, top_left: Point, bottom_right: Point, color: Color, width: Float);
}

/// Read-only view of a ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSnapshot {
    /// Center
    pub center: Point,
    /// Radius
    pub radius: Float,
    /// Fill color
    pub color: Color,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        BallSnapshot {
            center: ball.center(),
            radius: ball.radius(),
            color: ball.color(),
        }
    }
}

/// Read-only view of a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSnapshot {
    /// First endpoint of the axis
    pub beg: Point,
    /// Second endpoint of the axis
    pub end: Point,
    /// Radius around the axis
    pub radius: Float,
    /// Unit perpendicular of the axis
    pub normal: DirectionVector,
    /// Fill color
    pub color: Color,
}

impl From<&Wall> for WallSnapshot {
    fn from(wall: &Wall) -> Self {
        let stadium = wall.stadium();
        WallSnapshot {
            beg: stadium.beg(),
            end: stadium.end(),
            radius: stadium.radius(),
            normal: stadium.normal(),
            color: wall.color(),
        }
    }
}

impl WallSnapshot {
    /// Corners of the rectangular body between the end caps
    pub fn body_corners(&self) -> [Point; 4] {
        let offset = self.normal * self.radius;
        [
            self.beg + offset,
            self.end + offset,
            self.end - offset,
            self.beg - offset,
        ]
    }
}

/// A finite debug segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSegment {
    /// Start
    pub from: Point,
    /// End
    pub to: Point,
}

/// Debug geometry drawn on top of the scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugOverlay {
    /// Finite segments
    pub segments: Vec<DebugSegment>,
    /// Infinite lines, clipped to the viewport when drawn
    pub lines: Vec<Line>,
    /// Point markers
    pub markers: Vec<Point>,
}

impl DebugOverlay {
    /// Empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment
    pub fn push_segment(&mut self, from: Point, to: Point) {
        self.segments.push(DebugSegment { from, to });
    }

    /// Add an infinite line
    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a marker
    pub fn push_marker(&mut self, p: Point) {
        self.markers.push(p);
    }

    /// Add two lines and mark where they cross
    ///
    /// Parallel and coincident lines get no marker.
    pub fn push_intersection(&mut self, line_1: Line, line_2: Line) -> LineIntersection {
        let crossing = lines_intersection(&line_1, &line_2);
        self.push_line(line_1);
        self.push_line(line_2);
        if let LineIntersection::Point(p) = crossing {
            self.push_marker(p);
        }
        crossing
    }

    /// Append everything in `other`
    pub fn extend(&mut self, other: &DebugOverlay) {
        self.segments.extend_from_slice(&other.segments);
        self.lines.extend_from_slice(&other.lines);
        self.markers.extend_from_slice(&other.markers);
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.segments.clear();
        self.lines.clear();
        self.markers.clear();
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.lines.is_empty() && self.markers.is_empty()
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Viewport width
    pub width: Float,
    /// Viewport height
    pub height: Float,
    /// Balls in roster order
    pub balls: Vec<BallSnapshot>,
    /// Walls in roster order
    pub walls: Vec<WallSnapshot>,
    /// Debug geometry
    pub debug: DebugOverlay,
    /// Outline the viewport on top of everything else
    pub show_bounds: bool,
}

/// Clip an infinite line to the viewport `[0, width] × [0, height]`
///
/// Returns the visible segment, or `None` when the line misses the viewport.
/// Uses Liang-Barsky clipping on the line's parametric form.
pub fn clip_line(line: &Line, width: Float, height: Float) -> Option<(Point, Point)> {
    let d = line.direction;
    let p = line.point;
    let mut t_min = Float::NEG_INFINITY;
    let mut t_max = Float::INFINITY;

    let edges = [
        (-d.x(), p.x),
        (d.x(), width - p.x),
        (-d.y(), p.y),
        (d.y(), height - p.y),
    ];
    for (denominator, distance) in edges {
        if nearly_zero(denominator) {
            if distance < 0.0 {
                return None;
            }
            continue;
        }
        let t = distance / denominator;
        if denominator < 0.0 {
            t_min = t_min.max(t);
        } else {
            t_max = t_max.min(t);
        }
    }

    if t_min > t_max {
        return None;
    }
    Some((line.at(t_min), line.at(t_max)))
}

/// Issue the draw calls for one frame
///
/// Walls first, then balls, then the debug overlay and, when requested,
/// the viewport outline.
pub fn draw_frame<C: Canvas + ?Sized>(frame: &FrameSnapshot, canvas: &mut C) {
    canvas.clear(Color::ALICE_BLUE);

    for wall in &frame.walls {
        canvas.fill_quad(wall.body_corners(), wall.color);
        canvas.fill_circle(wall.beg, wall.radius, wall.color);
        canvas.fill_circle(wall.end, wall.radius, wall.color);
    }

    for ball in &frame.balls {
        canvas.fill_circle(ball.center, ball.radius, ball.color);
        canvas.draw_circle(ball.center, ball.radius, Color::BLACK, OUTLINE_WIDTH);
    }

    let debug = &frame.debug;
    for segment in &debug.segments {
        canvas.draw_line(segment.from, segment.to, DEBUG_COLOR, OUTLINE_WIDTH);
    }
    for line in &debug.lines {
        if let Some((from, to)) = clip_line(line, frame.width, frame.height) {
            canvas.draw_line(from, to, DEBUG_COLOR, OUTLINE_WIDTH);
        }
    }
    for &marker in &debug.markers {
        canvas.fill_circle(marker, MARKER_RADIUS, DEBUG_COLOR);
    }

    if frame.show_bounds {
        let corner = Point::new(frame.width, frame.height);
        canvas.draw_rectangle(Point::origin(), corner, DEBUG_COLOR, OUTLINE_WIDTH);
    }
}
