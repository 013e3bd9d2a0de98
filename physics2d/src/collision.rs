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
//! Collision detection and response
//!
//! Collisions are handled in two passes per frame:
//!
//! 1. **Static resolution** removes interpenetration by moving bodies apart
//!    along the line joining their centers. Velocities are untouched.
//! 2. **Dynamic resolution** exchanges momentum along the same line for every
//!    pair the static pass flagged.
//!
//! Ball-vs-wall reuses the ball-vs-ball math through the wall's
//! [`closest circle`](crate::geometry::Stadium::closest_circle) to the ball.
//!
//! # Elastic exchange
//!
//! With `n` the unit vector from body 1 to body 2 and `t = perp(n)`, the
//! tangential components pass through and the normal components become
//!
//! ```text
//! v1n' = (m1·v1n + m2·v2n + m2·rf·(v2n − v1n)) / (m1 + m2)
//! v2n' = (m1·v1n + m2·v2n + m1·rf·(v1n − v2n)) / (m1 + m2)
//! ```
//!
//! where `rf` is the coefficient of restitution.
//!
//! Pairs are visited in index order and resolved once each; there is no
//! iterative solver, so stacks of three or more overlapping bodies may
//! keep a small residual overlap for a frame.

use crate::bodies::{Ball, Wall};
use crate::geometry::{dot, DirectionVector, Float, Point, Vector};
use tracing::trace;

/// Mass of the stand-in body used by [`WallResponse::HeavyBall`]
pub const DEFAULT_WALL_PROXY_MASS: Float = 10_000.0;

/// How a wall responds in dynamic resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WallResponse {
    /// Wall of infinite mass: the ball's normal velocity becomes `−rf·vn`
    #[default]
    Exact,
    /// Wall stands in as a resting ball of the given mass
    ///
    /// Numerically inexact; a heavy enough ball can push through.
    HeavyBall {
        /// Mass of the stand-in ball
        mass: Float,
    },
}

/// Geometry of one resolved overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit normal from the first body toward the second
    pub normal: DirectionVector,
    /// Overlap depth removed by the static pass
    pub depth: Float,
    /// Touching point after separation
    pub point: Point,
}

/// Which bodies are involved in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPair {
    /// Two balls, `a < b`
    BallBall {
        /// Index of the first ball
        a: usize,
        /// Index of the second ball
        b: usize,
    },
    /// A ball against a wall
    BallWall {
        /// Index of the ball
        ball: usize,
        /// Index of the wall
        wall: usize,
    },
}

/// A pair that overlapped during this frame's static pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The bodies involved
    pub pair: ContactPair,
    /// Overlap geometry
    pub penetration: Penetration,
}

/// Unit vector from `from` toward `to`, or `fallback` when they coincide
fn collision_axis(from: Point, to: Point, fallback: DirectionVector) -> DirectionVector {
    match Vector::between(from, to).normalize() {
        Ok(axis) => axis,
        Err(_) => {
            trace!(x = from.x, y = from.y, "coincident centers, using fallback axis");
            fallback
        }
    }
}

/// Borrow two distinct balls mutably
///
/// # Panics
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    assert_ne!(i, j, "cannot borrow the same ball twice");
    if i < j {
        let (left, right) = balls.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = balls.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Push two overlapping balls apart
///
/// Each ball moves in proportion to the other's mass, so the mass-weighted
/// center is preserved and the total separation equals the overlap depth.
/// Returns `None` when the balls do not touch.
///
/// # Examples
///
/// ```
/// use physics2d::bodies::Ball;
/// use physics2d::collision::resolve_static_ball_ball;
/// use physics2d::geometry::Point;
///
/// let mut a = Ball::new(Point::new(0.0, 0.0), 10.0, 1.0).unwrap();
/// let mut b = Ball::new(Point::new(15.0, 0.0), 10.0, 1.0).unwrap();
/// let hit = resolve_static_ball_ball(&mut a, &mut b).unwrap();
/// assert_eq!(hit.depth, 5.0);
/// assert_eq!(a.center().distance(b.center()), 20.0);
/// ```
pub fn resolve_static_ball_ball(ball_1: &mut Ball, ball_2: &mut Ball) -> Option<Penetration> {
    let dist = ball_1.center().distance(ball_2.center());
    let reach = ball_1.radius() + ball_2.radius();
    if dist > reach {
        return None;
    }

    let normal = collision_axis(ball_1.center(), ball_2.center(), DirectionVector::unit_x());
    let depth = reach - dist;
    let mass_ratio = ball_1.mass() / (ball_1.mass() + ball_2.mass());

    ball_2.translate(normal * (mass_ratio * depth));
    ball_1.translate(normal * (-(1.0 - mass_ratio) * depth));

    Some(Penetration {
        normal,
        depth,
        point: ball_1.center() + normal * ball_1.radius(),
    })
}

/// Push a ball out of a wall
///
/// The wall is immovable, so the ball alone moves by the full depth, away
/// from the wall's closest circle. Returns `None` when they do not touch.
pub fn resolve_static_wall_ball(wall: &Wall, ball: &mut Ball) -> Option<Penetration> {
    let proxy = wall.closest_circle(ball.center());
    let dist = proxy.center().distance(ball.center());
    let reach = proxy.radius() + ball.radius();
    if dist > reach {
        return None;
    }

    let normal = collision_axis(proxy.center(), ball.center(), wall.stadium().normal());
    let depth = reach - dist;
    ball.translate(normal * depth);

    Some(Penetration {
        normal,
        depth,
        point: proxy.center() + normal * proxy.radius(),
    })
}

/// One-dimensional two-body exchange with restitution `rf`
///
/// Returns the post-collision normal velocities `(v1n', v2n')`.
pub fn exchange_normal_velocities(
    m1: Float,
    v1n: Float,
    m2: Float,
    v2n: Float,
    restitution: Float,
) -> (Float, Float) {
    let total = m1 + m2;
    let momentum = m1 * v1n + m2 * v2n;
    let v1 = (momentum + m2 * restitution * (v2n - v1n)) / total;
    let v2 = (momentum + m1 * restitution * (v1n - v2n)) / total;
    (v1, v2)
}

/// Exchange momentum between two balls along their center line
///
/// Tangential components pass through unchanged. Intended for pairs the
/// static pass flagged; it does not check that the balls touch.
pub fn resolve_dynamic_ball_ball(ball_1: &mut Ball, ball_2: &mut Ball, restitution: Float) {
    let n = collision_axis(ball_1.center(), ball_2.center(), DirectionVector::unit_x());
    let t = n.perp();
    let (n, t) = (n.as_vector(), t.as_vector());

    let (v1, v2) = (ball_1.velocity(), ball_2.velocity());
    let (v1n, v1t) = (dot(n, v1), dot(t, v1));
    let (v2n, v2t) = (dot(n, v2), dot(t, v2));

    let (v1n_after, v2n_after) =
        exchange_normal_velocities(ball_1.mass(), v1n, ball_2.mass(), v2n, restitution);

    ball_1.set_velocity(n * v1n_after + t * v1t);
    ball_2.set_velocity(n * v2n_after + t * v2t);
}

/// Bounce a ball off a wall
///
/// The collision normal runs from the wall's closest circle to the ball.
pub fn resolve_dynamic_wall_ball(
    wall: &Wall,
    ball: &mut Ball,
    restitution: Float,
    response: WallResponse,
) {
    let proxy = wall.closest_circle(ball.center());
    let n = collision_axis(proxy.center(), ball.center(), wall.stadium().normal());
    let (n, t) = (n.as_vector(), n.perp().as_vector());

    let v = ball.velocity();
    let (vn, vt) = (dot(n, v), dot(t, v));

    let vn_after = match response {
        WallResponse::Exact => -restitution * vn,
        WallResponse::HeavyBall { mass } => {
            exchange_normal_velocities(mass, 0.0, ball.mass(), vn, restitution).1
        }
    };

    ball.set_velocity(n * vn_after + t * vt);
}

/// Static pass over every ball pair, then every ball-wall pair
///
/// Returns the contacts in the order they were resolved.
pub fn detect_and_separate(balls: &mut [Ball], walls: &[Wall]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for a in 0..balls.len() {
        for b in (a + 1)..balls.len() {
            let (ball_a, ball_b) = pair_mut(balls, a, b);
            if let Some(penetration) = resolve_static_ball_ball(ball_a, ball_b) {
                trace!(a, b, depth = penetration.depth, "ball-ball overlap");
                contacts.push(Contact {
                    pair: ContactPair::BallBall { a, b },
                    penetration,
                });
            }
        }
    }

    for (ball_index, ball) in balls.iter_mut().enumerate() {
        for (wall_index, wall) in walls.iter().enumerate() {
            if let Some(penetration) = resolve_static_wall_ball(wall, ball) {
                trace!(
                    ball = ball_index,
                    wall = wall_index,
                    depth = penetration.depth,
                    "ball-wall overlap"
                );
                contacts.push(Contact {
                    pair: ContactPair::BallWall {
                        ball: ball_index,
                        wall: wall_index,
                    },
                    penetration,
                });
            }
        }
    }

    contacts
}

/// Dynamic pass over the contacts flagged by [`detect_and_separate`]
pub fn resolve_contacts(
    balls: &mut [Ball],
    walls: &[Wall],
    contacts: &[Contact],
    restitution: Float,
    wall_response: WallResponse,
) {
    for contact in contacts {
        match contact.pair {
            ContactPair::BallBall { a, b } => {
                let (ball_a, ball_b) = pair_mut(balls, a, b);
                resolve_dynamic_ball_ball(ball_a, ball_b, restitution);
            }
            ContactPair::BallWall { ball, wall } => {
                let wall = &walls[wall];
                resolve_dynamic_wall_ball(wall, &mut balls[ball], restitution, wall_response);
            }
        }
    }
}
