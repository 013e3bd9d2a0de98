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
//! Random scene setup
//!
//! Builds the initial roster for a bouncing-ball scene from a
//! [`SceneConfig`]. Generation is deterministic for a given seed.

use crate::bodies::{Ball, Color, Wall};
use crate::config::SceneConfig;
use crate::error::SimulationError;
use crate::geometry::{Float, Point, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Placement attempts per ball before accepting an overlapping position
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Initial bodies of a simulation
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Dynamic bodies
    pub balls: Vec<Ball>,
    /// Static bodies
    pub walls: Vec<Wall>,
}

/// Walls framing a `width × height` viewport
pub fn border_walls(
    width: Float,
    height: Float,
    radius: Float,
) -> Result<Vec<Wall>, SimulationError> {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    let mut walls = Vec::with_capacity(corners.len());
    for (i, &beg) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()];
        walls.push(Wall::new(beg, end, radius)?);
    }
    Ok(walls)
}

fn interior_walls(
    width: Float,
    height: Float,
    radius: Float,
) -> Result<Vec<Wall>, SimulationError> {
    Ok(vec![
        Wall::new(
            Point::new(width * 0.2, height * 0.35),
            Point::new(width * 0.45, height * 0.5),
            radius,
        )?,
        Wall::new(
            Point::new(width * 0.55, height * 0.7),
            Point::new(width * 0.8, height * 0.55),
            radius,
        )?,
    ])
}

fn overlaps(center: Point, radius: Float, balls: &[Ball], walls: &[Wall]) -> bool {
    let hits_ball = balls
        .iter()
        .any(|b| b.center().distance(center) < b.radius() + radius);
    let hits_wall = walls.iter().any(|w| {
        let proxy = w.closest_circle(center);
        proxy.center().distance(center) < proxy.radius() + radius
    });
    hits_ball || hits_wall
}

fn random_color(rng: &mut StdRng) -> Color {
    Color::rgb(
        rng.gen_range(0.2..=0.9),
        rng.gen_range(0.2..=0.9),
        rng.gen_range(0.2..=0.9),
    )
}

/// Build walls and randomly placed balls
///
/// Balls get a random radius in the configured range, mass proportional to
/// the radius, a random color and a random velocity. Each ball is placed
/// away from earlier bodies when a free spot is found within
/// [`MAX_PLACEMENT_ATTEMPTS`] tries; otherwise the last candidate is kept and
/// the first static pass separates it.
///
/// # Errors
///
/// [`SimulationError::InvalidConfig`] when the configuration does not
/// validate.
pub fn build_scene(config: &SceneConfig) -> Result<Scene, SimulationError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut walls = Vec::new();
    if config.border_walls {
        walls.extend(border_walls(config.width, config.height, config.wall_radius)?);
    }
    if config.interior_walls {
        walls.extend(interior_walls(config.width, config.height, config.wall_radius)?);
    }

    let mut balls: Vec<Ball> = Vec::with_capacity(config.ball_count);
    for index in 0..config.ball_count {
        let radius = rng.gen_range(config.min_radius..=config.max_radius);
        let margin = radius + config.wall_radius;

        let mut center = Point::origin();
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            center = Point::new(
                rng.gen_range(margin..=config.width - margin),
                rng.gen_range(margin..=config.height - margin),
            );
            if !overlaps(center, radius, &balls, &walls) {
                placed = true;
                break;
            }
        }
        if !placed {
            debug!(ball = index, "no free spot found, accepting overlap");
        }

        let velocity = Vector::new(
            rng.gen_range(-config.max_speed..=config.max_speed),
            rng.gen_range(-config.max_speed..=config.max_speed),
        );
        let ball = Ball::new(center, radius, radius * config.mass_per_radius)?
            .with_velocity(velocity)
            .with_color(random_color(&mut rng));
        balls.push(ball);
    }

    debug!(balls = balls.len(), walls = walls.len(), seed = config.seed, "scene built");
    Ok(Scene { balls, walls })
}
