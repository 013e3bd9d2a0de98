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
//! # physics2d
//!
//! A 2D geometry algebra layer and a rigid-body collision pipeline driving
//! a bouncing-ball simulation.
//!
//! ## Features
//!
//! - **Geometry**: vectors, points, unit directions, 2x2 transforms, lines,
//!   segments, circles and capsule-shaped stadiums
//! - **Bodies**: non-rotating balls and immovable walls
//! - **Collision**: positional separation followed by impulse exchange with
//!   restitution
//! - **Rendering hooks**: read-only frame snapshots drawn through a
//!   host-supplied [`Canvas`](render::Canvas)
//!
//! ## Example
//!
//! ```rust
//! use physics2d::{Ball, Point, Simulation, SimulationConfig, Vector};
//!
//! let mut sim = Simulation::new(SimulationConfig::without_gravity()).unwrap();
//! let left = Ball::new(Point::new(0.0, 0.0), 10.0, 1.0).unwrap();
//! let right = Ball::new(Point::new(20.5, 0.0), 10.0, 1.0).unwrap();
//! sim.add_ball(left.with_velocity(Vector::new(10.0, 0.0)));
//! sim.add_ball(right.with_velocity(Vector::new(-10.0, 0.0)));
//!
//! let report = sim.step(0.05).unwrap();
//! assert_eq!(report.contacts.len(), 1);
//! assert!(sim.balls()[0].velocity().x < 0.0);
//! ```

#![warn(missing_docs)]

/// Rigid bodies
pub mod bodies;

/// Collision detection and response
pub mod collision;

/// Simulation and scene configuration
pub mod config;

/// Error types
pub mod error;

/// Per-frame accelerations
pub mod forces;

/// Vector algebra and geometric primitives
pub mod geometry;

/// Pointer input handling
pub mod input;

/// Numerical integration methods
pub mod integration;

/// Render snapshots and the canvas interface
pub mod render;

/// Random scene setup
pub mod scene;

/// Frame loop
pub mod simulation;

pub use bodies::{Ball, Color, Wall};
pub use config::{SceneConfig, SimulationConfig};
pub use error::{BodyError, GeometryError, SimulationError};
pub use geometry::{DirectionVector, Float, Point, Vector};
pub use simulation::{Simulation, StepReport};
