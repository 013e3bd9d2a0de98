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
//! Frame loop
//!
//! [`Simulation`] owns the roster and advances it one frame at a time:
//!
//! 1. drain queued pointer events
//! 2. accumulate accelerations from the force registry
//! 3. integrate
//! 4. static pass ([`detect_and_separate`])
//! 5. dynamic pass ([`resolve_contacts`])
//!
//! Rendering reads the result through [`Simulation::frame`]. Debug geometry
//! comes from two overlays: one rebuilt every step from contacts and the
//! aiming cue, and one owned by the host through
//! [`Simulation::debug_overlay_mut`] that persists until the host clears it.
//!
//! # Examples
//!
//! ```
//! use physics2d::bodies::{Ball, Wall};
//! use physics2d::config::SimulationConfig;
//! use physics2d::geometry::Point;
//! use physics2d::simulation::Simulation;
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! sim.add_wall(Wall::new(Point::new(0.0, 500.0), Point::new(800.0, 500.0), 5.0).unwrap());
//! sim.add_ball(Ball::new(Point::new(400.0, 100.0), 20.0, 1.0).unwrap());
//!
//! for _ in 0..120 {
//!     sim.step(1.0 / 60.0).unwrap();
//! }
//! assert!(sim.balls()[0].center().y < 500.0);
//! ```

use crate::bodies::{Ball, Wall};
use crate::collision::{detect_and_separate, resolve_contacts, Contact};
use crate::config::{SceneConfig, SimulationConfig};
use crate::error::SimulationError;
use crate::forces::{ForceProvider, ForceRegistry, UniformGravity};
use crate::geometry::{Float, Point};
use crate::input::{Grab, PointerController, PointerEvent};
use crate::integration::{validate_timestep, Integrator, VelocityVerletIntegrator};
use crate::render::{BallSnapshot, DebugOverlay, FrameSnapshot, WallSnapshot};
use crate::scene::{build_scene, Scene};
use tracing::debug;

/// Length of the contact normals drawn in the debug overlay
pub const DEBUG_NORMAL_LENGTH: Float = 20.0;

/// Outcome of one [`Simulation::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Frame time actually integrated, after clamping
    pub dt: Float,
    /// Balls whose state stayed finite through integration
    pub integrated: usize,
    /// Contacts flagged by the static pass, in resolution order
    pub contacts: Vec<Contact>,
    /// Ball shot by the pointer this frame
    pub shot: Option<usize>,
}

/// Bouncing-ball simulation
pub struct Simulation {
    config: SimulationConfig,
    balls: Vec<Ball>,
    walls: Vec<Wall>,
    forces: ForceRegistry,
    integrator: VelocityVerletIntegrator,
    pointer: PointerController,
    debug: DebugOverlay,
    host_debug: DebugOverlay,
    frame_count: u64,
    elapsed: Float,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("balls", &self.balls.len())
            .field("walls", &self.walls.len())
            .field("forces", &self.forces)
            .field("integrator", &self.integrator.name())
            .field("frame_count", &self.frame_count)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

impl Simulation {
    /// Empty simulation
    ///
    /// Registers [`UniformGravity`] when `config.gravity` is non-zero.
    ///
    /// # Errors
    ///
    /// Propagates [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut forces = ForceRegistry::new();
        forces.max_acceleration = config.max_acceleration;
        if config.gravity.length_squared() > 0.0 {
            forces.register_provider(Box::new(UniformGravity::new(config.gravity)));
        }
        Ok(Simulation {
            config,
            balls: Vec::new(),
            walls: Vec::new(),
            forces,
            integrator: VelocityVerletIntegrator::new(),
            pointer: PointerController::new(),
            debug: DebugOverlay::new(),
            host_debug: DebugOverlay::new(),
            frame_count: 0,
            elapsed: 0.0,
        })
    }

    /// Simulation seeded with a prepared scene
    pub fn with_scene(config: SimulationConfig, scene: Scene) -> Result<Self, SimulationError> {
        let mut sim = Self::new(config)?;
        sim.balls = scene.balls;
        sim.walls = scene.walls;
        Ok(sim)
    }

    /// Simulation seeded with a random scene
    pub fn from_scene_config(
        config: SimulationConfig,
        scene: &SceneConfig,
    ) -> Result<Self, SimulationError> {
        Self::with_scene(config, build_scene(scene)?)
    }

    /// Add a ball to the roster, returning its index
    pub fn add_ball(&mut self, ball: Ball) -> usize {
        self.balls.push(ball);
        self.balls.len() - 1
    }

    /// Add a wall, returning its index
    pub fn add_wall(&mut self, wall: Wall) -> usize {
        self.walls.push(wall);
        self.walls.len() - 1
    }

    /// Register an additional acceleration source
    pub fn add_force(&mut self, provider: Box<dyn ForceProvider>) {
        self.forces.register_provider(provider);
    }

    /// Queue a pointer event for the next step
    pub fn push_pointer_event(&mut self, event: PointerEvent) {
        self.pointer.push(event);
    }

    /// Current configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Balls in roster order
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Walls in roster order
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Registered force providers
    pub fn forces(&self) -> &ForceRegistry {
        &self.forces
    }

    /// Name of the integrator
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Host-owned debug geometry
    pub fn debug_overlay(&self) -> &DebugOverlay {
        &self.host_debug
    }

    /// Mutable access to the host-owned debug geometry
    ///
    /// Lines, segments and markers added here are drawn every frame, on
    /// top of the scene and under the per-step contact overlay, until the
    /// host clears them.
    pub fn debug_overlay_mut(&mut self) -> &mut DebugOverlay {
        &mut self.host_debug
    }

    /// Ball currently held or aimed by the pointer
    pub fn grab(&self) -> Option<Grab> {
        self.pointer.grab()
    }

    /// Number of completed steps
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated time in seconds
    pub fn elapsed(&self) -> Float {
        self.elapsed
    }

    /// Advance by one frame of `dt` seconds
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidTimestep`] for negative or non-finite `dt`;
    /// nothing is advanced in that case, and queued events stay queued.
    pub fn step(&mut self, dt: Float) -> Result<StepReport, SimulationError> {
        let dt = validate_timestep(dt, self.config.max_timestep)?;

        let shot = self.pointer.process(&mut self.balls, self.config.launch_gain);
        self.pointer.pin_held(&mut self.balls);

        self.forces.apply(&mut self.balls);
        if let Some(Grab::Holding(index)) = self.pointer.grab() {
            if let Some(ball) = self.balls.get_mut(index) {
                ball.clear_acceleration();
            }
        }
        let integrated = self.integrator.integrate(&mut self.balls, dt);

        let contacts = detect_and_separate(&mut self.balls, &self.walls);
        resolve_contacts(
            &mut self.balls,
            &self.walls,
            &contacts,
            self.config.restitution,
            self.config.wall_response,
        );

        self.rebuild_debug_overlay(&contacts);
        self.frame_count += 1;
        self.elapsed += dt;
        debug!(frame = self.frame_count, dt, contacts = contacts.len(), "step");

        Ok(StepReport {
            dt,
            integrated,
            contacts,
            shot,
        })
    }

    fn rebuild_debug_overlay(&mut self, contacts: &[Contact]) {
        self.debug.clear();
        if let Some(Grab::Aiming(index)) = self.pointer.grab() {
            if let Some(ball) = self.balls.get(index) {
                self.debug.push_segment(ball.center(), self.pointer.position());
            }
        }
        if !self.config.debug_contacts {
            return;
        }
        for contact in contacts {
            let p = contact.penetration.point;
            let tip: Point = p + contact.penetration.normal * DEBUG_NORMAL_LENGTH;
            self.debug.push_segment(p, tip);
            self.debug.push_marker(p);
        }
    }

    /// Read-only snapshot for rendering
    pub fn frame(&self) -> FrameSnapshot {
        let mut debug = self.host_debug.clone();
        debug.extend(&self.debug);
        FrameSnapshot {
            width: self.config.width,
            height: self.config.height,
            balls: self.balls.iter().map(BallSnapshot::from).collect(),
            walls: self.walls.iter().map(WallSnapshot::from).collect(),
            debug,
            show_bounds: self.config.debug_contacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Vector};
    use crate::input::PointerButton;

    fn zero_g() -> Simulation {
        Simulation::new(SimulationConfig::without_gravity()).unwrap()
    }

    #[test]
    fn test_new_registers_gravity() {
        let sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.forces().provider_count(), 1);
        assert_eq!(zero_g().forces().provider_count(), 0);
        assert_eq!(sim.integrator_name(), "Velocity Verlet");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            restitution: 2.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_timestep_leaves_state_untouched() {
        let mut sim = zero_g();
        let ball = Ball::new(Point::new(0.0, 0.0), 1.0, 1.0).unwrap();
        sim.add_ball(ball.with_velocity(Vector::new(1.0, 0.0)));
        assert_eq!(sim.step(-1.0), Err(SimulationError::InvalidTimestep(-1.0)));
        assert!(sim.step(Float::NAN).is_err());
        assert_eq!(sim.balls()[0].center(), Point::new(0.0, 0.0));
        assert_eq!(sim.frame_count(), 0);
    }

    #[test]
    fn test_large_timestep_clamped() {
        let mut sim = zero_g();
        let max = sim.config().max_timestep;
        let report = sim.step(10.0).unwrap();
        assert_eq!(report.dt, max);
        assert_eq!(sim.elapsed(), max);
    }

    #[test]
    fn test_step_reports_contacts() {
        let mut sim = zero_g();
        sim.add_ball(Ball::new(Point::new(0.0, 0.0), 10.0, 1.0).unwrap());
        sim.add_ball(Ball::new(Point::new(15.0, 0.0), 10.0, 1.0).unwrap());
        let report = sim.step(0.0).unwrap();
        assert_eq!(report.contacts.len(), 1);
        assert_eq!(report.integrated, 2);
        let gap = sim.balls()[0].center().distance(sim.balls()[1].center());
        assert!((gap - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_debug_overlay_follows_contacts() {
        let config = SimulationConfig {
            debug_contacts: true,
            ..SimulationConfig::without_gravity()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.add_ball(Ball::new(Point::new(0.0, 0.0), 10.0, 1.0).unwrap());
        sim.add_ball(Ball::new(Point::new(15.0, 0.0), 10.0, 1.0).unwrap());
        sim.step(0.0).unwrap();

        let frame = sim.frame();
        assert_eq!(frame.debug.segments.len(), 1);
        assert_eq!(frame.debug.markers.len(), 1);
        assert!(frame.debug.markers[0].distance(Point::new(7.5, 0.0)) < 1e-9);

        // Touching balls still count as a contact, with zero depth
        let report = sim.step(0.0).unwrap();
        assert_eq!(report.contacts.len(), 1);
        assert!(report.contacts[0].penetration.depth.abs() < 1e-9);

        sim.balls[1].translate(Vector::new(10.0, 0.0));
        sim.step(0.0).unwrap();
        assert!(sim.frame().debug.is_empty());
        assert!(sim.frame().show_bounds);
    }

    #[test]
    fn test_host_overlay_survives_steps() {
        let mut sim = zero_g();
        let l1 = Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        let l2 = Line::new(Point::new(0.0, 600.0), Point::new(1.0, 599.0)).unwrap();
        sim.debug_overlay_mut().push_intersection(l1, l2);
        sim.add_ball(Ball::new(Point::new(100.0, 100.0), 10.0, 1.0).unwrap());
        let grip = Point::new(100.0, 100.0);
        sim.push_pointer_event(PointerEvent::pressed(grip, PointerButton::Right));
        sim.push_pointer_event(PointerEvent::moved(Point::new(50.0, 100.0)));

        for _ in 0..3 {
            sim.step(1.0 / 60.0).unwrap();
        }
        let frame = sim.frame();
        assert_eq!(frame.debug.lines.len(), 2);
        assert_eq!(frame.debug.markers.len(), 1);
        assert!(frame.debug.markers[0].distance(Point::new(300.0, 300.0)) < 1e-9);
        // Aiming cue from the per-step overlay
        assert_eq!(frame.debug.segments.len(), 1);
        assert!(!frame.show_bounds);

        sim.debug_overlay_mut().clear();
        assert!(sim.debug_overlay().is_empty());
        assert_eq!(sim.frame().debug.lines.len(), 0);
    }

    #[test]
    fn test_held_ball_ignores_gravity() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        sim.add_ball(Ball::new(Point::new(100.0, 100.0), 10.0, 1.0).unwrap());
        let grip = Point::new(100.0, 100.0);
        sim.push_pointer_event(PointerEvent::pressed(grip, PointerButton::Left));
        sim.push_pointer_event(PointerEvent::moved(Point::new(200.0, 150.0)));
        sim.step(0.016).unwrap();

        assert_eq!(sim.grab(), Some(Grab::Holding(0)));
        assert_eq!(sim.balls()[0].center(), Point::new(200.0, 150.0));
        assert_eq!(sim.balls()[0].velocity(), Vector::zero());
    }

    #[test]
    fn test_aiming_draws_cue() {
        let mut sim = zero_g();
        sim.add_ball(Ball::new(Point::new(100.0, 100.0), 10.0, 1.0).unwrap());
        let grip = Point::new(100.0, 100.0);
        sim.push_pointer_event(PointerEvent::pressed(grip, PointerButton::Right));
        sim.push_pointer_event(PointerEvent::moved(Point::new(50.0, 100.0)));
        sim.step(0.0).unwrap();
        assert_eq!(sim.frame().debug.segments.len(), 1);

        let cue = Point::new(50.0, 100.0);
        sim.push_pointer_event(PointerEvent::released(cue, PointerButton::Right));
        let report = sim.step(0.0).unwrap();
        assert_eq!(report.shot, Some(0));
        let gain = sim.config().launch_gain;
        assert_eq!(sim.balls()[0].velocity(), Vector::new(50.0 * gain, 0.0));
    }
}
