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
//! End-to-end tests of the frame loop

use physics2d::forces::ForceProvider;
use physics2d::geometry::Line;
use physics2d::input::{PointerButton, PointerEvent};
use physics2d::integration::{total_kinetic_energy, total_momentum};
use physics2d::render::{draw_frame, Canvas};
use physics2d::{
    Ball, Color, Float, Point, SceneConfig, Simulation, SimulationConfig, SimulationError, Vector,
    Wall,
};

#[derive(Default)]
struct CountingCanvas {
    clears: usize,
    discs: usize,
    outlines: usize,
    lines: Vec<(Point, Point)>,
    quads: usize,
    rectangles: usize,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self, _: Color) {
        self.clears += 1;
    }
    fn fill_circle(&mut self, _: Point, _: Float, _: Color) {
        self.discs += 1;
    }
    fn draw_circle(&mut self, _: Point, _: Float, _: Color, _: Float) {
        self.outlines += 1;
    }
    fn draw_line(&mut self, from: Point, to: Point, _: Color, _: Float) {
        self.lines.push((from, to));
    }
    fn fill_quad(&mut self, _: [Point; 4], _: Color) {
        self.quads += 1;
    }
    fn draw_rectangle(&mut self, _: Point, _: Point, _: Color, _: Float) {
        self.rectangles += 1;
    }
}

fn boxed_config() -> SimulationConfig {
    SimulationConfig {
        width: 400.0,
        height: 400.0,
        restitution: 0.8,
        ..SimulationConfig::default()
    }
}

fn boxed_simulation(config: SimulationConfig) -> Simulation {
    let scene = SceneConfig {
        ball_count: 6,
        width: config.width,
        height: config.height,
        interior_walls: false,
        ..SceneConfig::default()
    };
    Simulation::from_scene_config(config, &scene).unwrap()
}

#[test]
fn test_balls_stay_inside_the_box() {
    let mut sim = boxed_simulation(boxed_config());
    for _ in 0..600 {
        sim.step(1.0 / 60.0).unwrap();
    }
    for ball in sim.balls() {
        let c = ball.center();
        assert!(ball.is_valid());
        assert!(c.x > 0.0 && c.x < 400.0, "ball escaped at {:?}", c);
        assert!(c.y > 0.0 && c.y < 400.0, "ball escaped at {:?}", c);
    }
}

#[test]
fn test_zero_gravity_elastic_momentum_without_walls() {
    let mut sim = Simulation::new(SimulationConfig::without_gravity()).unwrap();
    for i in 0..6 {
        let x = i as Float * 30.0;
        sim.add_ball(
            Ball::new(Point::new(x, 0.0), 10.0, 1.0 + i as Float)
                .unwrap()
                .with_velocity(Vector::new(if i % 2 == 0 { 20.0 } else { -20.0 }, 0.0)),
        );
    }
    let momentum_before = total_momentum(sim.balls());
    let energy_before = total_kinetic_energy(sim.balls());

    for _ in 0..200 {
        sim.step(0.01).unwrap();
    }

    let momentum_after = total_momentum(sim.balls());
    assert!((momentum_after - momentum_before).length() < 1e-6);
    let energy_after = total_kinetic_energy(sim.balls());
    assert!((energy_after - energy_before).abs() < 1e-6 * energy_before);
}

#[test]
fn test_inelastic_floor_settles() {
    let config = SimulationConfig {
        restitution: 0.5,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.add_wall(Wall::new(Point::new(0.0, 500.0), Point::new(800.0, 500.0), 5.0).unwrap());
    sim.add_ball(Ball::new(Point::new(400.0, 300.0), 20.0, 1.0).unwrap());

    for _ in 0..1200 {
        sim.step(1.0 / 60.0).unwrap();
    }

    let ball = &sim.balls()[0];
    assert!((ball.center().y - 475.0).abs() < 1.0);
    assert!(ball.velocity().length() < 10.0);
}

/// Constant sideways push
struct Wind(Vector);

impl ForceProvider for Wind {
    fn compute_acceleration(&self, _ball: &Ball) -> Option<Vector> {
        Some(self.0)
    }

    fn name(&self) -> &str {
        "Wind"
    }
}

#[test]
fn test_host_force_provider_is_applied_every_frame() {
    let mut sim = Simulation::new(SimulationConfig::without_gravity()).unwrap();
    sim.add_force(Box::new(Wind(Vector::new(30.0, 0.0))));
    sim.add_ball(Ball::new(Point::origin(), 5.0, 1.0).unwrap());
    for _ in 0..60 {
        sim.step(1.0 / 60.0).unwrap();
    }
    let ball = &sim.balls()[0];
    assert!((ball.velocity().x - 30.0).abs() < 1e-9);
    assert!((ball.center().x - 15.0).abs() < 1e-9);
    assert_eq!(ball.velocity().y, 0.0);
}

#[test]
fn test_invalid_timestep_is_an_error() {
    let mut sim = boxed_simulation(boxed_config());
    assert!(matches!(sim.step(-0.1), Err(SimulationError::InvalidTimestep(_))));
    assert!(matches!(
        sim.step(Float::INFINITY),
        Err(SimulationError::InvalidTimestep(_))
    ));
}

#[test]
fn test_drag_and_drop_then_release() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    sim.add_ball(Ball::new(Point::new(100.0, 100.0), 10.0, 1.0).unwrap());

    sim.push_pointer_event(PointerEvent::pressed(Point::new(102.0, 98.0), PointerButton::Left));
    sim.step(1.0 / 60.0).unwrap();
    sim.push_pointer_event(PointerEvent::moved(Point::new(300.0, 50.0)));
    sim.step(1.0 / 60.0).unwrap();
    assert_eq!(sim.balls()[0].center(), Point::new(300.0, 50.0));

    sim.push_pointer_event(PointerEvent::released(Point::new(300.0, 50.0), PointerButton::Left));
    sim.step(1.0 / 60.0).unwrap();
    assert_eq!(sim.grab(), None);
    // Released: gravity takes over
    assert!(sim.balls()[0].velocity().y > 0.0);
}

#[test]
fn test_frame_draw_calls() {
    let sim = boxed_simulation(boxed_config());
    let frame = sim.frame();
    assert_eq!(frame.balls.len(), 6);
    assert_eq!(frame.walls.len(), 4);

    let mut canvas = CountingCanvas::default();
    draw_frame(&frame, &mut canvas);
    assert_eq!(canvas.clears, 1);
    assert_eq!(canvas.quads, 4);
    assert_eq!(canvas.discs, 4 * 2 + 6);
    assert_eq!(canvas.outlines, 6);
    assert!(canvas.lines.is_empty());
    assert_eq!(canvas.rectangles, 0);
}

#[test]
fn test_host_line_is_drawn_clipped_to_the_viewport() {
    let mut sim = boxed_simulation(boxed_config());
    let diagonal = Line::new(Point::new(10.0, 10.0), Point::new(20.0, 20.0)).unwrap();
    sim.debug_overlay_mut().push_line(diagonal);
    sim.step(1.0 / 60.0).unwrap();

    let mut canvas = CountingCanvas::default();
    draw_frame(&sim.frame(), &mut canvas);
    assert_eq!(canvas.lines.len(), 1);
    let (from, to) = canvas.lines[0];
    assert!(from.distance(Point::new(0.0, 0.0)) < 1e-9, "{:?}", from);
    assert!(to.distance(Point::new(400.0, 400.0)) < 1e-9, "{:?}", to);
}

#[test]
fn test_debug_mode_outlines_the_viewport() {
    let config = SimulationConfig {
        debug_contacts: true,
        ..boxed_config()
    };
    let sim = boxed_simulation(config);
    let mut canvas = CountingCanvas::default();
    draw_frame(&sim.frame(), &mut canvas);
    assert_eq!(canvas.rectangles, 1);
}
