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
//! Headless bouncing-ball demo
//!
//! Runs a random scene at a fixed 60 Hz frame rate and draws every frame
//! onto a canvas that only counts draw calls. Halfway through, a scripted
//! pointer picks up the first ball and later shoots the second one. With
//! `--debug` the frame also carries contact normals, the viewport outline
//! and the two viewport diagonals with their crossing marked.
//!
//! # Running
//!
//! ```bash
//! # Default scene: 20 balls, 10 seconds
//! cargo run --example bouncing_balls --release
//!
//! # Bigger scene with contact debugging and per-step logs
//! RUST_LOG=physics2d=debug cargo run --example bouncing_balls -- --balls 60 --debug
//!
//! # Different seed, longer run
//! cargo run --example bouncing_balls -- --seed 7 --frames 1200
//! ```

use physics2d::input::{PointerButton, PointerEvent};
use physics2d::geometry::Line;
use physics2d::integration::total_kinetic_energy;
use physics2d::render::{draw_frame, Canvas};
use physics2d::{Color, Float, Point, SceneConfig, Simulation, SimulationConfig, SimulationError};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Demo settings
struct DemoConfig {
    frames: usize,
    balls: usize,
    seed: u64,
    debug_contacts: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            frames: 600,
            balls: 20,
            seed: 42,
            debug_contacts: false,
        }
    }
}

/// Canvas that tallies draw calls instead of painting
#[derive(Debug, Default)]
struct CountingCanvas {
    frames: usize,
    circles: usize,
    lines: usize,
    quads: usize,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self, _color: Color) {
        self.frames += 1;
    }

    fn fill_circle(&mut self, _center: Point, _radius: Float, _color: Color) {
        self.circles += 1;
    }

    fn draw_circle(&mut self, _center: Point, _radius: Float, _color: Color, _width: Float) {
        self.circles += 1;
    }

    fn draw_line(&mut self, _from: Point, _to: Point, _color: Color, _width: Float) {
        self.lines += 1;
    }

    fn fill_quad(&mut self, _corners: [Point; 4], _color: Color) {
        self.quads += 1;
    }

    fn draw_rectangle(
        &mut self,
        _top_left: Point,
        _bottom_right: Point,
        _color: Color,
        _width: Float,
    ) {
        self.quads += 1;
    }
}

fn parse_args() -> DemoConfig {
    let mut config = DemoConfig::default();
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" | "--balls" | "--seed" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Missing value for {}", args[i]);
                    std::process::exit(1);
                };
                let parsed = value.parse::<u64>().unwrap_or_else(|_| {
                    eprintln!("Invalid value for {}: {}", args[i], value);
                    std::process::exit(1);
                });
                match args[i].as_str() {
                    "--frames" => config.frames = parsed as usize,
                    "--balls" => config.balls = parsed as usize,
                    _ => config.seed = parsed,
                }
                i += 2;
            }
            "--debug" => {
                config.debug_contacts = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Usage: bouncing_balls [--frames N] [--balls N] [--seed N] [--debug]");
                std::process::exit(1);
            }
        }
    }

    config
}

/// Scripted pointer interaction, keyed by frame number
fn scripted_input(sim: &mut Simulation, frame: usize, total: usize) {
    let Some(first) = sim.balls().first().map(|b| b.center()) else {
        return;
    };
    let middle = total / 2;
    if frame == middle {
        sim.push_pointer_event(PointerEvent::pressed(first, PointerButton::Left));
    } else if frame > middle && frame < middle + 30 {
        let target = Point::new(sim.config().width / 2.0, sim.config().height / 4.0);
        sim.push_pointer_event(PointerEvent::moved(target));
    } else if frame == middle + 30 {
        sim.push_pointer_event(PointerEvent::released(first, PointerButton::Left));
        if let Some(second) = sim.balls().get(1).map(|b| b.center()) {
            sim.push_pointer_event(PointerEvent::pressed(second, PointerButton::Right));
            let cue = Point::new(second.x - 40.0, second.y + 20.0);
            sim.push_pointer_event(PointerEvent::moved(cue));
            sim.push_pointer_event(PointerEvent::released(cue, PointerButton::Right));
        }
    }
}

fn main() -> Result<(), SimulationError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let demo = parse_args();
    let config = SimulationConfig {
        debug_contacts: demo.debug_contacts,
        ..SimulationConfig::default()
    };
    let scene = SceneConfig {
        ball_count: demo.balls,
        seed: demo.seed,
        width: config.width,
        height: config.height,
        ..SceneConfig::default()
    };

    let mut sim = Simulation::from_scene_config(config, &scene)?;
    if demo.debug_contacts {
        let (w, h) = (sim.config().width, sim.config().height);
        let falling = Line::new(Point::origin(), Point::new(w, h))?;
        let rising = Line::new(Point::new(0.0, h), Point::new(w, 0.0))?;
        sim.debug_overlay_mut().push_intersection(falling, rising);
    }
    let mut canvas = CountingCanvas::default();
    let dt = 1.0 / 60.0;

    info!(
        balls = sim.balls().len(),
        walls = sim.walls().len(),
        integrator = sim.integrator_name(),
        "starting"
    );
    let initial_energy = total_kinetic_energy(sim.balls());

    let mut total_contacts = 0;
    let mut shots = 0;
    for frame in 0..demo.frames {
        scripted_input(&mut sim, frame, demo.frames);
        let report = sim.step(dt)?;
        total_contacts += report.contacts.len();
        if report.shot.is_some() {
            shots += 1;
        }
        draw_frame(&sim.frame(), &mut canvas);

        if frame % 60 == 0 {
            info!(
                t = sim.elapsed(),
                contacts = report.contacts.len(),
                kinetic_energy = total_kinetic_energy(sim.balls()),
                "frame {}",
                frame
            );
        }
    }

    println!("=== Bouncing balls ===");
    println!("Frames simulated:     {}", sim.frame_count());
    println!("Simulated time:       {:.2} s", sim.elapsed());
    println!("Contacts resolved:    {}", total_contacts);
    println!("Shots fired:          {}", shots);
    println!(
        "Kinetic energy:       {:.1} -> {:.1}",
        initial_energy,
        total_kinetic_energy(sim.balls())
    );
    println!(
        "Draw calls:           {} circles, {} lines, {} quads over {} frames",
        canvas.circles, canvas.lines, canvas.quads, canvas.frames
    );

    Ok(())
}
