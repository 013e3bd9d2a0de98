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
//! Pointer input
//!
//! The host pushes [`PointerEvent`]s whenever the window reports them; the
//! simulation drains the queue once at the start of each frame. The only
//! state carried across the frame boundary is the [`Grab`]: which ball, if
//! any, the pointer currently holds or aims with.
//!
//! - Left press on a ball picks it up; it follows the pointer with zero
//!   velocity until the left button is released.
//! - Right press on a ball starts aiming; on right release the ball is shot
//!   with velocity `launch_gain · (center − pointer)`.

use crate::bodies::Ball;
use crate::geometry::{Float, Point, Vector};
use tracing::trace;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

/// What happened to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTransition {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
    /// Pointer moved; `button` is ignored
    Moved,
}

/// A single pointer event in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position
    pub position: Point,
    /// Button involved
    pub button: PointerButton,
    /// Kind of event
    pub transition: PointerTransition,
}

impl PointerEvent {
    /// Button press at `position`
    pub fn pressed(position: Point, button: PointerButton) -> Self {
        PointerEvent {
            position,
            button,
            transition: PointerTransition::Pressed,
        }
    }

    /// Button release at `position`
    pub fn released(position: Point, button: PointerButton) -> Self {
        PointerEvent {
            position,
            button,
            transition: PointerTransition::Released,
        }
    }

    /// Pointer motion to `position`
    pub fn moved(position: Point) -> Self {
        PointerEvent {
            position,
            button: PointerButton::Left,
            transition: PointerTransition::Moved,
        }
    }
}

/// Ball currently attached to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    /// Ball follows the pointer
    Holding(usize),
    /// Ball waits to be shot away from the pointer
    Aiming(usize),
}

impl Grab {
    /// Index of the grabbed ball
    pub fn ball(&self) -> usize {
        match *self {
            Grab::Holding(i) | Grab::Aiming(i) => i,
        }
    }
}

/// Pointer state carried between frames
#[derive(Debug, Clone, Default)]
pub struct PointerController {
    pending: Vec<PointerEvent>,
    position: Point,
    grab: Option<Grab>,
}

/// First ball whose disc contains `p`
pub fn ball_at(balls: &[Ball], p: Point) -> Option<usize> {
    balls.iter().position(|ball| ball.circle().contains(p))
}

impl PointerController {
    /// Create a controller with no pending events and nothing grabbed
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next frame
    pub fn push(&mut self, event: PointerEvent) {
        self.pending.push(event);
    }

    /// Number of events waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Last known pointer position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current grab, if any
    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    /// Drain queued events against the current roster
    ///
    /// Returns the index of a ball that was shot, if any.
    pub fn process(&mut self, balls: &mut [Ball], launch_gain: Float) -> Option<usize> {
        let mut shot = None;
        for event in std::mem::take(&mut self.pending) {
            self.position = event.position;
            match (event.transition, event.button, self.grab) {
                (PointerTransition::Moved, _, _) => {}
                (PointerTransition::Pressed, PointerButton::Left, None) => {
                    self.grab = ball_at(balls, event.position).map(Grab::Holding);
                    trace!(grab = ?self.grab, "left press");
                }
                (PointerTransition::Pressed, PointerButton::Right, None) => {
                    self.grab = ball_at(balls, event.position).map(Grab::Aiming);
                    trace!(grab = ?self.grab, "right press");
                }
                (PointerTransition::Released, PointerButton::Left, Some(Grab::Holding(_))) => {
                    self.grab = None;
                }
                (PointerTransition::Released, PointerButton::Right, Some(Grab::Aiming(index))) => {
                    if let Some(ball) = balls.get_mut(index) {
                        let cue = Vector::between(event.position, ball.center());
                        ball.set_velocity(cue * launch_gain);
                        shot = Some(index);
                        trace!(ball = index, "shot");
                    }
                    self.grab = None;
                }
                _ => {}
            }
        }
        shot
    }

    /// Pin a held ball to the pointer
    ///
    /// Clears the ball's velocity and acceleration so it does not drift
    /// during integration.
    pub fn pin_held(&self, balls: &mut [Ball]) {
        if let Some(Grab::Holding(index)) = self.grab {
            if let Some(ball) = balls.get_mut(index) {
                ball.set_center(self.position);
                ball.set_velocity(Vector::zero());
                ball.clear_acceleration();
            }
        }
    }
}
