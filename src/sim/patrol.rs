//! Horizontal patrol shared by enemies and barriers
//!
//! A patroller walks back and forth inside `[start_x, end_x]`. The range is
//! derived from the authored area width minus the fixed rendered frame width,
//! so the sprite stays inside the authored footprint.

use serde::{Deserialize, Serialize};

use super::state::{Body, Sprite};

/// Immutable patrol bounds; `start_x <= end_x` always holds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRange {
    pub start_x: f32,
    pub end_x: f32,
}

impl PatrolRange {
    /// Build a range, collapsing it to `start_x` if `end_x` lies before it
    pub fn new(start_x: f32, end_x: f32) -> Self {
        if end_x < start_x {
            log::warn!(
                "Patrol range [{}, {}] is inverted, clamping to a single point",
                start_x,
                end_x
            );
            return Self {
                start_x,
                end_x: start_x,
            };
        }
        Self { start_x, end_x }
    }

    /// A zero-length range: nowhere to walk
    pub fn is_point(&self) -> bool {
        self.end_x <= self.start_x
    }
}

/// Patrol state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub range: PatrolRange,
    /// Which way the entity is currently walking
    pub walk_left: bool,
}

impl Patrol {
    /// Range for an entity authored at `x` over `authored_width`, rendered
    /// `frame_width` wide. Starts with `walk_left = false`.
    pub fn from_authored(x: f32, authored_width: f32, frame_width: f32) -> Self {
        Self {
            range: PatrolRange::new(x, x + authored_width - frame_width),
            walk_left: false,
        }
    }

    /// One patrol update.
    ///
    /// Alive: flip direction at the range ends, then accelerate that way.
    /// Not alive: stop horizontal motion and let the body coast.
    pub fn step(
        &mut self,
        pos_x: f32,
        alive: bool,
        body: &mut Body,
        sprite: &mut Sprite,
        tick_scale: f32,
    ) {
        if !alive {
            body.vel.x = 0.0;
            return;
        }
        if self.range.is_point() {
            body.vel.x = 0.0;
            return;
        }

        if self.walk_left && pos_x <= self.range.start_x {
            self.walk_left = false;
            log::trace!("Patrol turned right at x={}", pos_x);
        } else if !self.walk_left && pos_x >= self.range.end_x {
            self.walk_left = true;
            log::trace!("Patrol turned left at x={}", pos_x);
        }

        sprite.flip_x = self.walk_left;
        let step = body.accel.x * tick_scale;
        body.vel.x += if self.walk_left { -step } else { step };
    }
}
