//! Player movement intent
//!
//! Turns the held direction keys into a per-tick velocity delta. Opposing
//! keys are not exclusive: their contributions simply cancel.

use serde::{Deserialize, Serialize};

use super::state::{Animation, Body, Sprite};

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Apply this tick's movement intent to `body` and pick the animation.
///
/// Velocity carries over from the integrator; deltas are added on top. With
/// no key held, velocity snaps to exactly zero and the sprite stands.
pub fn resolve_movement(body: &mut Body, sprite: &mut Sprite, keys: &Directions, tick_scale: f32) {
    if !sprite.is_current(Animation::Run) {
        sprite.set_animation(Animation::Run);
    }

    let step = body.accel * tick_scale;
    if keys.down {
        sprite.flip_y = false;
        body.vel.y += step.y;
    }
    if keys.up {
        sprite.flip_y = true;
        body.vel.y -= step.y;
    }
    if keys.right {
        body.vel.x += step.x;
    }
    if keys.left {
        body.vel.x -= step.x;
    }

    if !keys.any() {
        body.vel.x = 0.0;
        body.vel.y = 0.0;
        sprite.set_animation(Animation::Stand);
    }
}
