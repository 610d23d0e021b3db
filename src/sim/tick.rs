//! Per-tick simulation driver
//!
//! Order within a tick:
//! 1. Every entity, in id order: behaviour update, integration, contact check
//! 2. Removals requested during the tick are applied together
//! 3. Cosmetic timers advance

use serde::{Deserialize, Serialize};

use super::collision::check_entity;
use super::movement::{Directions, resolve_movement};
use super::state::{Entity, GameState, KindData};
use crate::consts::MS_PER_TICK;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Directional keys held by the player
    pub directions: Directions,
}

/// Advance the simulation by one tick.
///
/// `tick_scale` is the engine's frame-normalised multiplier (1.0 at 60 Hz).
pub fn tick(state: &mut GameState, input: &TickInput, tick_scale: f32) {
    state.time_ticks += 1;

    for idx in 0..state.entities.len() {
        update_entity(&mut state.entities[idx], input, tick_scale);
        if state.entities[idx].kind.is_mover() {
            check_entity(state, idx);
        }
    }

    state.flush_removals();

    let elapsed_ms = tick_scale * MS_PER_TICK;
    for entity in &mut state.entities {
        entity.sprite.advance(elapsed_ms);
    }
}

/// Behaviour update plus integration for one entity
fn update_entity(entity: &mut Entity, input: &TickInput, tick_scale: f32) {
    let Entity {
        pos,
        body,
        sprite,
        alive,
        data,
        ..
    } = entity;

    match data {
        KindData::Controlled => resolve_movement(body, sprite, &input.directions, tick_scale),
        KindData::Patrol(patrol) => patrol.step(pos.x, *alive, body, sprite, tick_scale),
        // Collectibles sit still
        KindData::Reward { .. } => return,
    }

    body.integrate(pos, tick_scale);
}
