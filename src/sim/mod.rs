//! Deterministic simulation module
//!
//! All entity behaviour lives here. This module must be pure and deterministic:
//! - Tick-scaled updates only
//! - Stable iteration order (by entity ID)
//! - Removals deferred to the tick boundary
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod movement;
pub mod patrol;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Contact, ContactClass, Effect, Party, rule_for};
pub use geom::Rect;
pub use movement::{Directions, resolve_movement};
pub use patrol::{Patrol, PatrolRange};
pub use state::{
    Animation, Body, Entity, EntityId, EntityKind, GameEvent, GameState, KindData, Lifecycle,
    PatrolKind, Sprite,
};
pub use tick::{TickInput, tick};
