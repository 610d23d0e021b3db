//! Contact enumeration and collision outcome rules
//!
//! Each moving entity checks its shape against every other collidable entity
//! and against static world geometry once per tick. Every contact is routed
//! to *both* participants' rules: the mover's outcome decides whether it is
//! pushed out (solid) or passes through, the other side's outcome only
//! contributes side effects (score, sound, flicker, removal).

use glam::Vec2;

use super::state::{Entity, EntityId, EntityKind, GameEvent, GameState, KindData};
use crate::audio::SoundEffect;

/// Collision type as seen by the other participant's rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactClass {
    Player,
    /// Enemies and barriers
    Enemy,
    Collectible,
    /// Static level geometry
    WorldShape,
}

impl From<EntityKind> for ContactClass {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player => ContactClass::Player,
            EntityKind::Enemy | EntityKind::Barrier => ContactClass::Enemy,
            EntityKind::Collectible => ContactClass::Collectible,
        }
    }
}

/// Snapshot of one participant taken before either rule runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Party {
    /// `None` for world geometry
    pub id: Option<EntityId>,
    pub class: ContactClass,
    pub alive: bool,
    pub falling: bool,
    pub vel: Vec2,
}

impl Party {
    pub fn of(entity: &Entity) -> Self {
        Self {
            id: Some(entity.id),
            class: entity.kind.into(),
            alive: entity.alive,
            falling: entity.body.falling,
            vel: entity.body.vel,
        }
    }

    pub fn world() -> Self {
        Self {
            id: None,
            class: ContactClass::WorldShape,
            alive: true,
            falling: false,
            vel: Vec2::ZERO,
        }
    }
}

/// One contact from the point of view of the participant evaluating it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub other: Party,
    /// Penetration pointing from `other` toward self; `y > 0` means the other
    /// participant is above and pressing down
    pub overlap: Vec2,
}

/// Side effect requested by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hit sound plus flicker on self
    Hit,
    /// Award the reward, stop colliding, leave the world
    Collect,
    /// Flicker, stop being alive, leave the world
    Stomped,
}

/// Result of a collision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Whether the engine should physically separate self from the other
    pub solid: bool,
    pub effect: Effect,
}

impl CollisionOutcome {
    pub fn solid() -> Self {
        Self {
            solid: true,
            effect: Effect::None,
        }
    }

    pub fn pass_through() -> Self {
        Self {
            solid: false,
            effect: Effect::None,
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// Collision rule signature: `(self, contact) -> outcome`
pub type Rule = fn(&Party, &Contact) -> CollisionOutcome;

/// Rule table keyed by entity kind
pub fn rule_for(kind: EntityKind) -> Rule {
    match kind {
        EntityKind::Player => player_rule,
        EntityKind::Collectible => collectible_rule,
        EntityKind::Enemy | EntityKind::Barrier => patrol_rule,
    }
}

fn player_rule(_me: &Party, contact: &Contact) -> CollisionOutcome {
    if contact.other.class == ContactClass::Enemy {
        return CollisionOutcome::solid().with(Effect::Hit);
    }
    CollisionOutcome::solid()
}

fn collectible_rule(_me: &Party, _contact: &Contact) -> CollisionOutcome {
    CollisionOutcome::pass_through().with(Effect::Collect)
}

fn patrol_rule(me: &Party, contact: &Contact) -> CollisionOutcome {
    if contact.other.class == ContactClass::WorldShape {
        return CollisionOutcome::solid();
    }
    if me.alive && contact.overlap.y > 0.0 && contact.other.falling {
        return CollisionOutcome::pass_through().with(Effect::Stomped);
    }
    CollisionOutcome::pass_through()
}

/// Run the contact check for the entity at `idx`.
///
/// Indices stay valid for the whole tick because removals are deferred.
pub fn check_entity(state: &mut GameState, idx: usize) {
    for j in 0..state.entities.len() {
        if j == idx {
            continue;
        }
        let me = &state.entities[idx];
        let other = &state.entities[j];
        if !me.collidable {
            return;
        }
        if !other.collidable {
            continue;
        }
        let Some(overlap) = me.shape().overlap(&other.shape()) else {
            continue;
        };

        let me_party = Party::of(me);
        let other_party = Party::of(other);
        let mine = rule_for(me.kind)(
            &me_party,
            &Contact {
                other: other_party,
                overlap,
            },
        );
        let theirs = rule_for(other.kind)(
            &other_party,
            &Contact {
                other: me_party,
                overlap: -overlap,
            },
        );

        apply_effect(state, idx, mine.effect);
        if mine.solid {
            separate(state, idx, overlap);
        }
        apply_effect(state, j, theirs.effect);
    }

    for k in 0..state.world_shapes.len() {
        let me = &state.entities[idx];
        if !me.collidable {
            return;
        }
        let Some(overlap) = me.shape().overlap(&state.world_shapes[k]) else {
            continue;
        };

        let outcome = rule_for(me.kind)(
            &Party::of(me),
            &Contact {
                other: Party::world(),
                overlap,
            },
        );
        apply_effect(state, idx, outcome.effect);
        if outcome.solid {
            separate(state, idx, overlap);
        }
    }
}

fn separate(state: &mut GameState, idx: usize, overlap: Vec2) {
    let entity = &mut state.entities[idx];
    entity.body.resolve_contact(&mut entity.pos, overlap);
}

/// Carry out a rule's side effect on the entity at `idx`
pub fn apply_effect(state: &mut GameState, idx: usize, effect: Effect) {
    let flicker_ms = state.tuning.flicker_ms;
    let default_reward = state.tuning.collect_reward;
    let entity = &mut state.entities[idx];
    let id = entity.id;

    match effect {
        Effect::None => {}
        Effect::Hit => {
            entity.sprite.flicker(flicker_ms);
            log::debug!("{} #{} hit", entity.kind.as_str(), id);
            state.push_event(GameEvent::Sound(SoundEffect::EnemyKill));
            state.push_event(GameEvent::Flicker {
                entity: id,
                duration_ms: flicker_ms,
            });
        }
        Effect::Collect => {
            if !entity.collidable {
                return;
            }
            // Stop taking part in contact checks before anything else
            entity.collidable = false;
            entity.alive = false;
            let amount = match entity.data {
                KindData::Reward { amount } => amount,
                _ => default_reward,
            };
            log::debug!("Collectible #{} picked up", id);
            state.push_event(GameEvent::Sound(SoundEffect::Cling));
            state.award_score(id, amount);
            state.request_removal(id);
        }
        Effect::Stomped => {
            if !entity.alive {
                return;
            }
            entity.alive = false;
            entity.sprite.flicker(flicker_ms);
            log::debug!("{} #{} stomped", entity.kind.as_str(), id);
            state.push_event(GameEvent::Flicker {
                entity: id,
                duration_ms: flicker_ms,
            });
            state.request_removal(id);
        }
    }
}
