//! Game state and core simulation types
//!
//! Every entity is a single `Entity` record: a kind tag plus kind-specific
//! data. Behaviour is selected by kind in `tick` and `collision`, not by
//! per-type structs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::patrol::Patrol;
use crate::audio::SoundEffect;
use crate::tuning::Tuning;

/// Stable entity identifier (allocation order doubles as update order)
pub type EntityId = u32;

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
    Barrier,
    #[serde(alias = "coin")]
    Collectible,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Enemy => "enemy",
            EntityKind::Barrier => "barrier",
            EntityKind::Collectible => "collectible",
        }
    }

    /// Whether this kind moves and initiates its own contact checks each tick.
    /// Collectibles are passive: they only react when something touches them.
    pub fn is_mover(&self) -> bool {
        !matches!(self, EntityKind::Collectible)
    }
}

/// The entity kinds that patrol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolKind {
    Enemy,
    Barrier,
}

impl From<PatrolKind> for EntityKind {
    fn from(kind: PatrolKind) -> Self {
        match kind {
            PatrolKind::Enemy => EntityKind::Enemy,
            PatrolKind::Barrier => EntityKind::Barrier,
        }
    }
}

/// Kind-specific configuration and state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KindData {
    /// Input-driven movement
    Controlled,
    /// Horizontal patrol shared by enemies and barriers
    Patrol(Patrol),
    /// Score handed out on pickup
    Reward { amount: u64 },
}

/// Physics body state consumed by the integrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub vel: Vec2,
    /// Per-tick acceleration applied by movement/patrol
    pub accel: Vec2,
    /// Per-axis velocity cap enforced during integration
    pub max_vel: Vec2,
    /// Always zero for every entity kind here
    pub gravity: f32,
    /// Moving downward without support
    pub falling: bool,
}

impl Body {
    /// Body with acceleration and velocity cap both set to `(x, y)`
    pub fn with_velocity(x: f32, y: f32) -> Self {
        Self {
            vel: Vec2::ZERO,
            accel: Vec2::new(x, y),
            max_vel: Vec2::new(x.abs(), y.abs()),
            gravity: 0.0,
            falling: false,
        }
    }

    /// Clamp velocity to the cap and move `pos` by it
    pub fn integrate(&mut self, pos: &mut Vec2, tick_scale: f32) {
        self.vel.y += self.gravity * tick_scale;
        self.vel.x = self.vel.x.clamp(-self.max_vel.x, self.max_vel.x);
        self.vel.y = self.vel.y.clamp(-self.max_vel.y, self.max_vel.y);
        *pos += self.vel;
        self.falling = self.vel.y > 0.0;
    }

    /// Push the body out of a solid contact. `separation` points away from
    /// the obstacle; velocity heading into it is cancelled.
    pub fn resolve_contact(&mut self, pos: &mut Vec2, separation: Vec2) {
        *pos += separation;
        if separation.x * self.vel.x < 0.0 {
            self.vel.x = 0.0;
        }
        if separation.y * self.vel.y < 0.0 {
            self.vel.y = 0.0;
        }
        // Pushed upward means landed on top of something
        if separation.y < 0.0 {
            self.falling = false;
        }
    }
}

/// Named animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    Stand,
    Run,
}

impl Animation {
    pub fn clip_name(&self) -> &'static str {
        match self {
            Animation::Stand => "stand",
            Animation::Run => "arun",
        }
    }
}

/// Visual state handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprite {
    pub animation: Animation,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Remaining flicker time (ms), purely cosmetic
    pub flicker_ms: f32,
}

impl Sprite {
    pub fn is_current(&self, animation: Animation) -> bool {
        self.animation == animation
    }

    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    pub fn flicker(&mut self, duration_ms: u32) {
        self.flicker_ms = duration_ms as f32;
    }

    pub fn is_flickering(&self) -> bool {
        self.flicker_ms > 0.0
    }

    /// Count down the flicker timer
    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.flicker_ms > 0.0 {
            self.flicker_ms = (self.flicker_ms - elapsed_ms).max(0.0);
        }
    }
}

/// Where an entity is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// In the world and alive
    Active,
    /// Still in the world for the rest of this tick, removal already queued
    Dying,
    /// Gone from the world
    Removed,
}

/// A platformer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Collision shape size (the shape sits at `pos`)
    pub size: Vec2,
    pub body: Body,
    pub sprite: Sprite,
    pub alive: bool,
    /// Cleared when the entity must stop taking part in contact checks
    pub collidable: bool,
    pub data: KindData,
}

impl Entity {
    #[inline]
    pub fn shape(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn patrol(&self) -> Option<&Patrol> {
        match &self.data {
            KindData::Patrol(patrol) => Some(patrol),
            _ => None,
        }
    }
}

/// Side effects for collaborators (audio, renderer, UI), drained each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Flicker { entity: EntityId, duration_ms: u32 },
    ScoreAwarded { entity: EntityId, amount: u64, total: u64 },
    Removed { entity: EntityId, kind: EntityKind },
}

/// Simulation context: entities, static world geometry and the score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Entities sorted by id (ids are allocated increasing and only appended)
    pub entities: Vec<Entity>,
    /// Static level geometry; always solid, never removed
    pub world_shapes: Vec<Rect>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Written only by collectible pickups
    score: u64,
    /// Removals requested during the current tick
    pending_removals: Vec<EntityId>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            tuning,
            entities: Vec::new(),
            world_shapes: Vec::new(),
            time_ticks: 0,
            score: 0,
            pending_removals: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Spawn the player with its top-left corner at `pos`
    pub fn spawn_player(&mut self, pos: Vec2, size: Vec2) -> EntityId {
        let accel = self.tuning.player_accel;
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind: EntityKind::Player,
            pos,
            size,
            body: Body::with_velocity(accel.x, accel.y),
            sprite: Sprite::default(),
            alive: true,
            collidable: true,
            data: KindData::Controlled,
        });
        id
    }

    /// Spawn a collectible at `pos`
    pub fn spawn_collectible(&mut self, pos: Vec2, size: Vec2) -> EntityId {
        let amount = self.tuning.collect_reward;
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind: EntityKind::Collectible,
            pos,
            size,
            body: Body::with_velocity(0.0, 0.0),
            sprite: Sprite::default(),
            alive: true,
            collidable: true,
            data: KindData::Reward { amount },
        });
        id
    }

    /// Spawn an enemy or barrier from its authored area.
    ///
    /// The collision shape is the fixed rendered frame; the authored width
    /// only decides how far the entity patrols. It starts at the right end
    /// of its range.
    pub fn spawn_patroller(
        &mut self,
        kind: PatrolKind,
        pos: Vec2,
        authored_width: f32,
    ) -> EntityId {
        let frame = self.tuning.frame_size;
        let accel = self.tuning.patrol_accel;
        let patrol = Patrol::from_authored(pos.x, authored_width, frame.x);
        let start = Vec2::new(patrol.range.end_x, pos.y);

        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            kind: kind.into(),
            pos: start,
            size: frame,
            body: Body::with_velocity(accel.x, accel.y),
            sprite: Sprite::default(),
            alive: true,
            collidable: true,
            data: KindData::Patrol(patrol),
        });
        id
    }

    /// Add a piece of static, solid world geometry
    pub fn add_world_shape(&mut self, rect: Rect) {
        self.world_shapes.push(rect);
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        let idx = self.index_of(id)?;
        Some(&self.entities[idx])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let idx = self.index_of(id)?;
        Some(&mut self.entities[idx])
    }

    pub fn lifecycle(&self, id: EntityId) -> Lifecycle {
        match self.entity(id) {
            None => Lifecycle::Removed,
            Some(e) if e.alive && !self.pending_removals.contains(&id) => Lifecycle::Active,
            Some(_) => Lifecycle::Dying,
        }
    }

    /// Queue `id` for removal at the end of the tick. Repeated requests are
    /// ignored.
    pub fn request_removal(&mut self, id: EntityId) {
        if !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
        }
    }

    /// Drop every entity queued for removal
    pub fn flush_removals(&mut self) {
        if self.pending_removals.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_removals);
        let mut removed = Vec::with_capacity(pending.len());
        self.entities.retain(|e| {
            if pending.contains(&e.id) {
                removed.push((e.id, e.kind));
                false
            } else {
                true
            }
        });
        for (entity, kind) in removed {
            log::debug!("Removed {} #{}", kind.as_str(), entity);
            self.events.push(GameEvent::Removed { entity, kind });
        }
    }

    pub(crate) fn award_score(&mut self, entity: EntityId, amount: u64) {
        self.score += amount;
        log::info!("Score +{} -> {}", amount, self.score);
        self.events.push(GameEvent::ScoreAwarded {
            entity,
            amount,
            total: self.score,
        });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
