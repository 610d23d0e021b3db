//! Wheelie - entity behaviours for a tile-based 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-tick entity logic (movement, patrol, collision outcomes)
//! - `audio`: Sound effect seam for the host's audio backend
//! - `level`: Level data spawn records
//! - `tuning`: Data-driven gameplay constants

pub mod audio;
pub mod level;
pub mod sim;
pub mod tuning;

pub use audio::{AudioBackend, AudioManager, SoundEffect};
pub use level::{EntitySettings, LevelError, LevelFile};
pub use tuning::{Tuning, TuningError};

/// Gameplay configuration constants
pub mod consts {
    /// Engine frame rate that a tick scale of 1.0 corresponds to
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Milliseconds covered by one tick at tick scale 1.0
    pub const MS_PER_TICK: f32 = 1000.0 / REFERENCE_FPS;

    /// Player acceleration per tick (also the velocity cap)
    pub const PLAYER_ACCEL_X: f32 = 1.0;
    pub const PLAYER_ACCEL_Y: f32 = 1.0;

    /// Patrol acceleration per tick for enemies and barriers (also the velocity cap)
    pub const PATROL_ACCEL_X: f32 = 4.0;
    pub const PATROL_ACCEL_Y: f32 = 6.0;

    /// Rendered frame of patrolling sprites, independent of the authored area
    pub const FRAME_WIDTH: f32 = 64.0;
    pub const FRAME_HEIGHT: f32 = 64.0;

    /// Score awarded for picking up a collectible
    pub const COLLECT_REWARD: u64 = 250;
    /// Duration of the hit/stomp flicker effect
    pub const FLICKER_MS: u32 = 750;
}

/// Convert a frame delta (seconds) into the engine's tick scale
#[inline]
pub fn tick_scale_from_dt(dt_secs: f32) -> f32 {
    dt_secs * consts::REFERENCE_FPS
}
