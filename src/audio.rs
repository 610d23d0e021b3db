//! Sound effect playback seam
//!
//! The simulation only queues `GameEvent::Sound`; the host supplies an
//! `AudioBackend` that actually makes noise.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player touched an enemy
    EnemyKill,
    /// Collectible picked up
    Cling,
}

impl SoundEffect {
    /// Asset name the host's loader registers the clip under
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::EnemyKill => "enemykill",
            SoundEffect::Cling => "cling",
        }
    }
}

/// Something that can play a sound, fire-and-forget
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend for headless runs: logs every play
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::info!("play '{}' at volume {:.2}", effect.asset_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend + Default> Default for AudioManager<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play every sound queued in `events`; other events are ignored
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(effect) = event {
                self.play(*effect);
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
