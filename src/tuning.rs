//! Data-driven gameplay tuning
//!
//! Defaults mirror `crate::consts`. A JSON override may set any subset of
//! fields; the rest keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player acceleration and velocity cap per axis
    pub player_accel: Vec2,
    /// Enemy/barrier acceleration and velocity cap per axis
    pub patrol_accel: Vec2,
    /// Rendered frame (and collision shape) of enemies and barriers
    pub frame_size: Vec2,
    /// Score per collectible
    pub collect_reward: u64,
    /// Hit/stomp flicker duration
    pub flicker_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_accel: Vec2::new(PLAYER_ACCEL_X, PLAYER_ACCEL_Y),
            patrol_accel: Vec2::new(PATROL_ACCEL_X, PATROL_ACCEL_Y),
            frame_size: Vec2::new(FRAME_WIDTH, FRAME_HEIGHT),
            collect_reward: COLLECT_REWARD,
            flicker_ms: FLICKER_MS,
        }
    }
}

impl Tuning {
    pub fn from_json_str(raw: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(raw)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let raw = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&raw)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = |v: Vec2| v.is_finite() && v.x >= 0.0 && v.y >= 0.0;
        if !non_negative(self.player_accel) {
            return Err(TuningError::Invalid(
                "player_accel must be finite and non-negative".to_string(),
            ));
        }
        if !non_negative(self.patrol_accel) {
            return Err(TuningError::Invalid(
                "patrol_accel must be finite and non-negative".to_string(),
            ));
        }
        if !self.frame_size.is_finite() || self.frame_size.x <= 0.0 || self.frame_size.y <= 0.0 {
            return Err(TuningError::Invalid(
                "frame_size must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }
}
