//! Level data: static geometry and entity spawn records
//!
//! A level file lists the solid world shapes and the entities placed by the
//! level designer. Each entity record carries the area authored in the
//! editor; enemies and barriers keep only its width (their patrol range) and
//! render at the fixed frame size.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityId, EntityKind, GameState, PatrolKind, Rect};

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid entity #{index}: {reason}")]
    InvalidEntity { index: usize, reason: String },

    #[error("invalid world shape #{index}: {reason}")]
    InvalidShape { index: usize, reason: String },
}

/// One placed entity as authored in the level editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySettings {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl EntitySettings {
    fn validate(&self) -> Result<(), String> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err("position must be finite".to_string());
        }
        let finite = self.width.is_finite() && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    #[serde(default)]
    pub world_shapes: Vec<Rect>,
    pub entities: Vec<EntitySettings>,
}

impl LevelFile {
    pub fn from_json_str(raw: &str) -> Result<Self, LevelError> {
        let level: LevelFile = serde_json::from_str(raw)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, settings) in self.entities.iter().enumerate() {
            settings
                .validate()
                .map_err(|reason| LevelError::InvalidEntity { index, reason })?;
        }

        let mut seen = HashSet::new();
        for (index, shape) in self.world_shapes.iter().enumerate() {
            let finite = [shape.x, shape.y, shape.w, shape.h]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(LevelError::InvalidShape {
                    index,
                    reason: "coordinates must be finite".to_string(),
                });
            }
            if shape.w <= 0.0 || shape.h <= 0.0 {
                return Err(LevelError::InvalidShape {
                    index,
                    reason: "size must be positive".to_string(),
                });
            }
            let key = (
                shape.x.to_bits(),
                shape.y.to_bits(),
                shape.w.to_bits(),
                shape.h.to_bits(),
            );
            if !seen.insert(key) {
                return Err(LevelError::InvalidShape {
                    index,
                    reason: "duplicate shape".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Add this level's geometry and entities to `state`, in file order
    pub fn spawn_into(&self, state: &mut GameState) -> Vec<EntityId> {
        for shape in &self.world_shapes {
            state.add_world_shape(*shape);
        }

        let ids: Vec<EntityId> = self
            .entities
            .iter()
            .map(|s| {
                let pos = Vec2::new(s.x, s.y);
                match s.kind {
                    EntityKind::Player => state.spawn_player(pos, Vec2::new(s.width, s.height)),
                    EntityKind::Collectible => {
                        state.spawn_collectible(pos, Vec2::new(s.width, s.height))
                    }
                    EntityKind::Enemy => state.spawn_patroller(PatrolKind::Enemy, pos, s.width),
                    EntityKind::Barrier => {
                        state.spawn_patroller(PatrolKind::Barrier, pos, s.width)
                    }
                }
            })
            .collect();

        log::info!(
            "Loaded level '{}': {} entities, {} world shapes",
            self.name,
            ids.len(),
            self.world_shapes.len()
        );
        ids
    }
}

pub fn load_level_from_path(path: &Path) -> Result<LevelFile, LevelError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    LevelFile::from_json_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Lifecycle;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SAMPLE: &str = r#"{
        "name": "sample",
        "world_shapes": [{ "x": 0.0, "y": 300.0, "w": 640.0, "h": 32.0 }],
        "entities": [
            { "kind": "player", "x": 16.0, "y": 200.0, "width": 32.0, "height": 64.0 },
            { "kind": "coin", "x": 96.0, "y": 220.0, "width": 32.0, "height": 32.0 },
            { "kind": "enemy", "x": 200.0, "y": 236.0, "width": 256.0, "height": 64.0 },
            { "kind": "barrier", "x": 500.0, "y": 236.0, "width": 128.0, "height": 96.0 }
        ]
    }"#;

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "wheelie_level_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_parse_and_spawn() {
        let level = LevelFile::from_json_str(SAMPLE).expect("sample level should parse");
        assert_eq!(level.entities[1].kind, EntityKind::Collectible);

        let mut state = GameState::new();
        let ids = level.spawn_into(&mut state);
        assert_eq!(ids.len(), 4);
        assert_eq!(state.world_shapes.len(), 1);
        for id in &ids {
            assert_eq!(state.lifecycle(*id), Lifecycle::Active);
        }

        // Enemy: authored 256 wide, rendered 64 wide
        let enemy = state.entity(ids[2]).unwrap();
        assert_eq!(enemy.size, Vec2::new(64.0, 64.0));
        let range = enemy.patrol().unwrap().range;
        assert_eq!((range.start_x, range.end_x), (200.0, 392.0));
        assert_eq!(enemy.pos.x, 392.0);

        // Barrier ignores its authored height too
        let barrier = state.entity(ids[3]).unwrap();
        assert_eq!(barrier.size, Vec2::new(64.0, 64.0));
        assert_eq!(barrier.pos.x, 564.0);

        let player = state.entity(ids[0]).unwrap();
        assert_eq!(player.size, Vec2::new(32.0, 64.0));
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let raw = r#"{
            "name": "bad",
            "entities": [{ "kind": "coin", "x": 0.0, "y": 0.0, "width": 0.0, "height": 32.0 }]
        }"#;
        let err = LevelFile::from_json_str(raw).unwrap_err();
        assert!(matches!(err, LevelError::InvalidEntity { index: 0, .. }));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let raw = r#"{
            "name": "bad",
            "entities": [{ "kind": "dragon", "x": 0.0, "y": 0.0, "width": 32.0, "height": 32.0 }]
        }"#;
        assert!(matches!(
            LevelFile::from_json_str(raw),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_shapes() {
        let raw = r#"{
            "name": "dup",
            "world_shapes": [
                { "x": 0.0, "y": 0.0, "w": 32.0, "h": 32.0 },
                { "x": 0.0, "y": 0.0, "w": 32.0, "h": 32.0 }
            ],
            "entities": []
        }"#;
        let err = LevelFile::from_json_str(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate shape"));
    }

    #[test]
    fn test_rejects_overflowing_shape() {
        // 1e39 does not fit in an f32 and parses as infinity
        let raw = r#"{
            "name": "huge",
            "world_shapes": [
                { "x": 0.0, "y": 100.0, "w": 64.0, "h": 32.0 },
                { "x": 0.0, "y": 0.0, "w": 1e39, "h": 32.0 }
            ],
            "entities": []
        }"#;
        let err = LevelFile::from_json_str(raw).unwrap_err();
        assert!(matches!(err, LevelError::InvalidShape { index: 1, .. }));
    }

    #[test]
    fn test_load_from_path() {
        let path = temp_file_path("valid");
        fs::write(&path, SAMPLE).expect("write temp file");
        let level = load_level_from_path(&path).expect("valid level should load");
        assert_eq!(level.name, "sample");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_level_from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}
