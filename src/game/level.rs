// Level data, loading, and the per-frame simulation step

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::player::Player;
use super::stats::PlayerStats;
use crate::core::{Aabb, Vector2D};
use crate::engine::game_loop::FixedTicker;
use crate::engine::input::PlayerInput;
use crate::engine::physics::Wall;
use crate::engine::renderer::RenderSurface;

/// Level loading errors
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid level data in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PointData {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct WallData {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// On-disk level layout
#[derive(Debug, Deserialize)]
struct LevelData {
    spawn: PointData,
    #[serde(default)]
    walls: Vec<WallData>,
}

/// A loaded level: its walls, the player, and the friction clock
#[derive(Debug)]
pub struct Level {
    name: String,
    walls: Vec<Wall>,
    player: Player,
    friction: FixedTicker,
}

impl Level {
    /// Build a level from walls and a spawn point
    pub fn new(name: impl Into<String>, spawn: Vector2D, walls: Vec<Wall>) -> Self {
        let stats = PlayerStats::standard();
        // One clamped frame worth of ticks at most
        let max_ticks = (stats.friction_rate * f64::from(stats.max_frame_dt)).round() as u32;
        let friction = FixedTicker::new(stats.friction_rate, max_ticks);

        Self {
            name: name.into(),
            walls,
            player: Player::new(spawn, stats),
            friction,
        }
    }

    /// Parse a level from its JSON text
    pub fn from_json(name: &str, json: &str) -> Result<Self, LevelError> {
        let data: LevelData = serde_json::from_str(json).map_err(|source| LevelError::Parse {
            name: name.to_string(),
            source,
        })?;

        let walls = data
            .walls
            .iter()
            .map(|w| {
                if w.w <= 0.0 || w.h <= 0.0 {
                    log::warn!(
                        "Level {}: wall at ({}, {}) has non-positive size {}x{}",
                        name,
                        w.x,
                        w.y,
                        w.w,
                        w.h
                    );
                }
                Wall::from_rect(w.x, w.y, w.w, w.h)
            })
            .collect();

        Ok(Self::new(
            name,
            Vector2D::new(data.spawn.x, data.spawn.y),
            walls,
        ))
    }

    /// Load `<dir>/<name>.json`
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, LevelError> {
        let path = dir.as_ref().join(format!("{}.json", name));
        let json = std::fs::read_to_string(&path).map_err(|source| LevelError::Io {
            path: path.clone(),
            source,
        })?;

        let level = Self::from_json(name, &json)?;
        log::info!(
            "Loaded level {} from {} ({} walls)",
            name,
            path.display(),
            level.walls.len()
        );
        Ok(level)
    }

    /// Advance the player by one frame, then run the friction ticks that
    /// fell due during it
    pub fn step(&mut self, dt: f32, input: &PlayerInput) {
        self.player.update(dt, input, &self.walls);

        let ticks = self
            .friction
            .advance(dt.min(self.player.stats.max_frame_dt));
        for _ in 0..ticks {
            self.player.apply_friction(input);
        }
    }

    /// Player first, walls on top
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        self.player.draw(surface);
        for wall in &self.walls {
            wall.draw(surface);
        }
    }

    /// Standing box to outline while the player is crouched
    pub fn debug_probe(&self) -> Option<Aabb> {
        self.player
            .crouching
            .then(|| self.player.standing_probe())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::engine::physics::wall::WALL_COLOR;
    use crate::engine::renderer::surface::{DrawCommand, RecordingSurface};
    use approx::assert_relative_eq;
    use glam::Vec4;

    const LEVEL: &str = r#"{
        "spawn": { "x": 100, "y": 100 },
        "walls": [
            { "x": 0, "y": 300, "w": 1000, "h": 50 },
            { "x": 600, "y": 150, "w": 50, "h": 150 }
        ]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = Level::from_json("test", LEVEL).unwrap();

        assert_eq!(level.name(), "test");
        assert_eq!(level.walls().len(), 2);
        assert_eq!(level.walls()[1], Wall::from_rect(600.0, 150.0, 50.0, 150.0));
        assert_eq!(level.player().body.position, Vector2D::new(100.0, 100.0));
        assert_eq!(level.player().body.size, Vector2D::new(40.0, 96.0));
    }

    #[test]
    fn test_walls_default_to_empty() {
        let level = Level::from_json("void", r#"{"spawn": {"x": 0, "y": 0}}"#).unwrap();
        assert!(level.walls().is_empty());
    }

    #[test]
    fn test_degenerate_wall_is_kept() {
        let json = r#"{"spawn": {"x": 0, "y": 0}, "walls": [{"x": 0, "y": 0, "w": 0, "h": -5}]}"#;
        let level = Level::from_json("odd", json).unwrap();
        assert_eq!(level.walls().len(), 1);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Level::from_json("broken", r#"{"walls": []}"#).unwrap_err();
        assert!(matches!(err, LevelError::Parse { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Level::load("/nonexistent-level-dir", "level_1").unwrap_err();
        match err {
            LevelError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent-level-dir/level_1.json"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_step_lands_player() {
        let mut level = Level::from_json("test", LEVEL).unwrap();
        let input = PlayerInput::new();

        for _ in 0..60 {
            level.step(1.0 / 60.0, &input);
        }

        assert!(level.player().on_ground);
        assert_eq!(level.player().body.position.y, 204.0);
    }

    #[test]
    fn test_step_applies_friction_ticks() {
        let mut level = Level::from_json("test", LEVEL).unwrap();
        let input = PlayerInput::new();
        for _ in 0..60 {
            level.step(1.0 / 60.0, &input);
        }

        level.player.body.velocity.x = 100.0;
        // 0.1s at 150 Hz is 15 ground friction ticks
        level.friction.reset();
        level.step(0.1, &input);

        assert_relative_eq!(
            level.player().body.velocity.x,
            100.0 * 0.8f32.powi(15),
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_held_direction_skips_friction() {
        let mut level = Level::from_json("test", LEVEL).unwrap();
        let mut input = PlayerInput::new();
        for _ in 0..60 {
            level.step(1.0 / 60.0, &input);
        }

        input.press(Action::MoveRight);
        for _ in 0..30 {
            level.step(1.0 / 60.0, &input);
        }

        // Accelerates to the cap within a few frames and keeps it
        assert_eq!(level.player().body.velocity.x, 750.0);
    }

    #[test]
    fn test_debug_probe_only_while_crouched() {
        let mut level = Level::from_json("test", LEVEL).unwrap();
        let mut input = PlayerInput::new();
        for _ in 0..60 {
            level.step(1.0 / 60.0, &input);
        }
        assert!(level.debug_probe().is_none());

        input.press(Action::Crouch);
        level.step(1.0 / 60.0, &input);

        let probe = level.debug_probe().unwrap();
        assert_eq!(probe.size.y, 96.0);
        assert_eq!(probe.bottom(), 300.0);
    }

    #[test]
    fn test_draw_player_then_walls() {
        let level = Level::from_json("test", LEVEL).unwrap();
        let mut surface = RecordingSurface::default();

        level.draw(&mut surface);

        assert_eq!(surface.commands.len(), 3);
        // No frame images available: the player falls back to a white box
        assert!(matches!(
            surface.commands[0],
            DrawCommand::Rect { color, .. } if color == Vec4::ONE
        ));
        for command in &surface.commands[1..] {
            assert!(matches!(command, DrawCommand::Rect { color, .. } if *color == WALL_COLOR));
        }
    }
}
