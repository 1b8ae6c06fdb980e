//! Simulation tuning and arena layout
//!
//! Supplied by the setup layer (character selection, arena construction).
//! Everything here is plain data with serde support so layouts can be kept
//! in JSON next to the game assets.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::Side;

/// Kinematic tuning shared by every figure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Cruise speed when a direction is requested (pixels/s)
    pub normal_speed: f32,
    /// Speed set instantly by a boost (pixels/s)
    pub boost_speed: f32,
    /// Acceleration and braking rate (pixels/s²)
    pub acceleration: f32,
    /// Dizziness after a bounce or player collision (seconds)
    pub dizzy_duration: f64,
    /// Figure diameter (pixels)
    pub player_size: f32,
    /// Micro-step length (pixels)
    pub step_length: f32,
    /// Elapsed time cap per integration call (seconds)
    pub max_elapsed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            normal_speed: NORMAL_SPEED,
            boost_speed: BOOST_SPEED,
            acceleration: ACCELERATION,
            dizzy_duration: DIZZY_DURATION,
            player_size: PLAYER_SIZE,
            step_length: STEP_LENGTH,
            max_elapsed: MAX_ELAPSED,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.normal_speed > 0.0) {
            return Err(SimError::config("normal_speed must be positive"));
        }
        if !(self.boost_speed >= self.normal_speed) {
            return Err(SimError::config("boost_speed must be at least normal_speed"));
        }
        if !(self.acceleration > 0.0) {
            return Err(SimError::config("acceleration must be positive"));
        }
        if !(self.dizzy_duration >= 0.0) {
            return Err(SimError::config("dizzy_duration must not be negative"));
        }
        if !(self.player_size > 0.0) {
            return Err(SimError::config("player_size must be positive"));
        }
        if !(self.step_length > 0.0) {
            return Err(SimError::config("step_length must be positive"));
        }
        if !(self.max_elapsed > 0.0) {
            return Err(SimError::config("max_elapsed must be positive"));
        }
        Ok(())
    }
}

/// One wall of the arena, in registration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSpec {
    pub side: Side,
    /// Compact hazard notation: `-` safe, `X` hazard
    pub pattern: String,
}

impl WallSpec {
    pub fn new(side: Side, pattern: &str) -> Self {
        Self {
            side,
            pattern: pattern.to_string(),
        }
    }
}

/// Arena geometry and wall patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaLayout {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Walls are checked for collisions in this order
    pub walls: Vec<WallSpec>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            walls: vec![
                WallSpec::new(Side::Left, "---XX--XX---"),
                WallSpec::new(Side::Right, "---XX--XX---"),
                WallSpec::new(Side::Bottom, "-----XXXX----------XXXX-----"),
                WallSpec::new(Side::Top, "--XX--XX--X--XX--XX--"),
            ],
        }
    }
}

impl ArenaLayout {
    /// Size of the arena as a vector
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Same arena with every wall made of a single repeated cell
    pub fn uniform(width: f32, height: f32, wall_thickness: f32, hazard: bool) -> Self {
        let cell = if hazard { "X" } else { "-" };
        Self {
            width,
            height,
            wall_thickness,
            walls: [Side::Left, Side::Right, Side::Bottom, Side::Top]
                .into_iter()
                .map(|side| WallSpec::new(side, cell))
                .collect(),
        }
    }

    pub fn validate(&self, player_size: f32) -> Result<(), SimError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SimError::config("arena width and height must be positive"));
        }
        if !(self.wall_thickness > 0.0) {
            return Err(SimError::config("wall_thickness must be positive"));
        }
        let inner = self.extent() - Vec2::splat(2.0 * self.wall_thickness);
        if inner.x < player_size || inner.y < player_size {
            return Err(SimError::config(format!(
                "arena {}x{} leaves no room for a figure of size {} inside walls of {}",
                self.width, self.height, player_size, self.wall_thickness
            )));
        }
        Ok(())
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub arena: ArenaLayout,
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: arena {}x{}, {} walls",
            settings.arena.width,
            settings.arena.height,
            settings.arena.walls.len()
        );
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        log::debug!("Reading settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.tuning.validate()?;
        self.arena.validate(self.tuning.player_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_reference_wall_order() {
        let layout = ArenaLayout::default();
        let sides: Vec<Side> = layout.walls.iter().map(|w| w.side).collect();
        assert_eq!(sides, vec![Side::Left, Side::Right, Side::Bottom, Side::Top]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "tuning": { "normal_speed": 300.0 } }"#).unwrap();
        assert_eq!(settings.tuning.normal_speed, 300.0);
        assert_eq!(settings.tuning.boost_speed, BOOST_SPEED);
        assert_eq!(settings.arena.walls.len(), 4);
    }

    #[test]
    fn test_json_round_trip_keeps_patterns() {
        let json = Settings::default().to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.arena.walls[3].pattern, "--XX--XX--X--XX--XX--");
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut settings = Settings::default();
        settings.tuning.boost_speed = 100.0;
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_cramped_arena() {
        let layout = ArenaLayout::uniform(120.0, 600.0, 50.0, false);
        assert!(layout.validate(PLAYER_SIZE).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("hazard-arena-no-such-settings.json");
        assert!(matches!(Settings::from_file(&path), Err(SimError::Io(_))));
    }

    #[test]
    fn test_from_file_reads_json() {
        let path = std::env::temp_dir().join(format!("hazard-arena-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "tuning": { "normal_speed": 420.0 } }"#).unwrap();
        let loaded = Settings::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap().tuning.normal_speed, 420.0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SimError::Settings(_))
        ));
    }
}
