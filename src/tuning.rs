//! Data-driven game balance
//!
//! Every physics and terrain constant lives here so a run can be tuned from a
//! JSON file without recompiling. Defaults match `crate::consts`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// View and streaming window parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub view_width: f32,
    pub view_height: f32,
    /// Eviction distance behind the player, in view widths
    pub trail_factor: f32,
    pub camera_lead: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            trail_factor: TRAIL_FACTOR,
            camera_lead: CAMERA_LEAD,
        }
    }
}

impl WorldTuning {
    /// Distance behind the player past which terrain is evicted
    pub fn trail_distance(&self) -> f32 {
        self.view_width * self.trail_factor
    }
}

/// Terrain shape and obstacle placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    pub baseline: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub segment_width: f32,
    pub segment_samples: u32,
    /// Degrees
    pub flatness_threshold: f32,
    pub obstacle_chance: f64,
    pub obstacle_size: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            baseline: TERRAIN_BASELINE,
            amplitude: TERRAIN_AMPLITUDE,
            frequency: TERRAIN_FREQUENCY,
            segment_width: SEGMENT_WIDTH,
            segment_samples: SEGMENT_SAMPLES,
            flatness_threshold: FLATNESS_THRESHOLD,
            obstacle_chance: OBSTACLE_CHANCE,
            obstacle_size: OBSTACLE_SIZE,
        }
    }
}

/// Player body and control response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub run_speed: f32,
    pub flip_speed: f32,
    pub ground_tolerance: f32,
    pub crash_angle: f32,
    /// Weight of the ground slope when easing rotation on the ground
    pub slope_blend: f32,
    /// Rotation multiplier per airborne tick when not flipping
    pub air_damping: f32,
    /// Below this |rotation| (degrees) no self-leveling happens
    pub level_epsilon: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            run_speed: RUN_SPEED,
            flip_speed: FLIP_SPEED,
            ground_tolerance: GROUND_TOLERANCE,
            crash_angle: CRASH_ANGLE,
            slope_blend: 0.1,
            air_damping: 0.95,
            level_epsilon: 1.0,
            spawn_x: VIEW_WIDTH / 4.0,
            spawn_y: VIEW_HEIGHT / 2.0,
        }
    }
}

impl PlayerTuning {
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    /// Check the player section on its own
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("player.size", self.size)?;
        finite("player.gravity", self.gravity)?;
        finite("player.jump_impulse", self.jump_impulse)?;
        if !(self.run_speed.is_finite() && self.run_speed >= 0.0) {
            return Err(TuningError::Invalid {
                field: "player.run_speed",
                reason: "must be finite and non-negative",
            });
        }
        finite("player.flip_speed", self.flip_speed)?;
        finite("player.ground_tolerance", self.ground_tolerance)?;
        positive("player.crash_angle", self.crash_angle)?;
        if !(0.0..=1.0).contains(&self.slope_blend) {
            return Err(TuningError::Invalid {
                field: "player.slope_blend",
                reason: "must be within [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.air_damping) {
            return Err(TuningError::Invalid {
                field: "player.air_damping",
                reason: "must be within [0, 1]",
            });
        }
        finite("player.level_epsilon", self.level_epsilon)?;
        finite("player.spawn_x", self.spawn_x)?;
        finite("player.spawn_y", self.spawn_y)?;
        Ok(())
    }

    pub(crate) fn assert_valid(&self) {
        if let Err(e) = self.validate() {
            panic!("{e}");
        }
    }
}

/// Complete tuning for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub terrain: TerrainTuning,
    pub player: PlayerTuning,
}

fn finite(field: &'static str, v: f32) -> Result<(), TuningError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason: "must be finite" })
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason: "must be positive" })
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a JSON file, falling back to defaults if the file is
    /// missing, unparseable or out of range.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(TuningError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), TuningError> {
        let w = &self.world;
        positive("world.view_width", w.view_width)?;
        positive("world.view_height", w.view_height)?;
        positive("world.trail_factor", w.trail_factor)?;
        finite("world.camera_lead", w.camera_lead)?;

        let t = &self.terrain;
        finite("terrain.baseline", t.baseline)?;
        finite("terrain.amplitude", t.amplitude)?;
        positive("terrain.frequency", t.frequency)?;
        positive("terrain.segment_width", t.segment_width)?;
        if t.segment_samples == 0 {
            return Err(TuningError::Invalid {
                field: "terrain.segment_samples",
                reason: "must be at least 1",
            });
        }
        positive("terrain.flatness_threshold", t.flatness_threshold)?;
        if !(0.0..=1.0).contains(&t.obstacle_chance) {
            return Err(TuningError::Invalid {
                field: "terrain.obstacle_chance",
                reason: "must be within [0, 1]",
            });
        }
        positive("terrain.obstacle_size", t.obstacle_size)?;

        self.player.validate()
    }

    /// Panic on invalid tuning; constants are programmer input
    pub(crate) fn assert_valid(&self) {
        if let Err(e) = self.validate() {
            panic!("{e}");
        }
    }
}
