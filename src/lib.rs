//! Ridgeline - An endless side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (noise, terrain streaming, player physics, session)
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only per-frame view for render adapters
//! - `input`: Key press/release to command mapping

pub mod input;
pub mod sim;
pub mod tuning;
pub mod view;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick rate
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// View dimensions (world units == pixels at 1:1 zoom)
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 720.0;

    /// Player footprint (square, centered on the player position)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Downward acceleration per tick (y grows downward)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied by a jump
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Horizontal advance per tick
    pub const RUN_SPEED: f32 = 5.0;
    /// Degrees per tick while the flip control is held
    pub const FLIP_SPEED: f32 = 7.0;
    /// Slack above the ground that still counts as touching it
    pub const GROUND_TOLERANCE: f32 = 5.0;
    /// Landing more than this many degrees off level is a crash
    pub const CRASH_ANGLE: f32 = 90.0;

    /// Terrain shape
    pub const TERRAIN_BASELINE: f32 = VIEW_HEIGHT * 0.7;
    pub const TERRAIN_AMPLITUDE: f32 = 150.0;
    pub const TERRAIN_FREQUENCY: f32 = 0.005;
    /// Width of one generated terrain chunk
    pub const SEGMENT_WIDTH: f32 = 50.0;
    /// Sub-intervals sampled across a chunk (points = samples + 1)
    pub const SEGMENT_SAMPLES: u32 = 10;

    /// Obstacles only spawn where |slope| is below this (degrees)
    pub const FLATNESS_THRESHOLD: f32 = 10.0;
    /// Chance that an eligible segment gets an obstacle
    pub const OBSTACLE_CHANCE: f64 = 0.5;
    /// Obstacle footprint (the box rests on the ground)
    pub const OBSTACLE_SIZE: f32 = 40.0;

    /// Terrain further than this many view widths behind the player is evicted
    pub const TRAIL_FACTOR: f32 = 1.5;
    /// Camera leads the player by this much
    pub const CAMERA_LEAD: f32 = VIEW_WIDTH / 4.0;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(200.0), -160.0);
        assert_eq!(normalize_degrees(-200.0), 160.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(720.0 + 30.0), 30.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
    }
}
