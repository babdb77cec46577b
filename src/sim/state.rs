//! Session state and domain events
//!
//! A session owns exactly one terrain stream and one player. Restart builds
//! a fresh session and swaps it in whole; nothing carries over.

use serde::{Deserialize, Serialize};

use super::player::PlayerState;
use super::terrain::TerrainStream;
use crate::tuning::Tuning;

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance terrain and player
    Playing,
    /// Run ended; waiting for restart
    GameOver,
}

/// Things that happened during a tick, for sound/overlay hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Touched down within the safe angle (normalized degrees)
    Landed { rotation: f32 },
    /// Touched down too far from level
    Crashed { rotation: f32 },
    /// Ran into the obstacle resting at (x, y)
    HitObstacle { x: f32, y: f32 },
    /// Phase switched to GameOver
    GameOver { distance: f32 },
    /// A fresh session replaced the old one
    Restarted { seed: u64 },
}

/// One run: terrain, player and phase
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the terrain was generated from
    pub seed: u64,
    pub phase: GamePhase,
    pub terrain: TerrainStream,
    pub player: PlayerState,
    /// Ticks applied while playing
    pub time_ticks: u64,
    tuning: Tuning,
}

impl GameSession {
    /// Start a run with terrain already covering the spawn window
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        tuning.assert_valid();

        let player = PlayerState::new(&tuning.player);
        let mut terrain = TerrainStream::new(seed, tuning);
        terrain.update(player.pos.x);

        log::info!("New session (seed {seed})");
        Self {
            seed,
            phase: GamePhase::Playing,
            terrain,
            player,
            time_ticks: 0,
            tuning: tuning.clone(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Camera X for rendering: the player leads the left side of the view
    pub fn camera_x(&self) -> f32 {
        self.player.pos.x + self.tuning.world.camera_lead
    }

    /// Replace this session with a freshly seeded one. Only valid in GameOver.
    pub fn restart(&mut self) -> Option<GameEvent> {
        self.restart_with_seed(rand::random())
    }

    /// Replace this session with one built from `seed`. Only valid in GameOver.
    pub fn restart_with_seed(&mut self, seed: u64) -> Option<GameEvent> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        let fresh = Self::new(seed, &self.tuning);
        *self = fresh;
        log::info!("Restarted (seed {seed})");
        Some(GameEvent::Restarted { seed })
    }

    /// Switch to GameOver once the player has died
    pub(crate) fn end_run(&mut self) -> GameEvent {
        self.phase = GamePhase::GameOver;
        let distance = self.player.distance();
        log::info!(
            "Game over after {} ticks, distance {:.0}",
            self.time_ticks,
            distance
        );
        GameEvent::GameOver { distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(7, &Tuning::default());
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(!session.player.is_dead());
        assert_eq!(session.time_ticks, 0);
        assert!(session.terrain.generated_until() >= session.player.pos.x + VIEW_WIDTH);
        assert_eq!(session.camera_x(), VIEW_WIDTH / 4.0 + CAMERA_LEAD);
    }

    #[test]
    fn test_restart_requires_game_over() {
        let mut session = GameSession::new(7, &Tuning::default());
        assert_eq!(session.restart_with_seed(8), None);
        assert_eq!(session.seed, 7);
    }

    #[test]
    fn test_restart_replaces_everything() {
        let mut session = GameSession::new(7, &Tuning::default());
        session.player.pos.x += 5_000.0;
        session.player.dead = true;
        session.time_ticks = 1_000;
        session.end_run();

        let event = session.restart_with_seed(9);
        assert_eq!(event, Some(GameEvent::Restarted { seed: 9 }));
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.seed, 9);
        assert_eq!(session.time_ticks, 0);
        assert!(!session.player.is_dead());
        assert_eq!(session.player.pos.x, VIEW_WIDTH / 4.0);
        assert_eq!(session.terrain.resident_from(), Some(-VIEW_WIDTH));
    }

    #[test]
    fn test_sessions_with_different_seeds_differ() {
        let a = GameSession::new(1, &Tuning::default());
        let b = GameSession::new(2, &Tuning::default());
        assert!(
            (0..100)
                .map(|i| i as f32 * 13.0)
                .any(|x| a.terrain.ground_height(x) != b.terrain.ground_height(x))
        );
    }

    #[test]
    fn test_end_run_reports_distance() {
        let mut session = GameSession::new(3, &Tuning::default());
        session.player.pos.x += 250.0;
        assert_eq!(session.end_run(), GameEvent::GameOver { distance: 250.0 });
        assert_eq!(session.phase, GamePhase::GameOver);
    }
}
