//! Fixed timestep simulation tick
//!
//! One call advances the session by one 60 Hz step. Queued commands are
//! applied first, so they land between ticks and never mid-step.

use super::state::{GameEvent, GamePhase, GameSession};
use crate::input::Command;

/// Commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn with(commands: &[Command]) -> Self {
        Self {
            commands: commands.to_vec(),
        }
    }
}

/// Advance the session by one fixed timestep, returning what happened
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &command in &input.commands {
        if apply_command(session, command, &mut events) {
            // A fresh session starts on the next tick
            return events;
        }
    }

    if session.phase != GamePhase::Playing {
        return events;
    }

    // Death is noticed on the tick after it happens; that tick does nothing else
    if session.player.is_dead() {
        events.push(session.end_run());
        return events;
    }

    session.time_ticks += 1;
    // Terrain must cover the player's X before the step queries it
    session.terrain.update(session.player.pos.x);
    if let Some(event) = session.player.step(&session.terrain) {
        events.push(event);
    }

    events
}

/// Apply one command; returns true if it replaced the session
fn apply_command(session: &mut GameSession, command: Command, events: &mut Vec<GameEvent>) -> bool {
    match (session.phase, command) {
        (GamePhase::Playing, Command::Jump) => {
            if session.player.jump() {
                events.push(GameEvent::Jumped);
            }
        }
        (GamePhase::Playing, Command::StartFlip) => {
            session.player.start_flip();
        }
        (GamePhase::Playing, Command::EndFlip) => session.player.end_flip(),
        (GamePhase::GameOver, Command::Restart) => {
            if let Some(event) = session.restart() {
                events.push(event);
                return true;
            }
        }
        (phase, command) => log::trace!("Dropped {command:?} in {phase:?}"),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;
    use crate::sim::terrain::Obstacle;
    use glam::Vec2;

    /// Flat ground with no rocks
    fn calm() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.terrain.amplitude = 0.0;
        tuning.terrain.obstacle_chance = 0.0;
        tuning
    }

    fn session(seed: u64) -> GameSession {
        GameSession::new(seed, &calm())
    }

    /// Tick with no input until the player is standing
    fn settle(session: &mut GameSession) {
        for _ in 0..600 {
            tick(session, &TickInput::default());
            if session.player.on_ground {
                return;
            }
        }
        panic!("player never landed");
    }

    /// Kill the player without touching physics
    fn kill(session: &mut GameSession) {
        session.player.dead = true;
    }

    #[test]
    fn test_tick_advances_player_and_terrain() {
        let mut s = session(1);
        let x0 = s.player.pos.x;
        tick(&mut s, &TickInput::default());
        assert_eq!(s.time_ticks, 1);
        assert_eq!(s.player.pos.x, x0 + RUN_SPEED);
        assert!(s.terrain.generated_until() >= x0 + VIEW_WIDTH);
    }

    #[test]
    fn test_death_observed_next_tick() {
        let mut s = session(2);
        tick(&mut s, &TickInput::default());
        kill(&mut s);
        let pos = s.player.pos;
        let until = s.terrain.generated_until();

        let events = tick(&mut s, &TickInput::default());
        assert!(matches!(events.as_slice(), [GameEvent::GameOver { .. }]));
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.pos, pos);
        assert_eq!(s.terrain.generated_until(), until);
        assert_eq!(s.time_ticks, 1);

        // GameOver ignores ticks entirely
        assert!(tick(&mut s, &TickInput::default()).is_empty());
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_jump_command() {
        let mut s = session(3);
        settle(&mut s);
        let events = tick(&mut s, &TickInput::with(&[Command::Jump, Command::StartFlip]));
        assert_eq!(events.first(), Some(&GameEvent::Jumped));
        assert!(!s.player.on_ground);
        assert!(s.player.flipping);
        assert_eq!(s.player.rotation, FLIP_SPEED);

        tick(&mut s, &TickInput::with(&[Command::EndFlip]));
        assert!(!s.player.flipping);
    }

    #[test]
    fn test_jump_in_air_ignored() {
        let mut s = session(4);
        let events = tick(&mut s, &TickInput::with(&[Command::Jump]));
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut s = session(5);
        kill(&mut s);
        tick(&mut s, &TickInput::default());
        assert_eq!(s.phase, GamePhase::GameOver);

        let events = tick(&mut s, &TickInput::with(&[Command::Jump]));
        assert!(events.is_empty());
    }

    #[test]
    fn test_restart_command() {
        let mut s = session(6);
        tick(&mut s, &TickInput::with(&[Command::Restart]));
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.seed, 6);

        kill(&mut s);
        tick(&mut s, &TickInput::default());
        let events = tick(&mut s, &TickInput::with(&[Command::Restart]));
        assert!(matches!(events.first(), Some(GameEvent::Restarted { .. })));
        assert_eq!(s.phase, GamePhase::Playing);
        assert!(!s.player.is_dead());
        assert_eq!(s.player.pos, Vec2::new(VIEW_WIDTH / 4.0, VIEW_HEIGHT / 2.0));
        assert_eq!(s.time_ticks, 0);

        tick(&mut s, &TickInput::default());
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_running_into_rock_ends_run() {
        let mut s = session(7);
        settle(&mut s);

        // Nothing spawns on its own; place a rock just ahead on the ground
        let x = s.player.pos.x + 30.0;
        let rock = Obstacle::new(999, Vec2::new(x, s.terrain.ground_height(x)), OBSTACLE_SIZE);
        s.terrain.insert_obstacle(rock);

        let mut hit = false;
        for _ in 0..10 {
            let events = tick(&mut s, &TickInput::default());
            if events.iter().any(|e| matches!(e, GameEvent::HitObstacle { .. })) {
                hit = true;
                break;
            }
        }
        assert!(hit);
        assert!(s.player.is_dead());
        let events = tick(&mut s, &TickInput::default());
        assert!(matches!(events.as_slice(), [GameEvent::GameOver { .. }]));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99, &Tuning::default());
        let mut b = GameSession::new(99, &Tuning::default());
        let inputs = [
            TickInput::default(),
            TickInput::with(&[Command::Jump, Command::StartFlip]),
            TickInput::default(),
            TickInput::with(&[Command::EndFlip]),
        ];
        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.rotation, b.player.rotation);
        assert_eq!(a.terrain.obstacles().len(), b.terrain.obstacles().len());
    }
}
