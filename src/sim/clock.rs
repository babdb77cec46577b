//! Frame-to-tick accumulator
//!
//! The platform layer reports wall-clock frame times; the clock turns them
//! into a whole number of fixed ticks and runs them against the session.

use super::state::{GameEvent, GameSession};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::input::CommandQueue;

/// Longest frame the clock will try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-rate tick driver
#[derive(Debug, Clone)]
pub struct SimulationClock {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
    ticks: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl SimulationClock {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        assert!(dt.is_finite() && dt > 0.0, "tick length must be positive");
        assert!(max_substeps > 0, "need at least one substep per frame");
        Self {
            accumulator: 0.0,
            dt,
            max_substeps,
            ticks: 0,
        }
    }

    /// Total ticks run by this clock
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Bank `frame_dt` seconds and return how many ticks are now due
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut due = 0;
        while self.accumulator >= self.dt && due < self.max_substeps {
            self.accumulator -= self.dt;
            due += 1;
        }
        if due == self.max_substeps && self.accumulator >= self.dt {
            // Drop the backlog rather than spiral
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.dt;
        }
        due
    }

    /// Run the ticks due this frame. Queued commands go to the first tick only.
    pub fn run_frame(
        &mut self,
        session: &mut GameSession,
        queue: &mut CommandQueue,
        frame_dt: f32,
    ) -> Vec<GameEvent> {
        let due = self.advance(frame_dt);
        let mut events = Vec::new();
        for step in 0..due {
            let input = if step == 0 {
                queue.drain()
            } else {
                TickInput::default()
            };
            events.extend(tick(session, &input));
            self.ticks += 1;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::input::InputEvent;
    use crate::sim::GamePhase;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = SimulationClock::new(0.25, 8);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert!((clock.accumulator - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_caps_substeps() {
        let mut clock = SimulationClock::new(0.01, 4);
        assert_eq!(clock.advance(0.1), 4);
        assert!(clock.accumulator < clock.dt);
    }

    #[test]
    fn test_clamps_long_frames() {
        let mut clock = SimulationClock::new(0.05, 100);
        assert_eq!(clock.advance(5.0), 2);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn test_run_frame_drains_queue_once() {
        let mut tuning = Tuning::default();
        tuning.terrain.obstacle_chance = 0.0;
        let mut session = GameSession::new(11, &tuning);
        let mut queue = CommandQueue::new();
        let mut clock = SimulationClock::new(0.01, 8);

        queue.push_event(InputEvent::ActionPressed, session.phase);
        queue.push_event(InputEvent::ActionReleased, session.phase);
        clock.run_frame(&mut session, &mut queue, 0.035);
        assert_eq!(clock.ticks(), 3);
        assert_eq!(session.time_ticks, 3);
        assert!(queue.drain().commands.is_empty());
        assert_eq!(session.phase, GamePhase::Playing);
    }
}
