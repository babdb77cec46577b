//! Input mapping
//!
//! A single action control drives the player: pressing it jumps (and, once
//! airborne, starts a flip), releasing it ends the flip. A separate restart
//! control only matters after the run has ended. Events are turned into
//! commands and queued until the next tick picks them up.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, TickInput};

/// Raw control transitions delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    ActionPressed,
    ActionReleased,
    RestartPressed,
}

/// Simulation commands applied at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    StartFlip,
    EndFlip,
    Restart,
}

/// Commands an input event produces in the given phase
pub fn commands_for(event: InputEvent, phase: GamePhase) -> &'static [Command] {
    match (phase, event) {
        // Jump first: leaving the ground is what makes the flip legal
        (GamePhase::Playing, InputEvent::ActionPressed) => &[Command::Jump, Command::StartFlip],
        (GamePhase::Playing, InputEvent::ActionReleased) => &[Command::EndFlip],
        (GamePhase::GameOver, InputEvent::RestartPressed) => &[Command::Restart],
        _ => &[],
    }
}

/// Commands collected between ticks
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map and enqueue an input event
    pub fn push_event(&mut self, event: InputEvent, phase: GamePhase) {
        let commands = commands_for(event, phase);
        if commands.is_empty() {
            log::trace!("Ignored {event:?} in {phase:?}");
        }
        self.pending.extend_from_slice(commands);
    }

    /// Take everything queued so far as the input for one tick
    pub fn drain(&mut self) -> TickInput {
        TickInput {
            commands: std::mem::take(&mut self.pending),
        }
    }
}
