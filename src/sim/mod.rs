//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Terrain height is a function of X, never of what is resident
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod noise;
pub mod player;
pub mod state;
pub mod terrain;
pub mod tick;

pub use clock::SimulationClock;
pub use collision::Footprint;
pub use noise::NoiseSource;
pub use player::{Contact, PlayerState};
pub use state::{GameEvent, GamePhase, GameSession};
pub use terrain::{Ground, Obstacle, StreamStats, TerrainSegment, TerrainStream};
pub use tick::{TickInput, tick};
