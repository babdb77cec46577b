//! Player body physics and control state
//!
//! The player runs right at a constant speed, falls under gravity, snaps to
//! the ground surface and eases its rotation toward the slope. Holding the
//! flip control in the air spins it; landing too far from level, or touching
//! an obstacle, kills it. Death is terminal: a dead player never moves again.

use glam::Vec2;

use super::collision::Footprint;
use super::state::GameEvent;
use super::terrain::Ground;
use crate::normalize_degrees;
use crate::tuning::PlayerTuning;

/// Coarse contact state, derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Grounded,
    Airborne { flipping: bool },
    Dead,
}

/// The runner
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Center of the body (y grows downward)
    pub pos: Vec2,
    /// `x` is the fixed run speed; `y` changes under gravity and jumps
    pub vel: Vec2,
    /// Degrees, unbounded while spinning
    pub rotation: f32,
    pub on_ground: bool,
    pub dead: bool,
    pub flipping: bool,
    config: PlayerTuning,
}

impl PlayerState {
    /// Spawn airborne at the configured spawn point
    pub fn new(config: &PlayerTuning) -> Self {
        config.assert_valid();
        Self {
            pos: Vec2::new(config.spawn_x, config.spawn_y),
            vel: Vec2::new(config.run_speed, 0.0),
            rotation: 0.0,
            on_ground: false,
            dead: false,
            flipping: false,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &PlayerTuning {
        &self.config
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn contact(&self) -> Contact {
        if self.dead {
            Contact::Dead
        } else if self.on_ground {
            Contact::Grounded
        } else {
            Contact::Airborne {
                flipping: self.flipping,
            }
        }
    }

    /// Collision box around the body (ignores rotation)
    pub fn footprint(&self) -> Footprint {
        Footprint::square(self.pos, self.config.size)
    }

    /// Horizontal distance covered since spawn
    pub fn distance(&self) -> f32 {
        self.pos.x - self.config.spawn_x
    }

    /// Jump if standing on the ground. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground || self.dead {
            return false;
        }
        self.vel.y = self.config.jump_impulse;
        // Cleared now so a second press before the next step cannot re-trigger
        self.on_ground = false;
        true
    }

    /// Start spinning; only possible in the air
    pub fn start_flip(&mut self) -> bool {
        if self.on_ground || self.dead {
            return false;
        }
        self.flipping = true;
        true
    }

    pub fn end_flip(&mut self) {
        self.flipping = false;
    }

    /// Advance one tick against `ground`
    ///
    /// Obstacle contact is checked before anything moves, so when a collision
    /// and a landing would happen on the same tick the collision wins.
    pub fn step(&mut self, ground: &impl Ground) -> Option<GameEvent> {
        if self.dead {
            return None;
        }

        if let Some(obstacle) = ground.obstacle_hit(&self.footprint()) {
            self.dead = true;
            log::debug!(
                "Hit obstacle {} at ({:.0}, {:.0})",
                obstacle.id,
                obstacle.pos.x,
                obstacle.pos.y
            );
            return Some(GameEvent::HitObstacle {
                x: obstacle.pos.x,
                y: obstacle.pos.y,
            });
        }

        let cfg = &self.config;
        self.vel.x = cfg.run_speed;
        self.vel.y += cfg.gravity;
        self.pos += self.vel;

        let ground_y = ground.ground_height(self.pos.x);
        let slope = ground.ground_slope(self.pos.x);
        let half = cfg.half_size();
        let was_airborne = !self.on_ground;

        if self.pos.y + half >= ground_y - cfg.ground_tolerance {
            self.pos.y = ground_y - half;
            self.vel.y = 0.0;
            self.on_ground = true;

            let mut event = None;
            if was_airborne {
                let landing = normalize_degrees(self.rotation);
                if landing.abs() > cfg.crash_angle {
                    self.dead = true;
                    log::debug!("Crashed landing at {landing:.1} deg, x={:.0}", self.pos.x);
                    return Some(GameEvent::Crashed { rotation: landing });
                }
                log::debug!("Landed at {landing:.1} deg, x={:.0}", self.pos.x);
                event = Some(GameEvent::Landed { rotation: landing });
            }

            self.rotation = self.rotation * (1.0 - cfg.slope_blend) + slope * cfg.slope_blend;
            event
        } else {
            self.on_ground = false;
            if self.flipping {
                self.rotation += cfg.flip_speed;
            } else if self.rotation.abs() > cfg.level_epsilon {
                self.rotation *= cfg.air_damping;
            }
            None
        }
    }
}
