//! Read-only frame view for render adapters
//!
//! Render code never touches the simulation types directly; it gets a
//! borrowed snapshot of everything drawable, tagged by kind.

use glam::Vec2;

use crate::sim::{Footprint, GamePhase, GameSession, Obstacle, TerrainSegment};

/// Pose of the player for drawing and camera framing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub pos: Vec2,
    /// Degrees, clockwise on screen
    pub rotation: f32,
    pub alive: bool,
}

/// Anything the renderer draws
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    /// Surface points of one chunk, left to right
    Segment(&'a [Vec2]),
    Obstacle { pos: Vec2, footprint: Footprint },
    Player(PlayerPose),
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub player: PlayerPose,
    pub camera_x: f32,
    pub distance: f32,
    pub view_height: f32,
    session: &'a GameSession,
}

impl<'a> FrameView<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        let player = &session.player;
        Self {
            phase: session.phase,
            player: PlayerPose {
                pos: player.pos,
                rotation: player.rotation,
                alive: !player.is_dead(),
            },
            camera_x: session.camera_x(),
            distance: player.distance(),
            view_height: session.tuning().world.view_height,
            session,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &'a TerrainSegment> + 'a {
        self.session.terrain.segments().iter()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &'a Obstacle> + 'a {
        self.session.terrain.obstacles().iter()
    }

    pub fn show_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Draw list back to front: terrain, obstacles, then the player
    pub fn entities(&self) -> Vec<Entity<'a>> {
        let mut out: Vec<Entity<'a>> = self
            .segments()
            .map(|s| Entity::Segment(s.points.as_slice()))
            .collect();
        out.extend(self.obstacles().map(|o| Entity::Obstacle {
            pos: o.pos,
            footprint: o.footprint,
        }));
        out.push(Entity::Player(self.player));
        out
    }
}

/// A scrolling background layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Fraction of camera movement the layer follows
    pub speed: f32,
    /// Width of the repeating image
    pub width: f32,
}

/// Distant mountains, then near hills
pub const DEFAULT_LAYERS: [ParallaxLayer; 2] = [
    ParallaxLayer {
        speed: 0.1,
        width: 800.0,
    },
    ParallaxLayer {
        speed: 0.3,
        width: 800.0,
    },
];

impl ParallaxLayer {
    /// Horizontal texture offset for this camera position, in [0, width)
    pub fn offset(&self, camera_x: f32) -> f32 {
        parallax_offset(camera_x, self.speed, self.width)
    }
}

/// `(camera_x * speed) mod width`, wrapped into [0, width)
pub fn parallax_offset(camera_x: f32, speed: f32, width: f32) -> f32 {
    let offset = (camera_x * speed).rem_euclid(width);
    // rem_euclid can round up to exactly `width`
    if offset >= width { 0.0 } else { offset }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::*;

    #[test]
    fn test_frame_view_mirrors_session() {
        let session = GameSession::new(5, &Tuning::default());
        let view = FrameView::new(&session);
        assert_eq!(view.phase, GamePhase::Playing);
        assert!(view.player.alive);
        assert_eq!(view.player.pos, session.player.pos);
        assert_eq!(view.camera_x, session.player.pos.x + CAMERA_LEAD);
        assert_eq!(view.distance, 0.0);
        assert!(!view.show_game_over());
        assert_eq!(view.segments().count(), session.terrain.segments().len());
    }

    #[test]
    fn test_entities_draw_order() {
        let session = GameSession::new(5, &Tuning::default());
        let entities = FrameView::new(&session).entities();
        let segments = session.terrain.segments().len();
        let obstacles = session.terrain.obstacles().len();
        assert_eq!(entities.len(), segments + obstacles + 1);
        assert!(matches!(entities[0], Entity::Segment(points) if points.len() == SEGMENT_SAMPLES as usize + 1));
        assert!(matches!(entities.last(), Some(Entity::Player(_))));
    }

    #[test]
    fn test_parallax_offset_wraps() {
        assert_eq!(parallax_offset(0.0, 0.1, 800.0), 0.0);
        assert!((parallax_offset(1000.0, 0.1, 800.0) - 100.0).abs() < 1e-3);
        assert!((parallax_offset(10_000.0, 0.1, 800.0) - 200.0).abs() < 1e-3);
        assert!((parallax_offset(-1000.0, 0.3, 800.0) - 500.0).abs() < 1e-3);
        assert!((DEFAULT_LAYERS[1].offset(3000.0) - 100.0).abs() < 1e-3);
    }
}
