//! Footprint overlap tests
//!
//! Player and obstacles collide as axis-aligned boxes. The player's visual
//! rotation does not rotate its footprint.

use glam::Vec2;

/// Axis-aligned collision box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Footprint {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size / 2.0,
        }
    }

    /// Square footprint of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min().x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max().x
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Footprint) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}
