//! Streaming terrain and obstacles
//!
//! Ground height is a pure function of X computed from the noise field, so
//! physics never depends on which segments happen to be resident. Segments
//! and obstacles are only materialized for rendering and collision, ahead of
//! the player, and evicted once they fall far enough behind.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Footprint;
use super::noise::NoiseSource;
use crate::tuning::{TerrainTuning, Tuning, WorldTuning};

/// Ground queries the player physics needs
pub trait Ground {
    /// Ground surface Y at `x` (y grows downward)
    fn ground_height(&self, x: f32) -> f32;
    /// Surface angle at `x` in degrees; positive means the ground descends to the right
    fn ground_slope(&self, x: f32) -> f32;
    /// First resident obstacle whose footprint overlaps `body`
    fn obstacle_hit(&self, body: &Footprint) -> Option<&Obstacle>;
}

/// One fixed-width slice of generated ground
#[derive(Debug, Clone)]
pub struct TerrainSegment {
    pub id: u32,
    /// Surface samples, left to right, spanning the whole segment
    pub points: Vec<Vec2>,
    /// Slope at the segment midpoint (degrees)
    pub mid_slope: f32,
}

impl TerrainSegment {
    #[inline]
    pub fn left(&self) -> f32 {
        self.points.first().map_or(0.0, |p| p.x)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.points.last().map_or(0.0, |p| p.x)
    }

    /// Closed fill polygon: surface points dropped down to `bottom` at both ends
    pub fn polygon(&self, bottom: f32) -> Vec<Vec2> {
        let mut poly = Vec::with_capacity(self.points.len() + 2);
        poly.push(Vec2::new(self.left(), bottom));
        poly.extend_from_slice(&self.points);
        poly.push(Vec2::new(self.right(), bottom));
        poly
    }
}

/// A rock resting on the ground; touching it is fatal
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Ground contact point (bottom center)
    pub pos: Vec2,
    pub footprint: Footprint,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            footprint: Footprint::square(pos - Vec2::new(0.0, size / 2.0), size),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.footprint.right()
    }
}

/// Generation/eviction counts for one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub generated: usize,
    pub spawned_obstacles: usize,
    pub evicted_segments: usize,
    pub evicted_obstacles: usize,
}

impl StreamStats {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Sliding window of resident terrain around the player
#[derive(Debug, Clone)]
pub struct TerrainStream {
    config: TerrainTuning,
    world: WorldTuning,
    noise: NoiseSource,
    rng: Pcg32,
    segments: VecDeque<TerrainSegment>,
    obstacles: VecDeque<Obstacle>,
    /// Left edge of the next segment to generate
    next_x: f32,
    next_id: u32,
}

impl TerrainStream {
    /// Build a stream and pre-fill two view widths starting one width behind origin
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        tuning.assert_valid();

        let mut rng = Pcg32::seed_from_u64(seed);
        let noise = NoiseSource::new(rng.random());
        let mut stream = Self {
            config: tuning.terrain.clone(),
            world: tuning.world.clone(),
            noise,
            rng,
            segments: VecDeque::new(),
            obstacles: VecDeque::new(),
            next_x: -tuning.world.view_width,
            next_id: 1,
        };

        let prefill = (2.0 * stream.world.view_width / stream.config.segment_width).floor() as usize;
        for _ in 0..prefill {
            stream.generate_segment();
        }
        log::debug!(
            "Terrain seeded {} ({} segments, {} obstacles)",
            stream.noise.seed(),
            stream.segments.len(),
            stream.obstacles.len()
        );
        stream
    }

    pub fn noise_seed(&self) -> u32 {
        self.noise.seed()
    }

    pub fn segments(&self) -> &VecDeque<TerrainSegment> {
        &self.segments
    }

    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.obstacles
    }

    /// Right edge of generated terrain
    pub fn generated_until(&self) -> f32 {
        self.next_x
    }

    /// Left edge of resident terrain, if any
    pub fn resident_from(&self) -> Option<f32> {
        self.segments.front().map(TerrainSegment::left)
    }

    /// Height of the ground at any `x`, resident or not
    pub fn ground_height(&self, x: f32) -> f32 {
        self.config.baseline + self.noise.noise(x * self.config.frequency) * self.config.amplitude
    }

    /// Central-difference slope over ±1 unit, in degrees
    pub fn ground_slope(&self, x: f32) -> f32 {
        let y1 = self.ground_height(x - 1.0);
        let y2 = self.ground_height(x + 1.0);
        (y2 - y1).atan2(2.0).to_degrees()
    }

    /// Extend terrain ahead of the player and drop what is far behind
    pub fn update(&mut self, player_x: f32) -> StreamStats {
        let mut stats = StreamStats::default();

        let horizon = player_x + self.world.view_width;
        while self.next_x < horizon {
            if self.generate_segment() {
                stats.spawned_obstacles += 1;
            }
            stats.generated += 1;
        }

        let trail = player_x - self.world.trail_distance();
        while self.segments.front().is_some_and(|s| s.right() < trail) {
            self.segments.pop_front();
            stats.evicted_segments += 1;
        }
        // Independent queue: an obstacle may outlive its segment by a tick or so
        while self.obstacles.front().is_some_and(|o| o.right() < trail) {
            self.obstacles.pop_front();
            stats.evicted_obstacles += 1;
        }

        if !stats.is_idle() {
            log::debug!(
                "Terrain update at x={:.0}: +{} segments (+{} obstacles), -{} segments, -{} obstacles",
                player_x,
                stats.generated,
                stats.spawned_obstacles,
                stats.evicted_segments,
                stats.evicted_obstacles
            );
        }
        stats
    }

    /// Append one segment; returns true if it also spawned an obstacle
    fn generate_segment(&mut self) -> bool {
        let start = self.next_x;
        let width = self.config.segment_width;
        let samples = self.config.segment_samples;

        let points = (0..=samples)
            .map(|i| {
                let x = start + i as f32 * width / samples as f32;
                Vec2::new(x, self.ground_height(x))
            })
            .collect();

        let mid = start + width / 2.0;
        let mid_slope = self.ground_slope(mid);
        let spawn =
            mid_slope.abs() < self.config.flatness_threshold && self.rng.random_bool(self.config.obstacle_chance);
        if spawn {
            let pos = Vec2::new(mid, self.ground_height(mid));
            let id = self.allocate_id();
            self.obstacles.push_back(Obstacle::new(id, pos, self.config.obstacle_size));
        }

        let id = self.allocate_id();
        log::trace!("Segment {id} at x={start:.0} slope={mid_slope:.1} obstacle={spawn}");
        self.segments.push_back(TerrainSegment {
            id,
            points,
            mid_slope,
        });
        self.next_x = start + width;
        spawn
    }

    /// Place an obstacle by hand, keeping the queue in X order
    #[cfg(test)]
    pub(crate) fn insert_obstacle(&mut self, obstacle: Obstacle) {
        let at = self.obstacles.partition_point(|o| o.pos.x <= obstacle.pos.x);
        self.obstacles.insert(at, obstacle);
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Ground for TerrainStream {
    fn ground_height(&self, x: f32) -> f32 {
        TerrainStream::ground_height(self, x)
    }

    fn ground_slope(&self, x: f32) -> f32 {
        TerrainStream::ground_slope(self, x)
    }

    fn obstacle_hit(&self, body: &Footprint) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.footprint.overlaps(body))
    }
}
