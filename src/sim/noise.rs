//! 1-D gradient noise for terrain height
//!
//! Classic Perlin-style lattice noise: the permutation table is shuffled once
//! from the seed and stored twice so `p[x + 1]` never needs wrapping.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Deterministic smooth scalar field, immutable after construction
#[derive(Debug, Clone)]
pub struct NoiseSource {
    seed: u32,
    perm: [u8; 512],
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = Pcg32::seed_from_u64(u64::from(seed));
        table.shuffle(&mut rng);

        let perm = std::array::from_fn(|i| table[i & 255]);
        Self { seed, perm }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field at `x`. Output is roughly within [-1, 1].
    pub fn noise(&self, x: f32) -> f32 {
        let x = f64::from(x);
        let floor = x.floor();
        let xi = (floor as i64 & 255) as usize;
        let xf = x - floor;
        let u = fade(xf);

        let a = self.perm[xi] as usize;
        let b = self.perm[xi + 1] as usize;
        let n = lerp(u, grad(self.perm[a], xf), grad(self.perm[b], xf - 1.0));
        (n * 2.0) as f32
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64) -> f64 {
    if hash & 1 == 0 { x } else { -x }
}
