use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scene::model::SceneParams;

/// Integer rotation range in degrees, half-open: `[-6, 6)`.
pub const ROTATION_RANGE_DEG: (i32, i32) = (-6, 6);
/// Lamp offset range, half-open: `[-0.5, 0.5)`.
pub const LAMP_OFFSET_RANGE: (f64, f64) = (-0.5, 0.5);

/// Seeded parameter sampler for batch runs.
///
/// Backed by ChaCha8, whose stream is stable across platforms and `rand` releases, so a batch
/// is reproducible from its seed.
#[derive(Clone, Debug)]
pub struct ParamSampler {
    rng: ChaCha8Rng,
}

impl ParamSampler {
    /// Create a sampler; equal seeds yield equal sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// Uniform float in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi.partial_cmp(&lo) != Some(std::cmp::Ordering::Greater) {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// Copy `base` with freshly drawn rotations and lamp offsets.
    pub fn sample(&mut self, base: &SceneParams) -> SceneParams {
        let (rlo, rhi) = ROTATION_RANGE_DEG;
        let (llo, lhi) = LAMP_OFFSET_RANGE;
        SceneParams {
            rotate_x_deg: f64::from(self.range_i32(rlo, rhi)),
            rotate_y_deg: f64::from(self.range_i32(rlo, rhi)),
            rotate_z_deg: f64::from(self.range_i32(rlo, rhi)),
            lamp_x: self.uniform(llo, lhi),
            lamp_y: self.uniform(llo, lhi),
            ..base.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sampler.rs"]
mod tests;
