use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A node is promoted to the next level with probability
/// `1 / PROMOTE_DENOMINATOR`.
const PROMOTE_DENOMINATOR: u32 = 4;

/// Chooses how many levels a freshly inserted node occupies.
pub trait LevelGenerator {
    /// Returns a level count in `1..=max_level`.
    fn gen_level(&mut self, max_level: usize) -> usize;
}

/// Geometric level choice: start at one level and keep promoting with
/// probability 1/4, so level `k` holds about `n / 4^k` nodes.
#[derive(Debug, Clone)]
pub struct GeometricLevels {
    rng: StdRng,
}

impl GeometricLevels {
    pub fn new() -> Self {
        GeometricLevels {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        GeometricLevels {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GeometricLevels {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator for GeometricLevels {
    fn gen_level(&mut self, max_level: usize) -> usize {
        let mut level = 1;
        while level < max_level && self.rng.gen_ratio(1, PROMOTE_DENOMINATOR) {
            level += 1;
        }
        level
    }
}
