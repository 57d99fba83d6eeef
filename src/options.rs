use crate::level_generator::GeometricLevels;
use crate::MAX_LEVEL;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Upper bound on the number of levels a node may occupy. Clamped to
    /// `1..=MAX_LEVEL`.
    pub max_level: usize,
    /// Seed for the level generator. `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: MAX_LEVEL,
            seed: None,
        }
    }
}

impl Options {
    pub fn with_seed(seed: u64) -> Self {
        Options {
            seed: Some(seed),
            ..Options::default()
        }
    }

    pub(crate) fn level_cap(&self) -> usize {
        self.max_level.max(1).min(MAX_LEVEL)
    }

    pub(crate) fn level_generator(&self) -> GeometricLevels {
        match self.seed {
            Some(seed) => GeometricLevels::with_seed(seed),
            None => GeometricLevels::new(),
        }
    }
}
