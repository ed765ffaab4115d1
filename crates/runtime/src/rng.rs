//! `rand`-backed random source for live sessions.

use game_core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standard RNG seeded once per session.
///
/// A fixed seed replays the exact same sequence of entity rolls.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRng {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}
