//! Injectable random sources.
//!
//! The entity's move attempts draw a d20 through [`RandomSource`], so tests can
//! substitute [`ScriptedRng`] and replay exact sequences, while live sessions
//! use a seeded generator.

use std::collections::VecDeque;

/// Source of uniformly distributed integers in a closed range.
pub trait RandomSource {
    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32;

    /// Roll a d20 (1-20 inclusive).
    fn roll_d20(&mut self) -> u32 {
        self.range(1, 20)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// Replays a fixed list of values, clamped into the requested range.
///
/// Once the script runs out the last value repeats; an empty script yields
/// `max`, the least favourable roll for the entity.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    last: Option<u32>,
    draws: usize,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: None,
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRng {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.draws += 1;
        let value = match self.values.pop_front() {
            Some(value) => {
                self.last = Some(value);
                value
            }
            None => self.last.unwrap_or(max),
        };
        value.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_rng_replays_then_repeats_last() {
        let mut rng = ScriptedRng::new([3, 17]);

        assert_eq!(rng.roll_d20(), 3);
        assert_eq!(rng.roll_d20(), 17);
        assert_eq!(rng.roll_d20(), 17);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn scripted_rng_clamps_into_range() {
        let mut rng = ScriptedRng::new([0, 99]);

        assert_eq!(rng.roll_d20(), 1);
        assert_eq!(rng.roll_d20(), 20);
        assert_eq!(ScriptedRng::default().roll_d20(), 20);
    }
}
