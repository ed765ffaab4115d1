//! Persisted progress between sessions.
//!
//! Only the difficulty, the night index and the intro flag survive a session.
//! Entity position and heat always start fresh.

use crate::config::{Difficulty, DifficultyPreset};

/// Settings payload written by the menu layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SaveRecord {
    pub difficulty: Difficulty,
    pub night: u32,
    pub intro_completed: bool,
}

impl SaveRecord {
    pub const fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            night: 1,
            intro_completed: false,
        }
    }

    /// Entity tuning to resume with.
    pub fn preset(&self) -> DifficultyPreset {
        self.difficulty.preset()
    }

    /// Record after surviving the current night.
    pub fn next_night(self) -> Self {
        Self {
            night: self.night.saturating_add(1),
            intro_completed: true,
            ..self
        }
    }
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
