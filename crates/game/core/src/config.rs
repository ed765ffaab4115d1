use std::str::FromStr;

use crate::error::ConfigError;
use crate::state::{AiLevel, EntityPath};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Heat gained per second while the monitor is open (percent).
    pub heat_increase_rate: f64,
    /// Heat lost per second while the monitor is closed (percent).
    pub heat_decrease_rate: f64,
    /// Time the cameras stay locked after an overheat.
    pub cooldown_ms: u64,
    /// Route the entity follows toward the office.
    pub path: EntityPath,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HEAT_INCREASE_RATE: f64 = 0.5;
    pub const DEFAULT_HEAT_DECREASE_RATE: f64 = 1.5;
    pub const DEFAULT_COOLDOWN_MS: u64 = 3_000;

    pub fn new() -> Self {
        Self {
            heat_increase_rate: Self::DEFAULT_HEAT_INCREASE_RATE,
            heat_decrease_rate: Self::DEFAULT_HEAT_DECREASE_RATE,
            cooldown_ms: Self::DEFAULT_COOLDOWN_MS,
            path: EntityPath::server_room(),
        }
    }

    /// Same tuning, different route.
    pub fn with_path(self, path: EntityPath) -> Self {
        Self { path, ..self }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty selected in the settings menu.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Entity tuning for this difficulty.
    pub fn preset(self) -> DifficultyPreset {
        let (level, interval_ms) = match self {
            Self::Easy => (1, 15_000),
            Self::Normal => (2, 10_000),
            Self::Hard => (3, 7_000),
        };
        DifficultyPreset {
            level: AiLevel::saturating(level),
            interval_ms,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// `(level, interval)` pair the entity runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyPreset {
    pub level: AiLevel,
    pub interval_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn presets_match_difficulty_table() {
        let table: Vec<(Difficulty, u8, u64)> = Difficulty::iter()
            .map(|d| {
                let preset = d.preset();
                (d, preset.level.get(), preset.interval_ms)
            })
            .collect();

        assert_eq!(
            table,
            vec![
                (Difficulty::Easy, 1, 15_000),
                (Difficulty::Normal, 2, 10_000),
                (Difficulty::Hard, 3, 7_000),
            ]
        );
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::Normal.to_string(), "normal");
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty(_))
        ));
    }
}
