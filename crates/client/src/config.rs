//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::Difficulty;

/// Configuration for one headless night.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Overrides the saved difficulty when set.
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
    /// Wall-clock length of one frame.
    pub frame_ms: u64,
    /// Game milliseconds simulated per wall-clock millisecond.
    pub speed: u64,
    /// Game time the guard has to survive.
    pub night_secs: u64,
    pub save_data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            difficulty: None,
            seed: None,
            frame_ms: 50,
            speed: 1,
            night_secs: 360,
            save_data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SERVER_ROOM_DIFFICULTY` - `easy`, `normal` or `hard` (default: saved value)
    /// - `SERVER_ROOM_SEED` - Seed for entity rolls (default: random)
    /// - `SERVER_ROOM_FRAME_MS` - Frame length in milliseconds (default: 50)
    /// - `SERVER_ROOM_SPEED` - Game time multiplier (default: 1)
    /// - `SERVER_ROOM_NIGHT_SECS` - Night length in game seconds (default: 360)
    /// - `SAVE_DATA_DIR` - Directory for the save file (default: platform-specific)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("SERVER_ROOM_DIFFICULTY") {
            match raw.parse::<Difficulty>() {
                Ok(difficulty) => config.difficulty = Some(difficulty),
                Err(e) => tracing::warn!("Ignoring SERVER_ROOM_DIFFICULTY: {}", e),
            }
        }

        config.seed = read_env::<u64>("SERVER_ROOM_SEED");

        if let Some(frame_ms) = read_env::<u64>("SERVER_ROOM_FRAME_MS") {
            config.frame_ms = frame_ms.max(1);
        }
        if let Some(speed) = read_env::<u64>("SERVER_ROOM_SPEED") {
            config.speed = speed.max(1);
        }
        if let Some(night_secs) = read_env::<u64>("SERVER_ROOM_NIGHT_SECS") {
            config.night_secs = night_secs.max(1);
        }

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    /// Game milliseconds advanced per frame.
    pub fn game_frame_ms(&self) -> u64 {
        self.frame_ms.saturating_mul(self.speed)
    }

    pub fn night_ms(&self) -> u64 {
        self.night_secs.saturating_mul(1_000)
    }

    /// Save directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "server-room")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_scaling() {
        let config = ClientConfig {
            frame_ms: 50,
            speed: 20,
            ..ClientConfig::default()
        };
        assert_eq!(config.game_frame_ms(), 1_000);
        assert_eq!(config.night_ms(), 360_000);
    }

    #[test]
    fn test_explicit_save_dir_wins() {
        let config = ClientConfig {
            save_data_dir: Some(PathBuf::from("/tmp/server-room-test")),
            ..ClientConfig::default()
        };
        assert_eq!(config.save_dir(), PathBuf::from("/tmp/server-room-test"));
    }
}
