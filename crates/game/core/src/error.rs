//! Construction-time validation errors.
//!
//! Gameplay operations never fail: rejected requests are absorbed as no-ops
//! and reported through return values. The only fallible calls are the ones
//! that build configuration values (levels, difficulties, paths).

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("ai level {0} is outside the 1..=20 range")]
    LevelOutOfRange(u8),

    #[error("unknown difficulty `{0}` (expected easy, normal or hard)")]
    UnknownDifficulty(String),
}

/// Invalid entity path definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("entity path must contain at least one room before the terminal marker")]
    Empty,
}
