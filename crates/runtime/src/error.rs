//! Unified error types surfaced by the runtime API.

use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] game_core::ConfigError),

    #[error("invalid entity path")]
    Path(#[source] game_core::PathError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<game_core::PathError> for RuntimeError {
    fn from(error: game_core::PathError) -> Self {
        Self::Path(error)
    }
}
