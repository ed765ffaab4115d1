//! Repository layer for persisted player progress.
//!
//! Only the settings record (difficulty, night, intro flag) outlives a
//! session. Live simulation state is never written out.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
