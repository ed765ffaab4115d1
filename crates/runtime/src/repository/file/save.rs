//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SaveRecord;

use crate::repository::{Result, SaveRepository};

/// Stores the save record as pretty-printed JSON in `save.json`.
///
/// Writes go to a temporary file first and are renamed into place, so a crash
/// mid-write never leaves a truncated record behind.
pub struct FileSaveRepository {
    path: PathBuf,
}

impl FileSaveRepository {
    pub const FILE_NAME: &'static str = "save.json";

    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveRepository for FileSaveRepository {
    fn load(&self) -> Result<Option<SaveRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let record: SaveRecord = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded save record from {}", self.path.display());

        Ok(Some(record))
    }

    fn save(&self, record: &SaveRecord) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            night = record.night,
            difficulty = %record.difficulty,
            "Saved record to {}",
            self.path.display()
        );

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted {}", self.path.display());
        }
        Ok(())
    }
}
