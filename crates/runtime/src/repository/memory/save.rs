//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::SaveRecord;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Keeps the save record in memory only.
#[derive(Default)]
pub struct InMemorySaveRepository {
    record: RwLock<Option<SaveRecord>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: SaveRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn load(&self) -> Result<Option<SaveRecord>> {
        let record = self
            .record
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(*record)
    }

    fn save(&self, record: &SaveRecord) -> Result<()> {
        let mut slot = self
            .record
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(*record);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .record
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
