//! Repository contract for the persisted settings record.

use game_core::SaveRecord;

use super::Result;

/// Storage for the single [`SaveRecord`] of a player profile.
///
/// Only difficulty, night and the intro flag are stored; sessions always
/// rebuild entity and heat state from scratch.
pub trait SaveRepository: Send + Sync {
    /// Load the record, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<SaveRecord>>;

    /// Replace the stored record.
    fn save(&self, record: &SaveRecord) -> Result<()>;

    /// Remove the stored record, if any.
    fn clear(&self) -> Result<()>;

    /// Load the record or fall back to a fresh one.
    fn load_or_default(&self) -> Result<SaveRecord> {
        Ok(self.load()?.unwrap_or_default())
    }
}
