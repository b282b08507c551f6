use async_trait::async_trait;
use scout_core::{NewNote, Note};

use crate::error::StorageError;

/// Note persistence with hash-based de-duplication.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note, or return the existing row when its identity hash is
    /// already present. `true` means a new row was inserted.
    async fn save_note(&self, input: &NewNote) -> Result<(Note, bool), StorageError>;

    /// All notes for a subtopic, newest first.
    async fn get_notes_for_subtopic(&self, subtopic_id: i64) -> Result<Vec<Note>, StorageError>;

    /// Count notes for a subtopic.
    async fn count_notes_for_subtopic(&self, subtopic_id: i64) -> Result<usize, StorageError>;
}
