use std::sync::Arc;

use scout_core::{NewNote, Note, Subtopic, Topic};
use scout_storage::Storage;

use crate::ServiceError;

/// Topics, subtopics, and notes over the persistence gateway.
///
/// The `get_or_create` variants treat a unique-constraint collision as
/// "row already exists, reuse it", which is what the pipeline wants; the
/// strict `create` variants surface the duplicate to the caller, which is
/// what the HTTP endpoints want.
pub struct NotesService {
    storage: Arc<dyn Storage>,
}

impl NotesService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Create a topic; a duplicate title is an error.
    pub async fn create_topic(&self, title: &str) -> Result<Topic, ServiceError> {
        Ok(self.storage.create_topic(title).await?)
    }

    /// Create a topic, or reuse the existing row on a title collision.
    pub async fn get_or_create_topic(&self, title: &str) -> Result<Topic, ServiceError> {
        match self.storage.create_topic(title).await {
            Ok(topic) => Ok(topic),
            Err(e) if e.is_duplicate() => {
                self.storage.get_topic_by_title(title).await?.ok_or_else(|| {
                    // duplicate reported but the row is gone; surface the original error
                    ServiceError::Storage(e)
                })
            },
            Err(e) => Err(ServiceError::Storage(e)),
        }
    }

    pub async fn get_topic(&self, id: i64) -> Result<Option<Topic>, ServiceError> {
        Ok(self.storage.get_topic(id).await?)
    }

    /// Create a subtopic; a duplicate (topic, title) pair is an error.
    pub async fn create_subtopic(
        &self,
        topic_id: i64,
        title: &str,
    ) -> Result<Subtopic, ServiceError> {
        Ok(self.storage.create_subtopic(topic_id, title).await?)
    }

    /// Create a subtopic, or reuse the existing row on a pair collision.
    /// Reuse is what keeps the note-count skip threshold effective across
    /// repeated runs of the same topic.
    pub async fn get_or_create_subtopic(
        &self,
        topic_id: i64,
        title: &str,
    ) -> Result<Subtopic, ServiceError> {
        match self.storage.create_subtopic(topic_id, title).await {
            Ok(subtopic) => Ok(subtopic),
            Err(e) if e.is_duplicate() => self
                .storage
                .get_subtopic_by_title(topic_id, title)
                .await?
                .ok_or(ServiceError::Storage(e)),
            Err(e) => Err(ServiceError::Storage(e)),
        }
    }

    /// Save a note, collapsing onto the existing row when the identity hash
    /// matches. Returns the note and whether a new row was inserted.
    pub async fn save_note(&self, input: &NewNote) -> Result<(Note, bool), ServiceError> {
        let (note, inserted) = self.storage.save_note(input).await?;
        if !inserted {
            tracing::debug!(note_id = note.id, "duplicate note save collapsed onto existing row");
        }
        Ok((note, inserted))
    }

    pub async fn notes_for_subtopic(&self, subtopic_id: i64) -> Result<Vec<Note>, ServiceError> {
        Ok(self.storage.get_notes_for_subtopic(subtopic_id).await?)
    }

    pub async fn note_count(&self, subtopic_id: i64) -> Result<usize, ServiceError> {
        Ok(self.storage.count_notes_for_subtopic(subtopic_id).await?)
    }
}
