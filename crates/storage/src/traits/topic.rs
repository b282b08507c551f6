use async_trait::async_trait;
use scout_core::{Subtopic, Topic};

use crate::error::StorageError;

/// CRUD operations on topics.
#[async_trait]
pub trait TopicStore: Send + Sync {
    /// Create a topic. A duplicate title surfaces as `StorageError::Duplicate`.
    async fn create_topic(&self, title: &str) -> Result<Topic, StorageError>;

    /// Get topic by ID.
    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, StorageError>;

    /// Get topic by exact title.
    async fn get_topic_by_title(&self, title: &str) -> Result<Option<Topic>, StorageError>;
}

/// CRUD operations on subtopics.
#[async_trait]
pub trait SubtopicStore: Send + Sync {
    /// Create a subtopic. A duplicate (topic_id, title) pair surfaces as
    /// `StorageError::Duplicate`.
    async fn create_subtopic(&self, topic_id: i64, title: &str)
    -> Result<Subtopic, StorageError>;

    /// Get subtopic by ID.
    async fn get_subtopic(&self, id: i64) -> Result<Option<Subtopic>, StorageError>;

    /// Get subtopic by (topic_id, exact title).
    async fn get_subtopic_by_title(
        &self,
        topic_id: i64,
        title: &str,
    ) -> Result<Option<Subtopic>, StorageError>;
}
