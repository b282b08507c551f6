//! TopicStore and SubtopicStore implementations for SqliteStorage.

use super::*;

use crate::traits::{SubtopicStore, TopicStore};
use async_trait::async_trait;

#[async_trait]
impl TopicStore for SqliteStorage {
    async fn create_topic(&self, title: &str) -> Result<Topic, StorageError> {
        let created_at = Utc::now();
        let result = sqlx::query("INSERT INTO topics (title, created_at) VALUES (?1, ?2)")
            .bind(title)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
        Ok(Topic { id: result.last_insert_rowid(), title: title.to_owned(), created_at })
    }

    async fn get_topic(&self, id: i64) -> Result<Option<Topic>, StorageError> {
        let row = sqlx::query("SELECT id, title, created_at FROM topics WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_topic(&r)).transpose()
    }

    async fn get_topic_by_title(&self, title: &str) -> Result<Option<Topic>, StorageError> {
        let row = sqlx::query("SELECT id, title, created_at FROM topics WHERE title = ?1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_topic(&r)).transpose()
    }
}

#[async_trait]
impl SubtopicStore for SqliteStorage {
    async fn create_subtopic(
        &self,
        topic_id: i64,
        title: &str,
    ) -> Result<Subtopic, StorageError> {
        let created_at = Utc::now();
        let status = SubtopicStatus::Created;
        let result = sqlx::query(
            "INSERT INTO subtopics (topic_id, title, status, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(topic_id)
        .bind(title)
        .bind(status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(Subtopic {
            id: result.last_insert_rowid(),
            topic_id,
            title: title.to_owned(),
            status,
            created_at,
        })
    }

    async fn get_subtopic(&self, id: i64) -> Result<Option<Subtopic>, StorageError> {
        let row = sqlx::query(
            "SELECT id, topic_id, title, status, created_at FROM subtopics WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_subtopic(&r)).transpose()
    }

    async fn get_subtopic_by_title(
        &self,
        topic_id: i64,
        title: &str,
    ) -> Result<Option<Subtopic>, StorageError> {
        let row = sqlx::query(
            "SELECT id, topic_id, title, status, created_at FROM subtopics
             WHERE topic_id = ?1 AND title = ?2",
        )
        .bind(topic_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_subtopic(&r)).transpose()
    }
}
