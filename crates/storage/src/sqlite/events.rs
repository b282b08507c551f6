//! EventStore implementation for SqliteStorage.

use super::*;

use crate::traits::EventStore;
use async_trait::async_trait;

#[async_trait]
impl EventStore for SqliteStorage {
    async fn append_event(
        &self,
        endpoint: &str,
        request_json: &str,
        response_json: &str,
        topic_id: Option<i64>,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO events (endpoint, request_json, response_json, topic_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(endpoint)
        .bind(request_json)
        .bind(response_json)
        .bind(topic_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }
}
