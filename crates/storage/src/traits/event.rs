use async_trait::async_trait;

use crate::error::StorageError;

/// Append-only audit log. The pipeline never reads it back.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one audit row; returns the new row id.
    async fn append_event(
        &self,
        endpoint: &str,
        request_json: &str,
        response_json: &str,
        topic_id: Option<i64>,
    ) -> Result<i64, StorageError>;
}
