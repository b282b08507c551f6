use async_trait::async_trait;
use scout_core::RunRecord;

use crate::error::StorageError;

/// Background-run registry: one row per scheduled pipeline run, pollable by
/// id, transitioned scheduled → running → completed | failed.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Insert a freshly scheduled run row.
    async fn create_run(&self, run: &RunRecord) -> Result<(), StorageError>;

    /// Mark a run as running. Unknown id surfaces as `NotFound`.
    async fn mark_run_running(&self, id: &str) -> Result<(), StorageError>;

    /// Mark a run completed and attach the serialized outcome.
    async fn complete_run(&self, id: &str, result_json: &str) -> Result<(), StorageError>;

    /// Mark a run failed with the error message.
    async fn fail_run(&self, id: &str, error: &str) -> Result<(), StorageError>;

    /// Fetch a run by id.
    async fn get_run(&self, id: &str) -> Result<Option<RunRecord>, StorageError>;
}
