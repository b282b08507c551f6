use std::sync::Arc;

use chrono::Utc;
use scout_core::{RunRecord, RunStatus};
use scout_storage::Storage;
use uuid::Uuid;

use crate::ServiceError;

/// Background-run registry.
///
/// Replaces fire-and-forget scheduling with a pollable record per run:
/// scheduled → running → completed | failed. The caller that scheduled a
/// run learns its fate from here, not from a side channel.
pub struct RunService {
    storage: Arc<dyn Storage>,
}

impl RunService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Insert a freshly scheduled run row and return it.
    pub async fn schedule(&self, topic: &str, max_results: u32) -> Result<RunRecord, ServiceError> {
        let run = RunRecord {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_owned(),
            max_results,
            status: RunStatus::Scheduled,
            result_json: None,
            error: None,
            started_at: Utc::now(),
            finished_at: None,
        };
        self.storage.create_run(&run).await?;
        tracing::info!(run_id = %run.id, topic, "run scheduled");
        Ok(run)
    }

    pub async fn mark_running(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.storage.mark_run_running(id).await?)
    }

    pub async fn complete(&self, id: &str, result_json: &str) -> Result<(), ServiceError> {
        Ok(self.storage.complete_run(id, result_json).await?)
    }

    pub async fn fail(&self, id: &str, error: &str) -> Result<(), ServiceError> {
        Ok(self.storage.fail_run(id, error).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<RunRecord>, ServiceError> {
        Ok(self.storage.get_run(id).await?)
    }
}
