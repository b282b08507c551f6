//! RunStore implementation for SqliteStorage.

use super::*;

use crate::traits::RunStore;
use async_trait::async_trait;

#[async_trait]
impl RunStore for SqliteStorage {
    async fn create_run(&self, run: &RunRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"INSERT INTO runs
               (id, topic, max_results, status, result_json, error, started_at, finished_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
        )
        .bind(&run.id)
        .bind(&run.topic)
        .bind(run.max_results)
        .bind(run.status.as_str())
        .bind(&run.result_json)
        .bind(&run.error)
        .bind(run.started_at)
        .bind(run.finished_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_run_running(&self, id: &str) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE runs SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(RunStatus::Running.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { entity: "run", id: id.to_owned() });
        }
        Ok(())
    }

    async fn complete_run(&self, id: &str, result_json: &str) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE runs SET status = ?2, result_json = ?3, finished_at = ?4 WHERE id = ?1",
        )
        .bind(id)
        .bind(RunStatus::Completed.as_str())
        .bind(result_json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { entity: "run", id: id.to_owned() });
        }
        Ok(())
    }

    async fn fail_run(&self, id: &str, error: &str) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE runs SET status = ?2, error = ?3, finished_at = ?4 WHERE id = ?1",
        )
        .bind(id)
        .bind(RunStatus::Failed.as_str())
        .bind(error)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound { entity: "run", id: id.to_owned() });
        }
        Ok(())
    }

    async fn get_run(&self, id: &str) -> Result<Option<RunRecord>, StorageError> {
        let row = sqlx::query(
            "SELECT id, topic, max_results, status, result_json, error, started_at, finished_at
             FROM runs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_run(&r)).transpose()
    }
}
