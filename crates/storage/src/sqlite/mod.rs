//! SQLite storage backend using sqlx.
//!
//! Split into modular files by domain concern.

// Row counts and pagination arithmetic are bounded by SQLite limits
#![allow(
    clippy::arithmetic_side_effects,
    reason = "DB row counts and id arithmetic are bounded by SQLite limits"
)]

mod events;
mod notes;
mod runs;
mod search_cache;
mod topics;

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use scout_core::constants::{SQLITE_BUSY_TIMEOUT_MS, SQLITE_POOL_MAX_CONNECTIONS};
use scout_core::{CachedSearch, Note, RunRecord, RunStatus, Subtopic, SubtopicStatus, Topic};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::error::StorageError;
use crate::migrations::run_migrations;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open the database at `path`, creating it if missing, and run
    /// migrations. WAL journaling and a busy timeout handle the write
    /// contention between HTTP handlers and background runs.
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_millis(SQLITE_BUSY_TIMEOUT_MS))
            .pragma("foreign_keys", "ON")
            .pragma("journal_mode", "WAL");
        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_POOL_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(path = %path.display(), "SqliteStorage initialized");
        Ok(Self { pool })
    }

    /// In-memory database for tests. Single connection with shared cache so
    /// the data outlives individual pool checkouts.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .shared_cache(true)
            .pragma("foreign_keys", "ON");
        let pool =
            SqlitePoolOptions::new().max_connections(1).connect_with(options).await?;
        run_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        Ok(Self { pool })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parse `SubtopicStatus` from a TEXT column, defaulting on unknown values.
pub(crate) fn parse_subtopic_status(s: &str) -> SubtopicStatus {
    s.parse().unwrap_or_else(|()| {
        tracing::warn!(invalid_status = %s, "unrecognized subtopic status in DB, defaulting to created");
        SubtopicStatus::Created
    })
}

pub(crate) fn row_to_topic(row: &SqliteRow) -> Result<Topic, StorageError> {
    Ok(Topic {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_subtopic(row: &SqliteRow) -> Result<Subtopic, StorageError> {
    let status: String = row.try_get("status")?;
    Ok(Subtopic {
        id: row.try_get("id")?,
        topic_id: row.try_get("topic_id")?,
        title: row.try_get("title")?,
        status: parse_subtopic_status(&status),
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_note(row: &SqliteRow) -> Result<Note, StorageError> {
    Ok(Note {
        id: row.try_get("id")?,
        subtopic_id: row.try_get("subtopic_id")?,
        source_title: row.try_get("source_title")?,
        source_url: row.try_get("source_url")?,
        content: row.try_get("content")?,
        extracted_summary: row.try_get("extracted_summary")?,
        content_hash: row.try_get("content_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_cached_search(row: &SqliteRow) -> Result<CachedSearch, StorageError> {
    Ok(CachedSearch {
        id: row.try_get("id")?,
        query: row.try_get("query")?,
        results_json: row.try_get("results_json")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_run(row: &SqliteRow) -> Result<RunRecord, StorageError> {
    let id: String = row.try_get("id")?;
    let status_raw: String = row.try_get("status")?;
    let status = status_raw.parse::<RunStatus>().map_err(|()| StorageError::DataCorruption {
        context: format!("run {id} has unrecognized status {status_raw:?}"),
        source: "unknown enum value".into(),
    })?;
    Ok(RunRecord {
        id,
        topic: row.try_get("topic")?,
        max_results: row.try_get("max_results")?,
        status,
        result_json: row.try_get("result_json")?,
        error: row.try_get("error")?,
        started_at: row.try_get("started_at")?,
        finished_at: row.try_get("finished_at")?,
    })
}
