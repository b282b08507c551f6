//! NoteStore implementation for SqliteStorage.

use super::*;

use crate::traits::NoteStore;
use async_trait::async_trait;
use scout_core::{NewNote, note_content_hash};

impl SqliteStorage {
    async fn get_note_by_hash(&self, content_hash: &str) -> Result<Option<Note>, StorageError> {
        let row = sqlx::query(
            "SELECT id, subtopic_id, source_title, source_url, content, extracted_summary,
                    content_hash, created_at
             FROM notes WHERE content_hash = ?1",
        )
        .bind(content_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_note(&r)).transpose()
    }
}

#[async_trait]
impl NoteStore for SqliteStorage {
    async fn save_note(&self, input: &NewNote) -> Result<(Note, bool), StorageError> {
        let content_hash = note_content_hash(input.source_url.as_deref(), &input.content);
        if let Some(existing) = self.get_note_by_hash(&content_hash).await? {
            return Ok((existing, false));
        }
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO notes
               (subtopic_id, source_title, source_url, content, extracted_summary,
                content_hash, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
        )
        .bind(input.subtopic_id)
        .bind(&input.source_title)
        .bind(&input.source_url)
        .bind(&input.content)
        .bind(&input.extracted_summary)
        .bind(&content_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await;
        match result {
            Ok(r) => Ok((
                Note {
                    id: r.last_insert_rowid(),
                    subtopic_id: input.subtopic_id,
                    source_title: input.source_title.clone(),
                    source_url: input.source_url.clone(),
                    content: input.content.clone(),
                    extracted_summary: input.extracted_summary.clone(),
                    content_hash,
                    created_at,
                },
                true,
            )),
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                // lost an insert race; the winner's row is the note
                let existing = self.get_note_by_hash(&content_hash).await?.ok_or_else(|| {
                    StorageError::NotFound { entity: "note", id: content_hash.clone() }
                })?;
                Ok((existing, false))
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn get_notes_for_subtopic(&self, subtopic_id: i64) -> Result<Vec<Note>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, subtopic_id, source_title, source_url, content, extracted_summary,
                    content_hash, created_at
             FROM notes WHERE subtopic_id = ?1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(subtopic_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_note).collect()
    }

    async fn count_notes_for_subtopic(&self, subtopic_id: i64) -> Result<usize, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE subtopic_id = ?1")
                .bind(subtopic_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
