//! SearchCacheStore implementation for SqliteStorage.

use super::*;

use crate::traits::SearchCacheStore;
use async_trait::async_trait;

#[async_trait]
impl SearchCacheStore for SqliteStorage {
    async fn get_cached_search(
        &self,
        query: &str,
    ) -> Result<Option<CachedSearch>, StorageError> {
        let row = sqlx::query(
            "SELECT id, query, results_json, created_at FROM search_cache WHERE query = ?1",
        )
        .bind(query)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_cached_search(&r)).transpose()
    }

    async fn cache_search_results(
        &self,
        query: &str,
        results_json: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO search_cache (query, results_json, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(query) DO NOTHING",
        )
        .bind(query)
        .bind(results_json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
