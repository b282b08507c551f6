use async_trait::async_trait;
use scout_core::CachedSearch;

use crate::error::StorageError;

/// Exact-query search result cache.
#[async_trait]
pub trait SearchCacheStore: Send + Sync {
    /// Cached results for an exact query string, if present.
    async fn get_cached_search(&self, query: &str) -> Result<Option<CachedSearch>, StorageError>;

    /// Write results for a query. First writer wins; later writes for the
    /// same query are no-ops, so repeat lookups stay byte-identical.
    async fn cache_search_results(
        &self,
        query: &str,
        results_json: &str,
    ) -> Result<(), StorageError>;
}
