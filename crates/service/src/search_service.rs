use std::path::PathBuf;
use std::sync::Arc;

use scout_core::SearchHit;
use scout_search::{SerpApiClient, local_search};
use scout_storage::Storage;

use crate::ServiceError;

/// Where cache misses go. Chosen once at startup from the configured mode
/// and credential; `Local` covers both seed documents and placeholders.
pub enum SearchBackend {
    Live(SerpApiClient),
    Local { seed_dir: PathBuf },
}

impl std::fmt::Debug for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live(_) => f.write_str("SearchBackend::Live"),
            Self::Local { seed_dir } => {
                f.debug_struct("SearchBackend::Local").field("seed_dir", seed_dir).finish()
            },
        }
    }
}

/// Cache-first search over a swappable backend.
///
/// A hit on the exact query string is returned unconditionally, bypassing
/// the backend entirely — so repeat queries stay byte-identical even when
/// the mode changes between calls. First writer wins on the cache row.
pub struct SearchService {
    storage: Arc<dyn Storage>,
    backend: SearchBackend,
}

impl SearchService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, backend: SearchBackend) -> Self {
        Self { storage, backend }
    }

    /// Search with exact-query caching. Case-sensitive, unnormalized: `"A"`
    /// and `"a"` are different cache keys.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, ServiceError> {
        if let Some(cached) = self.storage.get_cached_search(query).await? {
            tracing::debug!(query, "search cache hit");
            return Ok(serde_json::from_str(&cached.results_json)?);
        }

        let hits = match &self.backend {
            SearchBackend::Live(client) => client.search(query, max_results).await?,
            SearchBackend::Local { seed_dir } => local_search(seed_dir, query, max_results).await,
        };

        let results_json = serde_json::to_string(&hits)?;
        self.storage.cache_search_results(query, &results_json).await?;
        tracing::info!(query, results = hits.len(), "search results cached");
        Ok(hits)
    }
}
