//! Content extraction: raw text, local files, or http(s) pages into bounded
//! note material.

use std::path::Path;
use std::time::Duration;

use scout_core::truncate_chars;
use serde::Serialize;

use crate::error::ExtractError;

/// What to extract from. `text` wins over `url`; a `file://` url is read
/// from disk; an http(s) url is fetched. Neither field present is an error.
#[derive(Debug, Clone, Default)]
pub struct ExtractInput {
    pub text: Option<String>,
    pub url: Option<String>,
}

/// Extraction result: bounded content plus the naive first-K-chars summary.
#[derive(Debug, Clone, Serialize)]
pub struct Extracted {
    /// File basename for local files, the URL itself for fetched pages,
    /// absent for raw text.
    pub source_title: Option<String>,
    /// The url field as given, when one was.
    pub source_url: Option<String>,
    pub content: String,
    pub summary: String,
}

/// Extractor with a shared HTTP client and the configured char budgets.
pub struct Extractor {
    client: reqwest::Client,
    max_content_chars: usize,
    summary_chars: usize,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("max_content_chars", &self.max_content_chars)
            .field("summary_chars", &self.summary_chars)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Creates an extractor with a bounded fetch timeout and the configured
    /// content/summary budgets.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        timeout_secs: u64,
        max_content_chars: usize,
        summary_chars: usize,
    ) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExtractError::ClientInit(e.to_string()))?;
        Ok(Self { client, max_content_chars, summary_chars })
    }

    /// Extract content by source priority: text, then `file://`, then
    /// http(s). Content is truncated to the configured budget; the summary
    /// is the first `summary_chars` characters of content.
    ///
    /// # Errors
    /// Returns an error when no source is given, a file cannot be read, or
    /// a fetch fails or returns a non-success status.
    pub async fn extract(&self, input: &ExtractInput) -> Result<Extracted, ExtractError> {
        let (source_title, content) = if let Some(text) = input.text.as_deref() {
            (None, truncate_chars(text, self.max_content_chars).to_owned())
        } else if let Some(path) = input.url.as_deref().and_then(|u| u.strip_prefix("file://")) {
            let text = tokio::fs::read_to_string(path).await.map_err(|source| {
                ExtractError::FileRead { path: path.to_owned(), source }
            })?;
            let title = Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_owned);
            (title, truncate_chars(&text, self.max_content_chars).to_owned())
        } else if let Some(url) =
            input.url.as_deref().filter(|u| u.starts_with("http://") || u.starts_with("https://"))
        {
            let content = self.fetch_page(url).await?;
            (Some(url.to_owned()), content)
        } else {
            return Err(ExtractError::NoSource);
        };

        let summary = truncate_chars(&content, self.summary_chars).to_owned();
        tracing::debug!(
            chars = content.chars().count(),
            source = source_title.as_deref().unwrap_or("raw text"),
            "extracted content"
        );
        Ok(Extracted { source_title, source_url: input.url.clone(), content, summary })
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch { url: url.to_owned(), message: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                url: url.to_owned(),
                message: format!("HTTP status {status}"),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Fetch { url: url.to_owned(), message: e.to_string() })?;
        Ok(truncate_chars(&body, self.max_content_chars).to_owned())
    }
}
