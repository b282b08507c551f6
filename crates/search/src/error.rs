//! Typed error enums for the search and extraction adapters.

use thiserror::Error;

/// Errors from the live search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

/// Errors from content extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Neither text nor url was provided.
    #[error("no url or text provided")]
    NoSource,
    #[error("error reading file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error fetching URL {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
