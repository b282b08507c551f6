//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM, search, and extraction failures into a single
//! error type, enabling callers to match on specific failure modes instead
//! of downcasting opaque boxes.

use scout_llm::LlmError;
use scout_search::{ExtractError, SearchError};
use scout_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying the failure modes of every collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// LLM API call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Live search provider call failed.
    #[error("search: {0}")]
    Search(#[from] SearchError),

    /// Content extraction failed.
    #[error("extract: {0}")]
    Extract(#[from] ExtractError),

    /// Caller provided invalid input (empty text, malformed data).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization failed in the service layer.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The planner produced no parseable subtopics; the run cannot proceed.
    #[error("planner returned no subtopics")]
    EmptyPlan,
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::Llm(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }

    /// Whether this error came from an upstream collaborator (LLM, search
    /// provider, page fetch) rather than from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Llm(_) | Self::Search(_) | Self::Extract(_))
    }
}
