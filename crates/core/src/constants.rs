//! Shared constants for scout.
//!
//! Centralizes the tunables and magic numbers used across crates; the
//! configurable ones are defaults overridable through [`crate::Config`].

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "scout.db";

/// Default OpenAI-compatible chat-completions root (Groq).
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model for all four LLM operations.
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Outbound HTTP timeout for search and page fetches, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Note count at which the search decision short-circuits to "no".
pub const DEFAULT_SKIP_THRESHOLD: usize = 2;

/// Default number of search results requested per query.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Directory scanned for seed documents when search runs in mock mode.
pub const DEFAULT_SEED_DIR: &str = "data/seed_docs";

/// Extraction content budget, in characters.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 20_000;

/// Naive-summary length (first K characters of content).
pub const DEFAULT_SUMMARY_CHARS: usize = 400;

/// SQLite connection pool: maximum connections.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in milliseconds.
pub const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Characters of the source URL fed into the note identity hash.
pub const URL_HASH_PREFIX_CHARS: usize = 2_000;

/// Characters of the content fed into the note identity hash.
pub const CONTENT_HASH_PREFIX_CHARS: usize = 20_000;

/// Snippet length for seed-document search hits, in characters.
pub const SEED_SNIPPET_CHARS: usize = 250;

/// Hard cap on planned subtopics per run.
pub const MAX_SUBTOPICS: usize = 7;

/// Characters of content included in the summarize prompt window.
pub const SUMMARIZE_PROMPT_CHARS: usize = 2_000;

/// Fallback summary length when the summarize call fails, in characters.
pub const SUMMARIZE_FALLBACK_CHARS: usize = 500;
