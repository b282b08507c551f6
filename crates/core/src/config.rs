use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_LLM_BASE_URL, DEFAULT_MAX_CONTENT_CHARS, DEFAULT_MAX_RESULTS,
    DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEED_DIR, DEFAULT_SKIP_THRESHOLD,
    DEFAULT_SUMMARY_CHARS,
};
use crate::env_config::{env_optional, env_parse_with_default, env_string_with_default};

/// Search backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Deterministic local results: seed documents or placeholders
    Mock,
    /// Live provider; needs a credential, falls back to mock without one
    SerpApi,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::SerpApi => "serpapi",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "serpapi" => Ok(Self::SerpApi),
            _ => Err(()),
        }
    }
}

/// Runtime configuration, read once at startup from the environment.
///
/// Every field has a default so a bare environment still boots a working
/// mock-mode server; credentials stay `None` until provided.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (`SCOUT_DB_PATH`)
    pub db_path: PathBuf,
    /// Search backend (`SCOUT_SEARCH_MODE`: `mock` | `serpapi`)
    pub search_mode: SearchMode,
    /// Live-search credential (`SERPAPI_KEY`)
    pub serpapi_key: Option<String>,
    /// Shared secret for the HTTP surface (`SCOUT_ACCESS_TOKEN`); unset
    /// disables auth entirely
    pub access_token: Option<String>,
    /// Model credential (`SCOUT_LLM_API_KEY`, falling back to `GROQ_API_KEY`)
    pub llm_api_key: Option<String>,
    /// OpenAI-compatible chat-completions root (`SCOUT_LLM_BASE_URL`)
    pub llm_base_url: String,
    /// Model name (`SCOUT_MODEL`)
    pub model: String,
    /// Outbound HTTP timeout for search and fetches (`SCOUT_REQUEST_TIMEOUT_SECS`)
    pub request_timeout_secs: u64,
    /// Note count at which search is skipped (`SCOUT_SKIP_THRESHOLD`)
    pub skip_threshold: usize,
    /// Default max search results per query (`SCOUT_MAX_RESULTS`)
    pub default_max_results: u32,
    /// Seed-documents directory for mock search (`SCOUT_SEED_DIR`)
    pub seed_docs_dir: PathBuf,
    /// Extraction content budget in chars (`SCOUT_MAX_CONTENT_CHARS`)
    pub max_content_chars: usize,
    /// Naive-summary length in chars (`SCOUT_SUMMARY_CHARS`)
    pub summary_chars: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: PathBuf::from(env_string_with_default("SCOUT_DB_PATH", DEFAULT_DB_PATH)),
            search_mode: env_parse_with_default("SCOUT_SEARCH_MODE", SearchMode::Mock),
            serpapi_key: env_optional("SERPAPI_KEY"),
            access_token: env_optional("SCOUT_ACCESS_TOKEN"),
            llm_api_key: env_optional("SCOUT_LLM_API_KEY").or_else(|| env_optional("GROQ_API_KEY")),
            llm_base_url: env_string_with_default("SCOUT_LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: env_string_with_default("SCOUT_MODEL", DEFAULT_MODEL),
            request_timeout_secs: env_parse_with_default(
                "SCOUT_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            skip_threshold: env_parse_with_default("SCOUT_SKIP_THRESHOLD", DEFAULT_SKIP_THRESHOLD),
            default_max_results: env_parse_with_default("SCOUT_MAX_RESULTS", DEFAULT_MAX_RESULTS),
            seed_docs_dir: PathBuf::from(env_string_with_default("SCOUT_SEED_DIR", DEFAULT_SEED_DIR)),
            max_content_chars: env_parse_with_default(
                "SCOUT_MAX_CONTENT_CHARS",
                DEFAULT_MAX_CONTENT_CHARS,
            ),
            summary_chars: env_parse_with_default("SCOUT_SUMMARY_CHARS", DEFAULT_SUMMARY_CHARS),
        }
    }

    /// Whether the HTTP surface requires the shared-secret header.
    pub fn auth_enabled(&self) -> bool {
        self.access_token.is_some()
    }
}

impl Default for Config {
    /// Built-in defaults without consulting the environment. Used by tests
    /// that want a known baseline to override field by field.
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            search_mode: SearchMode::Mock,
            serpapi_key: None,
            access_token: None,
            llm_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            skip_threshold: DEFAULT_SKIP_THRESHOLD,
            default_max_results: DEFAULT_MAX_RESULTS,
            seed_docs_dir: PathBuf::from(DEFAULT_SEED_DIR),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            summary_chars: DEFAULT_SUMMARY_CHARS,
        }
    }
}
