use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-supplied research question driving one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier
    pub id: i64,
    /// Research question; unique across all topics
    pub title: String,
    /// When this topic was created
    pub created_at: DateTime<Utc>,
}

/// Lifecycle marker for a subtopic.
///
/// Written once at creation and carried through reads; nothing transitions
/// it yet, so `Created` is the only state a row can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubtopicStatus {
    /// Planned by the orchestrator, nothing else recorded
    Created,
}

impl SubtopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
        }
    }
}

impl std::str::FromStr for SubtopicStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(Self::Created),
            _ => Err(()),
        }
    }
}

/// A planner-derived sub-question investigated independently
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtopic {
    /// Unique identifier
    pub id: i64,
    /// Topic this subtopic belongs to
    pub topic_id: i64,
    /// Sub-question text; unique per (topic_id, title)
    pub title: String,
    /// Inert lifecycle marker
    pub status: SubtopicStatus,
    /// When this subtopic was created
    pub created_at: DateTime<Utc>,
}

/// One persisted unit of extracted source material tied to a subtopic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: i64,
    /// Subtopic this note belongs to
    pub subtopic_id: i64,
    /// Human-readable source name (file name, page title, or URL)
    pub source_title: Option<String>,
    /// Where the content came from, if it came from anywhere addressable
    pub source_url: Option<String>,
    /// Extracted content, already truncated to the configured budget
    pub content: String,
    /// Short summary, when one was produced at extraction time
    pub extracted_summary: Option<String>,
    /// Digest of (url prefix, content prefix); unique across all notes
    pub content_hash: String,
    /// When this note was created
    pub created_at: DateTime<Utc>,
}

/// Input for saving a note; the identity hash is derived, never supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub subtopic_id: i64,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
    pub content: String,
    pub extracted_summary: Option<String>,
}

/// Compact note view for listings and run transcripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: i64,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
    pub extracted_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            source_title: note.source_title.clone(),
            source_url: note.source_url.clone(),
            extracted_summary: note.extracted_summary.clone(),
            created_at: note.created_at,
        }
    }
}

/// One search result in canonical shape, whatever backend produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Cached backend response for one exact query string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSearch {
    /// Unique identifier
    pub id: i64,
    /// Exact query as issued; case-sensitive, unnormalized
    pub query: String,
    /// Serialized `Vec<SearchHit>` exactly as first returned
    pub results_json: String,
    /// When this entry was written
    pub created_at: DateTime<Utc>,
}

/// Append-only audit row for one API call. Written on every guarded
/// endpoint, success or failure; never read back by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchEvent {
    pub id: i64,
    /// Endpoint path, e.g. `/mcp/search`
    pub endpoint: String,
    /// Serialized request body
    pub request_json: String,
    /// Serialized response body, or the error body on failure
    pub response_json: String,
    /// Topic the call belonged to, when one is known
    pub topic_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// State of a scheduled background run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Row written, pipeline not started
    Scheduled,
    /// Pipeline in progress
    Running,
    /// Pipeline finished; `result_json` holds the outcome
    Completed,
    /// Pipeline errored; `error` holds the message
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for RunStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(()),
        }
    }
}

/// One scheduled pipeline run, pollable by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// UUID assigned at scheduling time
    pub id: String,
    /// Topic the run researches
    pub topic: String,
    /// Max search results per subtopic for this run
    pub max_results: u32,
    pub status: RunStatus,
    /// Serialized run outcome, present once completed
    pub result_json: Option<String>,
    /// Failure message, present once failed
    pub error: Option<String>,
    /// When the run was scheduled
    pub started_at: DateTime<Utc>,
    /// When the run completed or failed
    pub finished_at: Option<DateTime<Utc>>,
}
