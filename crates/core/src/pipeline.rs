use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::research::{NoteSummary, SearchHit};

/// Binary search-or-not verdict. Never a free-form string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Yes,
    No,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Normalize raw model output into a verdict: lowercase, then look for
    /// the substring "yes". Anything else, including empty text, is `No`.
    pub fn from_response_text(text: &str) -> Self {
        if text.to_lowercase().contains("yes") {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Verdict plus the rationale recorded in the run transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub reason: String,
}

/// Note texts grouped per subtopic title, as fed to synthesis
pub type CompiledNotes = BTreeMap<String, Vec<String>>;

/// Final output of a run.
///
/// Serialization is tagged so callers can tell a prose report from the
/// fallback aggregate by looking at `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Report {
    /// Model-written report, returned as opaque text
    Prose { text: String },
    /// Compiled notes plus a timestamp, produced when synthesis fails
    Fallback {
        topic: String,
        generated_at: DateTime<Utc>,
        compiled_notes: CompiledNotes,
    },
}

impl Report {
    pub fn is_prose(&self) -> bool {
        matches!(self, Self::Prose { .. })
    }
}

/// Per-source outcome while extracting and saving one subtopic's results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SourceOutcome {
    /// Extracted and persisted (or collapsed into an existing note)
    Saved { url: String, note_id: i64 },
    /// Extracted but not persisted, e.g. no subtopic row exists
    Unsaved { url: String },
    /// Extraction or persistence failed; the run continued
    Failed { url: String, error: String },
}

/// Everything recorded for one subtopic during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtopicFindings {
    pub title: String,
    /// Missing when the subtopic row could not be created
    pub subtopic_id: Option<i64>,
    pub decision: DecisionOutcome,
    /// Search hits this run acted on; empty when search was skipped or failed
    pub hits: Vec<SearchHit>,
    /// One entry per hit processed
    pub sources: Vec<SourceOutcome>,
    /// Persisted notes for the subtopic after this run's pass
    pub notes: Vec<NoteSummary>,
}

/// Result of one full pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Missing when topic creation failed and the run carried on anyway
    pub topic_id: Option<i64>,
    pub topic: String,
    /// Planned subtopics in first-seen order
    pub subtopics: Vec<String>,
    pub findings: Vec<SubtopicFindings>,
    pub report: Report,
}

impl RunOutcome {
    /// Notes grouped by subtopic title, for transcript-style responses.
    pub fn notes_by_subtopic(&self) -> BTreeMap<String, Vec<NoteSummary>> {
        self.findings
            .iter()
            .map(|f| (f.title.clone(), f.notes.clone()))
            .collect()
    }
}
