//! Request DTOs for the HTTP API.

use scout_core::CompiledNotes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RunRequest {
    pub topic: String,
    pub max_results: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicRequest {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubtopicRequest {
    pub topic_id: i64,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    /// Accepted for parity with the tool schema; extraction itself does not
    /// persist anything.
    pub subtopic_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveNoteRequest {
    pub subtopic_id: i64,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
    pub content: String,
    pub extracted_summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesQuery {
    pub subtopic_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NeedSearchRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
    pub subtopic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub topic: String,
    pub notes: CompiledNotes,
}
