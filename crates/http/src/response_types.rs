//! Response DTOs for the HTTP API.

use chrono::{DateTime, Utc};
use scout_core::{NoteSummary, Report, SearchHit};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RunScheduledResponse {
    pub run_id: String,
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RunStatusResponse {
    pub run_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub success: bool,
    pub topic: String,
    pub subtopics: Vec<String>,
    pub notes: BTreeMap<String, Vec<NoteSummary>>,
    pub report: Report,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub topic_id: i64,
    pub title: String,
    pub subtopics: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubtopicResponse {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub source_title: Option<String>,
    pub content: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SaveNoteResponse {
    pub note_id: i64,
}

#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<NoteSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct NeedSearchResponse {
    pub need_search: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: Report,
}
