//! Thin tool endpoints mirroring the MCP registry over plain HTTP.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use scout_core::{Decision, NoteSummary, Report};
use scout_search::ExtractInput;
use scout_service::ServiceError;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::{
    ExtractRequest, NeedSearchRequest, NotesQuery, PlanRequest, SaveNoteRequest, SearchRequest,
    SubtopicRequest, SummarizeRequest, SynthesizeRequest, TopicRequest,
};
use crate::response_types::{
    ExtractResponse, NeedSearchResponse, NotesResponse, PlanResponse, ReportResponse,
    SaveNoteResponse, SearchResponse, SubtopicResponse, SummaryResponse, TopicResponse,
};

use super::{logged, request_json, verify_token};

/// POST /mcp/tools/list — the tool registry, same triples the stdio server
/// advertises.
pub async fn tools_list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = serde_json::Value::Null;
    logged(&state, "/mcp/tools/list", &request, None, Ok(scout_mcp::get_tools_json())).await
}

/// POST /mcp/topic — create a topic; duplicate titles are rejected.
pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<TopicRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let title = req.title.trim();
    let outcome = if title.is_empty() {
        Err(ApiError::BadRequest("title is required".to_owned()))
    } else {
        match state.notes.create_topic(title).await {
            Ok(topic) => Ok(TopicResponse {
                topic_id: topic.id,
                title: topic.title,
                subtopics: Vec::new(),
            }),
            Err(e) => Err(e.into()),
        }
    };
    let topic_id = match &outcome {
        Ok(r) => Some(r.topic_id),
        Err(_) => None,
    };
    logged(&state, "/mcp/topic", &request, topic_id, outcome).await
}

/// POST /mcp/subtopic/create — create a subtopic under an existing topic.
pub async fn create_subtopic(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SubtopicRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = add_subtopic(&state, &req).await;
    logged(&state, "/mcp/subtopic/create", &request, Some(req.topic_id), outcome).await
}

async fn add_subtopic(
    state: &AppState,
    req: &SubtopicRequest,
) -> Result<SubtopicResponse, ApiError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title is required".to_owned()));
    }
    if state.notes.get_topic(req.topic_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("topic '{}' not found", req.topic_id)));
    }
    let subtopic = state.notes.create_subtopic(req.topic_id, title).await?;
    Ok(SubtopicResponse { id: subtopic.id, topic_id: subtopic.topic_id, title: subtopic.title })
}

/// POST /mcp/search — cache-first search.
pub async fn search(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.query.trim().is_empty() {
        Err(ApiError::BadRequest("query is required".to_owned()))
    } else {
        let max_results = req.max_results.unwrap_or(state.default_max_results);
        state
            .search
            .search(&req.query, max_results)
            .await
            .map(|results| SearchResponse { results })
            .map_err(Into::into)
    };
    logged(&state, "/mcp/search", &request, None, outcome).await
}

/// POST /mcp/extract — pull content from text, a local file, or a page.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let input = ExtractInput { text: req.text.clone(), url: req.url.clone() };
    let outcome = state
        .extractor
        .extract(&input)
        .await
        .map(|extracted| ExtractResponse {
            source_title: extracted.source_title,
            content: extracted.content,
            summary: extracted.summary,
        })
        .map_err(|e| ServiceError::Extract(e).into());
    logged(&state, "/mcp/extract", &request, None, outcome).await
}

/// POST /mcp/save_note — dedup insert by content hash.
pub async fn save_note(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveNoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.content.trim().is_empty() {
        Err(ApiError::BadRequest("content is required".to_owned()))
    } else {
        let new_note = scout_core::NewNote {
            subtopic_id: req.subtopic_id,
            source_title: req.source_title.clone(),
            source_url: req.source_url.clone(),
            content: req.content.clone(),
            extracted_summary: req.extracted_summary.clone(),
        };
        state
            .notes
            .save_note(&new_note)
            .await
            .map(|(note, _created)| SaveNoteResponse { note_id: note.id })
            .map_err(Into::into)
    };
    logged(&state, "/mcp/save_note", &request, None, outcome).await
}

/// GET /mcp/notes?subtopic_id= — stored notes without bodies.
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<NotesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&query);

    let outcome = state
        .notes
        .notes_for_subtopic(query.subtopic_id)
        .await
        .map(|notes| NotesResponse { notes: notes.iter().map(NoteSummary::from).collect() })
        .map_err(Into::into);
    logged(&state, "/mcp/notes", &request, None, outcome).await
}

/// POST /mcp/plan — raw planner text for a topic.
pub async fn plan(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PlanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.text.trim().is_empty() {
        Err(ApiError::BadRequest("text is required".to_owned()))
    } else {
        state
            .llm
            .plan(&req.text)
            .await
            .map(|plan| PlanResponse { plan })
            .map_err(|e| ServiceError::Llm(e).into())
    };
    logged(&state, "/mcp/plan", &request, None, outcome).await
}

/// POST /mcp/need_search — normalized yes/no verdict.
pub async fn need_search(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NeedSearchRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.text.trim().is_empty() {
        Err(ApiError::BadRequest("text is required".to_owned()))
    } else {
        state
            .llm
            .decide_need_search(&req.text)
            .await
            .map(|text| NeedSearchResponse {
                need_search: Decision::from_response_text(&text).as_str(),
            })
            .map_err(|e| ServiceError::Llm(e).into())
    };
    logged(&state, "/mcp/need_search", &request, None, outcome).await
}

/// POST /mcp/summarize — model summary of one document for a subtopic.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.content.trim().is_empty() {
        Err(ApiError::BadRequest("content is required".to_owned()))
    } else {
        state
            .llm
            .summarize(&req.content, &req.subtopic)
            .await
            .map(|summary| SummaryResponse { summary })
            .map_err(|e| ServiceError::Llm(e).into())
    };
    logged(&state, "/mcp/summarize", &request, None, outcome).await
}

/// POST /mcp/synthesize — one report from compiled notes.
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = if req.topic.trim().is_empty() {
        Err(ApiError::BadRequest("topic is required".to_owned()))
    } else {
        state
            .llm
            .synthesize(&req.topic, &req.notes)
            .await
            .map(|text| ReportResponse { report: Report::Prose { text } })
            .map_err(|e| ServiceError::Llm(e).into())
    };
    logged(&state, "/mcp/synthesize", &request, None, outcome).await
}
