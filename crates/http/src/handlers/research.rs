//! Synchronous full-pipeline endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::RunRequest;
use crate::response_types::ResearchResponse;

use super::{logged, request_json, verify_token};

/// POST /research/langgraph — run the whole pipeline inline and return the
/// outcome. The path keeps the original public contract.
pub async fn research_sync(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RunRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let (topic_id, outcome) = run(&state, &req).await;
    logged(&state, "/research/langgraph", &request, topic_id, outcome).await
}

async fn run(
    state: &AppState,
    req: &RunRequest,
) -> (Option<i64>, Result<ResearchResponse, ApiError>) {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return (None, Err(ApiError::BadRequest("topic is required".to_owned())));
    }
    let max_results = req.max_results.unwrap_or(state.default_max_results);

    match state.orchestrator.run(topic, max_results).await {
        Ok(outcome) => {
            let response = ResearchResponse {
                success: true,
                topic: outcome.topic.clone(),
                subtopics: outcome.subtopics.clone(),
                notes: outcome.notes_by_subtopic(),
                report: outcome.report.clone(),
            };
            (outcome.topic_id, Ok(response))
        },
        Err(e) => (None, Err(e.into())),
    }
}
