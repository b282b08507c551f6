//! Background-run scheduling and polling.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use serde_json::json;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::RunRequest;
use crate::response_types::{RunScheduledResponse, RunStatusResponse};

use super::{logged, request_json, verify_token};

/// POST /agent/run — insert a `scheduled` row, spawn the pipeline, return
/// immediately. Pipeline failures land in the run registry, never here.
pub async fn schedule_run(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RunRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = request_json(&req);

    let outcome = schedule(&state, &req).await;
    logged(&state, "/agent/run", &request, None, outcome).await
}

async fn schedule(
    state: &Arc<AppState>,
    req: &RunRequest,
) -> Result<RunScheduledResponse, ApiError> {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::BadRequest("topic is required".to_owned()));
    }
    let max_results = req.max_results.unwrap_or(state.default_max_results);

    let run = state.runs.schedule(topic, max_results).await?;
    spawn_pipeline(Arc::clone(state), run.id.clone(), topic.to_owned(), max_results);

    Ok(RunScheduledResponse {
        run_id: run.id,
        status: run.status.as_str(),
        started_at: run.started_at,
    })
}

fn spawn_pipeline(state: Arc<AppState>, run_id: String, topic: String, max_results: u32) {
    tokio::spawn(async move {
        if let Err(e) = state.runs.mark_running(&run_id).await {
            tracing::error!(run_id, error = %e, "failed to mark run running");
            return;
        }
        match state.orchestrator.run(&topic, max_results).await {
            Ok(outcome) => {
                let result_json = match serde_json::to_string(&outcome) {
                    Ok(s) => s,
                    Err(e) => {
                        record_failure(&state, &run_id, &format!("result serialization: {e}"))
                            .await;
                        return;
                    },
                };
                if let Err(e) = state.runs.complete(&run_id, &result_json).await {
                    tracing::error!(run_id, error = %e, "failed to record run completion");
                }
            },
            Err(e) => record_failure(&state, &run_id, &e.to_string()).await,
        }
    });
}

async fn record_failure(state: &AppState, run_id: &str, message: &str) {
    tracing::warn!(run_id, error = message, "background run failed");
    state
        .events
        .log_event("/agent/run", &json!({ "run_id": run_id }), &json!({ "error": message }), None)
        .await;
    if let Err(e) = state.runs.fail(run_id, message).await {
        tracing::error!(run_id, error = %e, "failed to record run failure");
    }
}

/// GET /agent/run/{run_id} — poll a scheduled run.
pub async fn get_run(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(run_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    verify_token(&headers, state.access_token.as_deref())?;
    let request = json!({ "run_id": run_id });

    let outcome = fetch_run(&state, &run_id).await;
    logged(&state, "/agent/run/{run_id}", &request, None, outcome).await
}

async fn fetch_run(state: &AppState, run_id: &str) -> Result<RunStatusResponse, ApiError> {
    let run = state
        .runs
        .get(run_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("run '{run_id}' not found")))?;

    // opaque storage on the way in, structured JSON on the way out
    let result = run.result_json.as_deref().and_then(|s| serde_json::from_str(s).ok());
    Ok(RunStatusResponse {
        run_id: run.id,
        status: run.status.as_str().to_owned(),
        result,
        error: run.error,
        started_at: run.started_at,
        finished_at: run.finished_at,
    })
}
