pub mod agent;
pub mod mcp;
pub mod research;

use axum::Json;
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::json;

use crate::AppState;
use crate::api_error::ApiError;

/// Header carrying the shared access token.
pub const TOKEN_HEADER: &str = "x-mcp-token";

/// Shared-secret check. No configured token means the API is open.
pub(crate) fn verify_token(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Audit-log a handler outcome and wrap it for the wire. The error body
/// logged matches what the client receives.
pub(crate) async fn logged<T: Serialize>(
    state: &AppState,
    endpoint: &str,
    request: &serde_json::Value,
    topic_id: Option<i64>,
    outcome: Result<T, ApiError>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match outcome {
        Ok(response) => {
            let value =
                serde_json::to_value(&response).map_err(|e| ApiError::Internal(e.into()))?;
            state.events.log_event(endpoint, request, &value, topic_id).await;
            Ok(Json(value))
        },
        Err(e) => {
            let body = json!({ "error": e.client_message() });
            state.events.log_event(endpoint, request, &body, topic_id).await;
            Err(e)
        },
    }
}

/// Request body as a JSON value for the audit log. DTOs always serialize;
/// a failure here would be a bug, so it degrades to null.
pub(crate) fn request_json<T: Serialize>(request: &T) -> serde_json::Value {
    serde_json::to_value(request).unwrap_or(serde_json::Value::Null)
}
