//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into proper HTTP responses with JSON body and
//! status codes. Handlers return `Result<Json<T>, ApiError>` instead of
//! losing error context with bare `StatusCode`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scout_search::ExtractError;
use scout_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client — no error detail leakage.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized — missing or wrong access token.
    Unauthorized,
    /// 404 Not Found — requested resource doesn't exist.
    NotFound(String),
    /// 422 Unprocessable Entity — valid syntax but semantic rejection (e.g., duplicate).
    UnprocessableEntity(String),
    /// 502 Bad Gateway — an upstream collaborator (LLM, search provider, page fetch) failed.
    UpstreamFailed(String),
    /// 500 Internal Server Error — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl ApiError {
    /// The message the client will see, used for audit logging before the
    /// response is consumed.
    pub fn client_message(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::UnprocessableEntity(msg)
            | Self::UpstreamFailed(msg) => msg.clone(),
            Self::Unauthorized => "invalid or missing access token".to_owned(),
            Self::Internal(_) => "internal server error".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(ref err) => {
                tracing::error!(error = ?err, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };
        let body = serde_json::json!({ "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Extract(ExtractError::NoSource) => {
                Self::BadRequest(ExtractError::NoSource.to_string())
            },
            ref e if e.is_duplicate() => Self::UnprocessableEntity(err.to_string()),
            ref e if e.is_not_found() => Self::NotFound(err.to_string()),
            ref e if e.is_upstream() => Self::UpstreamFailed(err.to_string()),
            ServiceError::EmptyPlan => Self::UpstreamFailed(err.to_string()),
            _ => Self::Internal(err.into()),
        }
    }
}
