use std::sync::Arc;

use scout_storage::Storage;

/// Append-only audit log writer.
///
/// Every guarded API call, success or failure, becomes one row. A failed
/// audit write must never fail the request it describes, so errors are
/// logged and swallowed here.
pub struct EventService {
    storage: Arc<dyn Storage>,
}

impl EventService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Append one audit row. Infallible by design; storage failures are
    /// reduced to a warning.
    pub async fn log_event(
        &self,
        endpoint: &str,
        request: &serde_json::Value,
        response: &serde_json::Value,
        topic_id: Option<i64>,
    ) {
        let request_json = request.to_string();
        let response_json = response.to_string();
        if let Err(e) =
            self.storage.append_event(endpoint, &request_json, &response_json, topic_id).await
        {
            tracing::warn!(endpoint, error = %e, "failed to append audit event");
        }
    }
}
