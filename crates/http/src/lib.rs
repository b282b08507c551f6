//! HTTP API server for scout
//!
//! Exposes the research pipeline three ways: scheduled background runs
//! (`/agent/run`), the synchronous pipeline (`/research/langgraph`), and
//! thin per-tool endpoints under `/mcp/*`. Guarded routes share an optional
//! `x-mcp-token` secret and append one audit event per call.

pub mod api_error;
mod api_types;
mod handlers;
mod response_types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use scout_llm::LlmClient;
use scout_search::Extractor;
use scout_service::{EventService, NotesService, Orchestrator, RunService, SearchService};

pub use api_error::ApiError;
pub use handlers::TOKEN_HEADER;

use response_types::{BannerResponse, HealthResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Shared secret for guarded routes; `None` disables auth.
    pub access_token: Option<String>,
    /// Hit cap applied when a request omits `max_results`.
    pub default_max_results: u32,
    pub notes: Arc<NotesService>,
    pub search: Arc<SearchService>,
    pub events: Arc<EventService>,
    pub runs: Arc<RunService>,
    pub llm: Arc<LlmClient>,
    pub extractor: Arc<Extractor>,
    pub orchestrator: Arc<Orchestrator>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/agent/run", post(handlers::agent::schedule_run))
        .route("/agent/run/{run_id}", get(handlers::agent::get_run))
        .route("/research/langgraph", post(handlers::research::research_sync))
        .route("/mcp/tools/list", post(handlers::mcp::tools_list))
        .route("/mcp/topic", post(handlers::mcp::create_topic))
        .route("/mcp/subtopic/create", post(handlers::mcp::create_subtopic))
        .route("/mcp/search", post(handlers::mcp::search))
        .route("/mcp/extract", post(handlers::mcp::extract))
        .route("/mcp/save_note", post(handlers::mcp::save_note))
        .route("/mcp/notes", get(handlers::mcp::list_notes))
        .route("/mcp/plan", post(handlers::mcp::plan))
        .route("/mcp/need_search", post(handlers::mcp::need_search))
        .route("/mcp/summarize", post(handlers::mcp::summarize))
        .route("/mcp/synthesize", post(handlers::mcp::synthesize))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        service: "scout",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/mcp/tools/list",
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use scout_service::SearchBackend;
    use scout_storage::{SqliteStorage, Storage};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method as wm_method, path as wm_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixture {
        router: Router,
        _seed_dir: tempfile::TempDir,
    }

    async fn fixture(llm_uri: &str, access_token: Option<&str>) -> Fixture {
        let seed_dir = tempfile::tempdir().unwrap();
        std::fs::write(seed_dir.path().join("doc.txt"), "Seed body about batteries.").unwrap();

        let storage: Arc<dyn Storage> =
            Arc::new(SqliteStorage::new_in_memory().await.unwrap());
        let notes = Arc::new(NotesService::new(Arc::clone(&storage)));
        let search = Arc::new(SearchService::new(Arc::clone(&storage), SearchBackend::Local {
            seed_dir: seed_dir.path().to_path_buf(),
        }));
        let llm = Arc::new(
            LlmClient::new("k".to_owned(), llm_uri.to_owned(), "test-model".to_owned()).unwrap(),
        );
        let extractor = Arc::new(Extractor::new(5, 1000, 50).unwrap());
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::clone(&notes),
            Arc::clone(&search),
            Arc::clone(&llm),
            Arc::clone(&extractor),
            2,
            400,
        ));
        let state = Arc::new(AppState {
            access_token: access_token.map(str::to_owned),
            default_max_results: 3,
            notes,
            search,
            events: Arc::new(EventService::new(Arc::clone(&storage))),
            runs: Arc::new(RunService::new(Arc::clone(&storage))),
            llm,
            extractor,
            orchestrator,
        });
        Fixture { router: create_router(state), _seed_dir: seed_dir }
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_req(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn mount_pipeline_llm(server: &MockServer) {
        let completion = |content: &str| {
            ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": content, "role": "assistant" } }]
            }))
        };
        Mock::given(wm_method("POST"))
            .and(wm_path("/v1/chat/completions"))
            .and(body_string_contains("research planner"))
            .respond_with(completion("1. Alpha"))
            .mount(server)
            .await;
        Mock::given(wm_method("POST"))
            .and(wm_path("/v1/chat/completions"))
            .and(body_string_contains("requires external search"))
            .respond_with(completion("yes"))
            .mount(server)
            .await;
        Mock::given(wm_method("POST"))
            .and(wm_path("/v1/chat/completions"))
            .and(body_string_contains("research synthesizer"))
            .respond_with(completion("Final report."))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_health_and_banner_are_always_open() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), Some("secret")).await;

        let response = fx.router.clone().oneshot(get_req("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = fx.router.clone().oneshot(get_req("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "scout");
    }

    #[tokio::test]
    async fn test_guarded_route_rejects_missing_and_wrong_token() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), Some("secret")).await;

        let body = json!({ "query": "anything" });
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/search", None, body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/search", Some("wrong"), body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response =
            fx.router.clone().oneshot(post_json("/mcp/search", Some("secret"), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_no_configured_token_means_open_api() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/search", None, json!({ "query": "q" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["results"][0]["title"], "doc.txt");
    }

    #[tokio::test]
    async fn test_duplicate_topic_is_unprocessable() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let body = json!({ "title": "Batteries" });

        let response =
            fx.router.clone().oneshot(post_json("/mcp/topic", None, body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert!(created["topic_id"].as_i64().unwrap() > 0);
        assert_eq!(created["subtopics"], json!([]));

        let response =
            fx.router.clone().oneshot(post_json("/mcp/topic", None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_subtopic_under_missing_topic_is_404() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/subtopic/create", None, json!({
                "topic_id": 999, "title": "Anodes"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_note_then_list_notes() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;

        let topic = body_json(
            fx.router
                .clone()
                .oneshot(post_json("/mcp/topic", None, json!({ "title": "T" })))
                .await
                .unwrap(),
        )
        .await;
        let subtopic = body_json(
            fx.router
                .clone()
                .oneshot(post_json("/mcp/subtopic/create", None, json!({
                    "topic_id": topic["topic_id"], "title": "S"
                })))
                .await
                .unwrap(),
        )
        .await;

        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/save_note", None, json!({
                "subtopic_id": subtopic["id"],
                "content": "note body",
                "source_url": "https://example.com/a"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved = body_json(response).await;
        assert!(saved["note_id"].as_i64().unwrap() > 0);

        let uri = format!("/mcp/notes?subtopic_id={}", subtopic["id"]);
        let response = fx.router.clone().oneshot(get_req(&uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["notes"].as_array().unwrap().len(), 1);
        assert_eq!(listed["notes"][0]["source_url"], "https://example.com/a");
        // listing carries summaries only, never note bodies
        assert!(listed["notes"][0].get("content").is_none());
    }

    #[tokio::test]
    async fn test_extract_inline_text() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/extract", None, json!({ "text": "Inline body." })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["content"], "Inline body.");
        assert_eq!(body["summary"], "Inline body.");
    }

    #[tokio::test]
    async fn test_extract_without_source_is_400() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response =
            fx.router.clone().oneshot(post_json("/mcp/extract", None, json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_plan_failure_maps_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(wm_method("POST"))
            .and(wm_path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/plan", None, json!({ "text": "topic" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_need_search_normalizes_verdict() {
        let server = MockServer::start().await;
        Mock::given(wm_method("POST"))
            .and(wm_path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "Yes, definitely.", "role": "assistant" } }]
            })))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/mcp/need_search", None, json!({ "text": "sub" })))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["need_search"], "yes");
    }

    #[tokio::test]
    async fn test_tools_list_names_the_registry() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response =
            fx.router.clone().oneshot(post_json("/mcp/tools/list", None, json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tools"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_research_sync_runs_pipeline() {
        let server = MockServer::start().await;
        mount_pipeline_llm(&server).await;

        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/research/langgraph", None, json!({
                "topic": "Batteries", "max_results": 2
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["subtopics"], json!(["Alpha"]));
        assert_eq!(body["report"]["type"], "prose");
        assert_eq!(body["report"]["text"], "Final report.");
    }

    #[tokio::test]
    async fn test_agent_run_schedules_and_completes() {
        let server = MockServer::start().await;
        mount_pipeline_llm(&server).await;

        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/agent/run", None, json!({ "topic": "Batteries" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let scheduled = body_json(response).await;
        assert_eq!(scheduled["status"], "scheduled");
        let run_id = scheduled["run_id"].as_str().unwrap().to_owned();

        let uri = format!("/agent/run/{run_id}");
        let mut last = json!(null);
        for _ in 0..50 {
            let response = fx.router.clone().oneshot(get_req(&uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            last = body_json(response).await;
            if last["status"] == "completed" || last["status"] == "failed" {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        assert_eq!(last["status"], "completed");
        assert_eq!(last["result"]["report"]["type"], "prose");
        assert!(last["finished_at"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_run_is_404() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response =
            fx.router.clone().oneshot(get_req("/agent/run/no-such-run", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_topic_is_400() {
        let server = MockServer::start().await;
        let fx = fixture(&server.uri(), None).await;
        let response = fx
            .router
            .clone()
            .oneshot(post_json("/agent/run", None, json!({ "topic": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
