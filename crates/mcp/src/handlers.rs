use std::fmt::Display;
use std::sync::Arc;

use scout_core::NewNote;
use scout_core::constants::SUMMARIZE_FALLBACK_CHARS;
use scout_core::truncate_chars;
use scout_llm::LlmClient;
use scout_search::{ExtractInput, Extractor};
use scout_service::{NotesService, SearchService};
use serde::Serialize;
use serde_json::json;

use crate::tools::ResearchTool;
use crate::{McpError, McpResponse};

/// Everything a tool call can touch.
pub struct ToolContext {
    pub search: Arc<SearchService>,
    pub extractor: Arc<Extractor>,
    pub llm: Arc<LlmClient>,
    pub notes: Arc<NotesService>,
    /// Hit cap applied when `search_web` omits `max_results`.
    pub default_max_results: u32,
}

pub(crate) fn tool_ok<T: Serialize>(result: &T) -> serde_json::Value {
    match serde_json::to_value(result) {
        Ok(value) => json!({ "success": true, "result": value }),
        Err(e) => json!({ "success": false, "error": format!("serialization error: {e}") }),
    }
}

pub(crate) fn tool_err(msg: impl Display) -> serde_json::Value {
    json!({ "success": false, "error": msg.to_string() })
}

/// Dispatch one `tools/call` request.
///
/// Tool failures stay inside the JSON-RPC `result` as `success: false`
/// payloads; only an unknown tool name is a protocol-level error.
pub async fn handle_tool_call(
    ctx: &ToolContext,
    params: &serde_json::Value,
    id: serde_json::Value,
) -> McpResponse {
    let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    let Some(tool) = ResearchTool::parse(tool_name) else {
        return McpResponse {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(McpError {
                code: -32602,
                message: format!(
                    "Unknown tool: '{tool_name}'. Available: {}",
                    ResearchTool::KNOWN
                ),
            }),
        };
    };

    let result = match tool {
        ResearchTool::SearchWeb => search_web(ctx, &args).await,
        ResearchTool::ExtractPage => extract_page(ctx, &args).await,
        ResearchTool::SummarizeContent => summarize_content(ctx, &args).await,
        ResearchTool::SaveNote => save_note(ctx, &args).await,
    };

    McpResponse { jsonrpc: "2.0".to_owned(), id, result: Some(result), error: None }
}

async fn search_web(ctx: &ToolContext, args: &serde_json::Value) -> serde_json::Value {
    let Some(query) = args.get("query").and_then(|q| q.as_str()) else {
        return tool_err("query is required");
    };
    let max_results = match args.get("max_results") {
        None => ctx.default_max_results,
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => return tool_err("max_results must be an unsigned 32-bit integer"),
        },
    };
    match ctx.search.search(query, max_results).await {
        Ok(hits) => tool_ok(&json!({ "results": hits })),
        Err(e) => tool_err(e),
    }
}

async fn extract_page(ctx: &ToolContext, args: &serde_json::Value) -> serde_json::Value {
    let input = ExtractInput {
        url: args.get("url").and_then(|u| u.as_str()).map(str::to_owned),
        text: args.get("text").and_then(|t| t.as_str()).map(str::to_owned),
    };
    match ctx.extractor.extract(&input).await {
        Ok(extracted) => tool_ok(&extracted),
        Err(e) => tool_err(e),
    }
}

async fn summarize_content(ctx: &ToolContext, args: &serde_json::Value) -> serde_json::Value {
    let Some(content) = args.get("content").and_then(|c| c.as_str()) else {
        return tool_err("content is required");
    };
    let subtopic = args.get("subtopic").and_then(|s| s.as_str()).unwrap_or("");
    match ctx.llm.summarize(content, subtopic).await {
        Ok(summary) => tool_ok(&json!({ "summary": summary })),
        Err(e) => {
            // tool still succeeds; the excerpt stands in for the model
            tracing::warn!(error = %e, "summarize fell back to a truncated excerpt");
            tool_ok(&json!({
                "summary": truncate_chars(content, SUMMARIZE_FALLBACK_CHARS),
                "degraded": true,
            }))
        },
    }
}

async fn save_note(ctx: &ToolContext, args: &serde_json::Value) -> serde_json::Value {
    let Some(subtopic_id) = args.get("subtopic_id").and_then(serde_json::Value::as_i64) else {
        return tool_err("subtopic_id is required");
    };
    let Some(content) = args.get("content").and_then(|c| c.as_str()) else {
        return tool_err("content is required");
    };
    let new_note = NewNote {
        subtopic_id,
        source_title: args.get("source_title").and_then(|t| t.as_str()).map(str::to_owned),
        source_url: args.get("source_url").and_then(|u| u.as_str()).map(str::to_owned),
        content: content.to_owned(),
        extracted_summary: args
            .get("extracted_summary")
            .and_then(|s| s.as_str())
            .map(str::to_owned),
    };
    match ctx.notes.save_note(&new_note).await {
        Ok((note, created)) => tool_ok(&json!({ "note": note, "created": created })),
        Err(e) => tool_err(e),
    }
}
