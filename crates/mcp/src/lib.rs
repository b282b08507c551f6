//! MCP (Model Context Protocol) stdio server for scout
//!
//! Speaks line-delimited JSON-RPC 2.0 over stdin/stdout and exposes the
//! research tools (`search_web`, `extract_page`, `summarize_content`,
//! `save_note`). Tool failures are reported inside the `result` payload as
//! `success: false`; JSON-RPC errors are reserved for protocol problems.

mod handlers;
mod tools;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub use handlers::ToolContext;
pub use tools::{ResearchTool, get_tools_json};

use handlers::handle_tool_call;

#[derive(Deserialize)]
struct McpRequest {
    #[expect(dead_code, reason = "Required by JSON-RPC protocol but not used")]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    #[serde(default)]
    params: serde_json::Value,
}

#[derive(Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

fn error_response(id: serde_json::Value, code: i32, message: String) -> McpResponse {
    McpResponse { jsonrpc: "2.0".to_owned(), id, result: None, error: Some(McpError { code, message }) }
}

fn result_response(id: serde_json::Value, result: serde_json::Value) -> McpResponse {
    McpResponse { jsonrpc: "2.0".to_owned(), id, result: Some(result), error: None }
}

/// Serve MCP over stdio until stdin closes.
pub async fn run_mcp_server(ctx: ToolContext) {
    tracing::info!("MCP server starting on stdio");
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin).lines();

    while let Ok(Some(line)) = reader.next_line().await {
        if line.is_empty() {
            continue;
        }

        let json_value: serde_json::Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let response =
                    error_response(json!(null), -32700, format!("Parse error: {e}"));
                if !write_response(&mut stdout, &response).await {
                    break;
                }
                continue;
            },
        };

        let request: McpRequest = match serde_json::from_value(json_value.clone()) {
            Ok(r) => r,
            Err(e) => {
                let id = json_value.get("id").cloned().unwrap_or(json!(null));
                let response = error_response(id, -32600, format!("Invalid Request: {e}"));
                if !write_response(&mut stdout, &response).await {
                    break;
                }
                continue;
            },
        };

        if let Some(response) = handle_request(&ctx, &request).await
            && !write_response(&mut stdout, &response).await
        {
            break;
        }
    }
}

/// One response line per request. Returns false when stdout is gone.
async fn write_response(stdout: &mut tokio::io::Stdout, response: &McpResponse) -> bool {
    let Ok(json) = serde_json::to_string(response) else {
        return true;
    };
    if let Err(e) = stdout.write_all(format!("{json}\n").as_bytes()).await {
        tracing::error!("MCP stdout write error: {}", e);
        return false;
    }
    if let Err(e) = stdout.flush().await {
        tracing::error!("MCP stdout flush error: {}", e);
        return false;
    }
    true
}

/// Notifications (requests without an id) get no response.
async fn handle_request(ctx: &ToolContext, req: &McpRequest) -> Option<McpResponse> {
    let id = req.id.clone()?;

    Some(match req.method.as_str() {
        "initialize" => result_response(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "scout", "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "tools/list" => result_response(id, get_tools_json()),
        "tools/call" => handle_tool_call(ctx, &req.params, id).await,
        _ => error_response(id, -32601, format!("Method not found: {}", req.method)),
    })
}
