use serde_json::json;

/// All MCP tools exposed by this server.
/// Using an enum keeps tool dispatch exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchTool {
    SearchWeb,
    ExtractPage,
    SummarizeContent,
    SaveNote,
}

impl ResearchTool {
    /// Parse a tool name from a JSON-RPC request.
    /// Returns None for unknown tools (caller must handle the error).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "search_web" => Some(Self::SearchWeb),
            "extract_page" => Some(Self::ExtractPage),
            "summarize_content" => Some(Self::SummarizeContent),
            "save_note" => Some(Self::SaveNote),
            _ => None,
        }
    }

    pub const KNOWN: &'static str = "search_web, extract_page, summarize_content, save_note";
}

/// JSON schema for every tool, as returned by `tools/list`.
pub fn get_tools_json() -> serde_json::Value {
    json!({
        "tools": [
            {
                "name": "search_web",
                "description": "Search the web for a query. Results are cached per exact query string.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search query" },
                        "max_results": { "type": "integer", "description": "Maximum hits to return" }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "extract_page",
                "description": "Extract readable content from a URL or from inline text. Inline text wins when both are given.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "url": { "type": "string", "description": "Page URL (http, https, or file scheme)" },
                        "text": { "type": "string", "description": "Inline text to use instead of fetching" }
                    }
                }
            },
            {
                "name": "summarize_content",
                "description": "Summarize content with the model. Falls back to a truncated excerpt when the model is unavailable.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "content": { "type": "string", "description": "Text to summarize" },
                        "subtopic": { "type": "string", "description": "Subtopic the content belongs to" }
                    },
                    "required": ["content"]
                }
            },
            {
                "name": "save_note",
                "description": "Persist a research note under a subtopic. Identical (url, content) saves collapse onto one note.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "subtopic_id": { "type": "integer", "description": "Subtopic to attach the note to" },
                        "content": { "type": "string", "description": "Note body" },
                        "source_title": { "type": "string", "description": "Optional source title" },
                        "source_url": { "type": "string", "description": "Optional source URL" },
                        "extracted_summary": { "type": "string", "description": "Optional pre-computed summary" }
                    },
                    "required": ["subtopic_id", "content"]
                }
            }
        ]
    })
}
