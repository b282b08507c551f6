//! The four prompt operations of the research pipeline.
//!
//! Each is a templated prompt sent through [`LlmClient::chat_completion`];
//! callers own the policy for what a failure means (abort, fail open, or
//! fall back to locally assembled output).

use scout_core::constants::SUMMARIZE_PROMPT_CHARS;
use scout_core::{CompiledNotes, truncate_chars};

use crate::ai_types::ChatRequest;
use crate::client::LlmClient;
use crate::error::LlmError;

impl LlmClient {
    /// Break a topic into 4-7 short subtopics, returned as the model's raw
    /// numbered-list text. Parse with [`crate::parse_subtopics`].
    ///
    /// # Errors
    /// Returns an error if the completion call fails.
    pub async fn plan(&self, topic: &str) -> Result<String, LlmError> {
        let prompt = format!(
            "You are a research planner. Break the topic into 4-7 subtopics.\n\
             Return ONLY a numbered list, each item short and crisp.\n\
             Topic: {topic}"
        );
        self.chat_completion(&ChatRequest::user_prompt(&self.model, prompt)).await
    }

    /// One-word yes/no verdict on whether a subtopic needs external search.
    ///
    /// Returns the raw response text; callers normalize it with
    /// `Decision::from_response_text` rather than trusting the model to
    /// answer in exactly one word.
    ///
    /// # Errors
    /// Returns an error if the completion call fails.
    pub async fn decide_need_search(&self, subtopic: &str) -> Result<String, LlmError> {
        let prompt = format!(
            "Decide if this subtopic requires external search.\n\n\
             Respond with ONLY one word: \"yes\" or \"no\".\n\
             Subtopic: {subtopic}"
        );
        self.chat_completion(&ChatRequest::user_prompt(&self.model, prompt)).await
    }

    /// Summarize document content for a subtopic in 4-6 bullet points.
    ///
    /// Only the first [`SUMMARIZE_PROMPT_CHARS`] characters of content are
    /// sent; the rest would blow the prompt budget without improving the
    /// bullets.
    ///
    /// # Errors
    /// Returns an error if the completion call fails.
    pub async fn summarize(&self, content: &str, subtopic: &str) -> Result<String, LlmError> {
        let window = truncate_chars(content, SUMMARIZE_PROMPT_CHARS);
        let prompt = format!(
            "You are analyzing a document for a research agent.\n\n\
             Subtopic: {subtopic}\n\n\
             Summarize the document in 4-6 tight bullet points.\n\
             Text:\n{window}"
        );
        self.chat_completion(&ChatRequest::user_prompt(&self.model, prompt)).await
    }

    /// Compile all per-subtopic notes into one structured report.
    ///
    /// # Errors
    /// Returns an error if the notes cannot be serialized or the completion
    /// call fails.
    pub async fn synthesize(
        &self,
        topic: &str,
        notes: &CompiledNotes,
    ) -> Result<String, LlmError> {
        let notes_text = serde_json::to_string_pretty(notes).map_err(|e| LlmError::JsonParse {
            context: "compiled notes for synthesis prompt".to_owned(),
            source: e,
        })?;
        let prompt = format!(
            "You are a research synthesizer.\n\n\
             Topic: {topic}\n\n\
             Here are the notes collected for each subtopic:\n{notes_text}\n\n\
             Write a clean, structured research summary with:\n\
             - Executive summary\n\
             - Subtopic sections\n\
             - Final insights\n\n\
             Do NOT hallucinate info; only use the notes."
        );
        self.chat_completion(&ChatRequest::user_prompt(&self.model, prompt)).await
    }
}
