//! Language-model adapter for scout
//!
//! Wraps an OpenAI-compatible chat-completions endpoint behind four
//! operations (plan, decide-need-search, summarize, synthesize) and the
//! planner-output parser. Transient provider failures are retried with
//! bounded backoff; everything else propagates to the caller, whose policy
//! (abort, fail open, fall back) varies by call site.

mod ai_types;
mod client;
mod error;
mod ops;
mod planning;


pub use client::LlmClient;
pub use error::LlmError;
pub use planning::parse_subtopics;
