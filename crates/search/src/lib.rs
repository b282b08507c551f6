//! Search adapter and extraction for scout
//!
//! Two ways to produce canonical search hits: the live SerpAPI client and a
//! deterministic local fallback (seed documents, then synthesized
//! placeholders). Plus the extractor that turns raw text, local files, or
//! http(s) URLs into bounded note content. Cache-first wrapping lives in
//! `scout-service`; this crate only talks to the outside world.

mod error;
mod extract;
mod local;
mod serpapi;

pub use error::{ExtractError, SearchError};
pub use extract::{ExtractInput, Extracted, Extractor};
pub use local::local_search;
pub use serpapi::SerpApiClient;
