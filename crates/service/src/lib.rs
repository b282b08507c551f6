//! Service layer for scout
//!
//! Centralizes business logic between the HTTP/MCP surfaces and the
//! storage/LLM/search adapters: note persistence with de-duplication,
//! cache-first search, the background-run registry, the append-only audit
//! log, and the orchestrator that drives a whole research run.

mod error;
mod event_service;
mod notes_service;
mod orchestrator;
mod run_service;
mod search_service;

pub use error::ServiceError;
pub use event_service::EventService;
pub use notes_service::NotesService;
pub use orchestrator::Orchestrator;
pub use run_service::RunService;
pub use search_service::{SearchBackend, SearchService};
