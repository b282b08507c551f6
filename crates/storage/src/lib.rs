//! Storage layer for scout
//!
//! SQLite-backed persistence for the five research entities (topics,
//! subtopics, notes, search cache, events) plus the background-run
//! registry. Uniqueness constraints carry the de-duplication invariants;
//! everything above this crate treats them as behavior, not SQL.

mod error;
mod migrations;
mod sqlite;

pub mod traits;

pub use error::StorageError;
pub use sqlite::SqliteStorage;
pub use traits::{
    EventStore, NoteStore, RunStore, SearchCacheStore, Storage, SubtopicStore, TopicStore,
};
