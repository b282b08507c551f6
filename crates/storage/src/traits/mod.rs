//! Storage backend trait abstraction
//!
//! Async domain traits for the persistence gateway, one per entity family.
//! `SqliteStorage` implements all of them; services depend on the traits so
//! tests can drive them against an in-memory database.

pub mod event;
pub mod note;
pub mod run;
pub mod search_cache;
pub mod topic;

pub use event::EventStore;
pub use note::NoteStore;
pub use run::RunStore;
pub use search_cache::SearchCacheStore;
pub use topic::{SubtopicStore, TopicStore};

/// The full persistence gateway: every store trait in one bound, so
/// services hold a single `Arc<dyn Storage>` handle.
pub trait Storage:
    TopicStore + SubtopicStore + NoteStore + SearchCacheStore + EventStore + RunStore
{
}

impl<T> Storage for T where
    T: TopicStore + SubtopicStore + NoteStore + SearchCacheStore + EventStore + RunStore
{
}
