//! Core types for scout
//!
//! This crate contains domain types, runtime configuration, and shared
//! constants used across all other crates.

mod config;
mod pipeline;
mod research;
mod text;

pub mod constants;
pub mod env_config;

pub use config::*;
pub use pipeline::*;
pub use research::*;
pub use text::*;
