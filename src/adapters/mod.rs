//! Adapter implementations for port traits
//!
//! This module contains concrete implementations of the core ports:
//!
//! - `memory` - In-memory store and summary cache
//! - `file/` - JSON document store on disk

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::{MemoryStore, MemorySummaryCache};
