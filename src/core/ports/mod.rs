//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (relational store, caches).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: In-memory implementations for unit tests
//! - **Flexibility**: Swap the store without changing business logic
//! - **Clarity**: Clear boundaries between layers

mod repository;
mod summary_cache;

pub use repository::{ActionRepository, AssessmentRepository, AuditStore, NcrRepository};
pub use summary_cache::{NoCache, SummaryCache, is_fresh};
