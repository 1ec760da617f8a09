//! HTTP server adapters
//!
//! This module provides the router that translates between raw HTTP requests
//! and the HTTP-agnostic API layer, and the adapters built on it.
//!
//! Currently supported:
//! - `tiny_http` - Lightweight HTTP server for CLI use (feature `server`)

pub mod router;
#[cfg(feature = "server")]
pub mod tiny_http;

pub use router::{ApiReply, route};
