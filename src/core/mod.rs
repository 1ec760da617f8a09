//! Core domain logic for isoaudit
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`CorrectiveAction`, `NonConformity`, `Assessment`)
//! - `services/` - Status engines and compliance aggregation
//! - `ports/` - Trait definitions for persistence and caching
//! - `error` - Business rule violations

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
