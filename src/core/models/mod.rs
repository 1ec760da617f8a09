//! Domain models for isoaudit
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CorrectiveAction`] - Remediation task with its own status workflow
//! - [`NonConformity`] - A detected deviation from the standard
//! - [`Assessment`] - A scored self-audit
//! - [`Section`] / [`AssessmentTemplate`] - The standard catalog
//! - [`Lifecycle`] - Transition tables shared by every status enum

mod action;
mod assessment;
mod lifecycle;
mod ncr;
mod standard;

pub use action::{ActionStatus, CorrectiveAction, Priority};
pub use assessment::{Assessment, AssessmentStatus, Response, Score};
pub use lifecycle::{Lifecycle, Tone, advance};
pub use ncr::{NcrStatus, NonConformity, ResponseRef, Severity};
pub use standard::{AssessmentTemplate, AuditQuestion, Section, SectionSelector};
