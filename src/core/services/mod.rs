//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`action_workflow`] - Corrective-action status engine
//! - [`ncr_lifecycle`] - Non-conformity lifecycle with the close guard
//! - [`compliance`] - Compliance reducer, section breakdown, monthly trend
//! - [`summary`] - NCR and dashboard roll-ups

pub mod action_workflow;
pub mod compliance;
pub mod ncr_lifecycle;
pub mod summary;

pub use compliance::{
    AssessmentCompliance, ComplianceTally, SectionCompliance, TrendPoint, TrendWindow, YearMonth,
    assess, monthly_trend, overall_compliance,
};
pub use summary::{
    ActionCounts, AssessmentCounts, DashboardSummary, NcrCounts, NcrSummary, SeverityCounts,
    dashboard, summarize_ncr,
};
