//! Dashboard roll-ups
//!
//! Status counts and summaries computed from entity lists.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::compliance::overall_compliance;
use crate::core::models::{
    ActionStatus, Assessment, AssessmentStatus, CorrectiveAction, Lifecycle, NcrStatus,
    NonConformity, Severity,
};

/// Corrective actions by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCounts {
    /// PENDING
    pub pending: usize,
    /// `IN_PROGRESS`
    pub in_progress: usize,
    /// COMPLETED
    pub completed: usize,
    /// VERIFIED
    pub verified: usize,
}

impl ActionCounts {
    /// Count a sequence of statuses
    #[must_use]
    pub fn tally(statuses: impl IntoIterator<Item = ActionStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut counts, status| {
            match status {
                ActionStatus::Pending => counts.pending += 1,
                ActionStatus::InProgress => counts.in_progress += 1,
                ActionStatus::Completed => counts.completed += 1,
                ActionStatus::Verified => counts.verified += 1,
            }
            counts
        })
    }

    /// All actions
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed + self.verified
    }

    /// Actions not yet verified
    #[must_use]
    pub const fn open(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

/// Non-conformities by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcrCounts {
    /// OPEN
    pub open: usize,
    /// `IN_PROGRESS`
    pub in_progress: usize,
    /// RESOLVED
    pub resolved: usize,
    /// CLOSED
    pub closed: usize,
}

/// Non-conformities by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    /// MINOR
    pub minor: usize,
    /// MAJOR
    pub major: usize,
    /// CRITICAL
    pub critical: usize,
}

/// Assessments by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCounts {
    /// DRAFT
    pub draft: usize,
    /// `IN_PROGRESS`
    pub in_progress: usize,
    /// COMPLETED
    pub completed: usize,
    /// ARCHIVED
    pub archived: usize,
}

/// Per-NCR roll-up of its corrective actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcrSummary {
    /// The NCR
    pub ncr_id: Uuid,
    /// Its status
    pub status: NcrStatus,
    /// Its actions by status
    pub actions: ActionCounts,
    /// Actions past their target date with no work delivered
    pub overdue_actions: usize,
    /// Whether a close request would pass right now
    pub can_close: bool,
    /// Earliest target date of unfinished work not yet overdue
    #[serde(skip)]
    pub next_due: Option<DateTime<Utc>>,
}

/// Summarize one NCR
///
/// `actions` may contain other NCRs' actions; only this NCR's are counted.
#[must_use]
pub fn summarize_ncr(
    ncr: &NonConformity,
    actions: &[CorrectiveAction],
    now: DateTime<Utc>,
) -> NcrSummary {
    let own: Vec<&CorrectiveAction> =
        actions.iter().filter(|a| a.non_conformity_id == ncr.id).collect();
    let counts = ActionCounts::tally(own.iter().map(|a| a.status));

    NcrSummary {
        ncr_id: ncr.id,
        status: ncr.status,
        actions: counts,
        overdue_actions: own.iter().filter(|a| a.is_overdue(now)).count(),
        can_close: ncr.status.can_transition_to(NcrStatus::Closed) && counts.open() == 0,
        next_due: own
            .iter()
            .filter(|a| matches!(a.status, ActionStatus::Pending | ActionStatus::InProgress))
            .filter_map(|a| a.target_date)
            .filter(|due| *due >= now)
            .min(),
    }
}

/// Organization-wide dashboard figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Assessments by status
    pub assessments: AssessmentCounts,
    /// Mean overall compliance of every assessment that was completed,
    /// archived ones included
    pub average_compliance: Option<f64>,
    /// NCRs by status
    pub ncrs: NcrCounts,
    /// NCRs by severity
    pub ncr_severity: SeverityCounts,
    /// Actions by status
    pub actions: ActionCounts,
    /// Actions past due
    pub overdue_actions: usize,
    /// CRITICAL NCRs that are not closed
    pub open_critical_ncrs: usize,
}

/// Build the dashboard summary
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dashboard(
    assessments: &[Assessment],
    ncrs: &[NonConformity],
    actions: &[CorrectiveAction],
    now: DateTime<Utc>,
) -> DashboardSummary {
    let mut assessment_counts = AssessmentCounts::default();
    let mut completed_scores = Vec::new();
    for assessment in assessments {
        match assessment.status {
            AssessmentStatus::Draft => assessment_counts.draft += 1,
            AssessmentStatus::InProgress => assessment_counts.in_progress += 1,
            AssessmentStatus::Completed => assessment_counts.completed += 1,
            AssessmentStatus::Archived => assessment_counts.archived += 1,
        }
        if assessment.completed_at.is_some()
            && let Some(score) = overall_compliance(&assessment.responses)
        {
            completed_scores.push(score);
        }
    }

    let mut ncr_counts = NcrCounts::default();
    let mut severity = SeverityCounts::default();
    for ncr in ncrs {
        match ncr.status {
            NcrStatus::Open => ncr_counts.open += 1,
            NcrStatus::InProgress => ncr_counts.in_progress += 1,
            NcrStatus::Resolved => ncr_counts.resolved += 1,
            NcrStatus::Closed => ncr_counts.closed += 1,
        }
        match ncr.severity {
            Severity::Minor => severity.minor += 1,
            Severity::Major => severity.major += 1,
            Severity::Critical => severity.critical += 1,
        }
    }

    let average_compliance = (!completed_scores.is_empty())
        .then(|| completed_scores.iter().sum::<f64>() / completed_scores.len() as f64);

    DashboardSummary {
        assessments: assessment_counts,
        average_compliance,
        ncrs: ncr_counts,
        ncr_severity: severity,
        actions: ActionCounts::tally(actions.iter().map(|a| a.status)),
        overdue_actions: actions.iter().filter(|a| a.is_overdue(now)).count(),
        open_critical_ncrs: ncrs
            .iter()
            .filter(|n| n.severity == Severity::Critical && n.status != NcrStatus::Closed)
            .count(),
    }
}
