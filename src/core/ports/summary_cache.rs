//! Summary cache port
//!
//! Cached per-NCR summaries. Any mutation of an NCR or one of its corrective
//! actions must invalidate that NCR's entry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::super::models::NcrStatus;
use super::super::services::NcrSummary;

/// Cache of per-NCR summaries
pub trait SummaryCache: Send + Sync {
    /// Cached summary for an NCR
    fn get(&self, ncr_id: Uuid) -> Option<NcrSummary>;

    /// Store a summary
    fn put(&self, summary: NcrSummary);

    /// Drop the entry for an NCR
    fn invalidate(&self, ncr_id: Uuid);
}

/// A cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl SummaryCache for NoCache {
    fn get(&self, _ncr_id: Uuid) -> Option<NcrSummary> {
        None
    }

    fn put(&self, _summary: NcrSummary) {}

    fn invalidate(&self, _ncr_id: Uuid) {}
}

/// Whether a cached summary still describes an NCR in `status` at `now`
///
/// The overdue count goes stale once `now` passes the next target date.
#[must_use]
pub fn is_fresh(summary: &NcrSummary, status: NcrStatus, now: DateTime<Utc>) -> bool {
    summary.status == status && summary.next_due.is_none_or(|due| now <= due)
}
