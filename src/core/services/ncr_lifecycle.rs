//! Non-conformity lifecycle
//!
//! OPEN -> IN_PROGRESS -> RESOLVED -> CLOSED, with reopen edges back to OPEN.
//! Closing is guarded: every child corrective action must be VERIFIED.

use chrono::{DateTime, Utc};

use crate::core::error::WorkflowError;
use crate::core::models::{ActionStatus, CorrectiveAction, NcrStatus, NonConformity, advance};

/// Validate a lifecycle transition
///
/// `actions` are the statuses of the NCR's corrective actions; they only
/// matter when `requested` is CLOSED.
pub fn transition(
    current: NcrStatus,
    requested: NcrStatus,
    actions: &[ActionStatus],
) -> Result<NcrStatus, WorkflowError> {
    let next = advance(current, requested)?;

    if next == NcrStatus::Closed {
        let open = actions.iter().filter(|s| **s != ActionStatus::Verified).count();
        if open > 0 {
            return Err(WorkflowError::OpenActionsRemain { open });
        }
    }

    Ok(next)
}

/// Apply a lifecycle transition to a non-conformity
///
/// Returns the previous status.
pub fn apply_transition(
    ncr: &mut NonConformity,
    requested: NcrStatus,
    actions: &[CorrectiveAction],
    now: DateTime<Utc>,
) -> Result<NcrStatus, WorkflowError> {
    let statuses: Vec<ActionStatus> = actions
        .iter()
        .filter(|a| a.non_conformity_id == ncr.id)
        .map(|a| a.status)
        .collect();

    let previous = ncr.status;
    let next = transition(previous, requested, &statuses)?;

    ncr.status = next;
    ncr.closed_at = (next == NcrStatus::Closed).then_some(now);
    ncr.updated_at = now;
    Ok(previous)
}
