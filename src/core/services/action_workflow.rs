//! Corrective-action status engine
//!
//! Plain transitions follow the [`ActionStatus`] table. The COMPLETED ->
//! VERIFIED edge is gated: it is only taken by [`verify`], which also records
//! who verified the action and how effective the fix was.

use chrono::{DateTime, Utc};

use crate::core::error::WorkflowError;
use crate::core::models::{ActionStatus, CorrectiveAction, Lifecycle, advance};

/// Validate a plain status change
///
/// Returns the new status when `requested` is an ungated edge out of
/// `current`.
pub fn transition(current: ActionStatus, requested: ActionStatus) -> Result<ActionStatus, WorkflowError> {
    if current.is_terminal() {
        return Err(WorkflowError::TerminalState {
            entity: ActionStatus::ENTITY,
            state: current.to_string(),
        });
    }

    if current.is_gated(requested) {
        return Err(WorkflowError::VerificationRequired);
    }

    advance(current, requested)
}

/// Apply a plain status change to an action
///
/// Stamps `completed_date` on entering COMPLETED and clears it when work is
/// reopened. Returns the previous status.
pub fn apply_transition(
    action: &mut CorrectiveAction,
    requested: ActionStatus,
    now: DateTime<Utc>,
) -> Result<ActionStatus, WorkflowError> {
    let previous = action.status;
    let next = transition(previous, requested)?;

    match next {
        ActionStatus::Completed => action.completed_date = Some(now),
        ActionStatus::Pending | ActionStatus::InProgress => action.completed_date = None,
        ActionStatus::Verified => {},
    }

    action.status = next;
    action.updated_at = now;
    Ok(previous)
}

/// Verify a completed action
///
/// Only callable from COMPLETED. Records the verifier, the verification date
/// and the effectiveness notes, and moves the action to VERIFIED.
pub fn verify(
    action: &mut CorrectiveAction,
    effectiveness_notes: &str,
    verified_by_id: &str,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    if action.status.is_terminal() {
        return Err(WorkflowError::TerminalState {
            entity: ActionStatus::ENTITY,
            state: action.status.to_string(),
        });
    }

    if action.status != ActionStatus::Completed {
        return Err(WorkflowError::InvalidTransition {
            entity: ActionStatus::ENTITY,
            from: action.status.to_string(),
            to: ActionStatus::Verified.to_string(),
        });
    }

    if effectiveness_notes.trim().is_empty() {
        return Err(WorkflowError::validation("Effectiveness notes are required to verify an action"));
    }
    if verified_by_id.trim().is_empty() {
        return Err(WorkflowError::validation("Verifier is required to verify an action"));
    }

    action.status = ActionStatus::Verified;
    action.effectiveness_notes = Some(effectiveness_notes.trim().to_string());
    action.verified_by_id = Some(verified_by_id.to_string());
    action.verified_date = Some(now);
    action.updated_at = now;
    Ok(())
}

/// Assign an action to a user
pub fn assign(
    action: &mut CorrectiveAction,
    assignee_id: &str,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    if action.status.is_terminal() {
        return Err(WorkflowError::TerminalState {
            entity: ActionStatus::ENTITY,
            state: action.status.to_string(),
        });
    }

    if assignee_id.trim().is_empty() {
        return Err(WorkflowError::validation("Assignee cannot be empty"));
    }

    action.assigned_to_id = Some(assignee_id.to_string());
    action.updated_at = now;
    Ok(())
}
