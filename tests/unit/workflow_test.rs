//! Tests for the corrective-action and non-conformity status engines

use chrono::Duration;
use isoaudit::core::error::WorkflowError;
use isoaudit::core::models::{ActionStatus, Lifecycle, NcrStatus};
use isoaudit::core::services::{action_workflow, ncr_lifecycle, summarize_ncr};

use crate::common::fixtures::{ActionBuilder, NcrBuilder, fixed_now};

// =============================================================================
// CORRECTIVE ACTION WORKFLOW
// =============================================================================

#[test]
fn action_moves_through_plain_edges() {
    let ncr = NcrBuilder::new().build();
    let mut action = ActionBuilder::new(ncr.id).build();
    let now = fixed_now();

    assert_eq!(
        action_workflow::apply_transition(&mut action, ActionStatus::InProgress, now),
        Ok(ActionStatus::Pending)
    );
    action_workflow::apply_transition(&mut action, ActionStatus::Completed, now).unwrap();
    assert_eq!(action.status, ActionStatus::Completed);
    assert_eq!(action.completed_date, Some(now));

    // Reopening clears the completion date
    action_workflow::apply_transition(&mut action, ActionStatus::InProgress, now).unwrap();
    assert_eq!(action.completed_date, None);
}

#[test]
fn action_rejects_skipped_edges() {
    let ncr = NcrBuilder::new().build();
    let mut action = ActionBuilder::new(ncr.id).build();

    let err = action_workflow::apply_transition(&mut action, ActionStatus::Completed, fixed_now())
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    assert_eq!(action.status, ActionStatus::Pending);

    let err = action_workflow::apply_transition(&mut action, ActionStatus::Verified, fixed_now())
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_TRANSITION");
}

#[test]
fn plain_transition_cannot_verify() {
    let ncr = NcrBuilder::new().build();
    let mut action = ActionBuilder::new(ncr.id).status(ActionStatus::Completed).build();

    let err = action_workflow::apply_transition(&mut action, ActionStatus::Verified, fixed_now())
        .unwrap_err();
    assert_eq!(err, WorkflowError::VerificationRequired);
    assert_eq!(action.status, ActionStatus::Completed);
}

#[test]
fn verify_records_who_when_and_notes() {
    let ncr = NcrBuilder::new().build();
    let mut action = ActionBuilder::new(ncr.id).status(ActionStatus::Completed).build();
    let now = fixed_now();

    action_workflow::verify(&mut action, "  Effective  ", "qa-lead", now).unwrap();
    assert_eq!(action.status, ActionStatus::Verified);
    assert_eq!(action.verified_by_id.as_deref(), Some("qa-lead"));
    assert_eq!(action.verified_date, Some(now));
    assert_eq!(action.effectiveness_notes.as_deref(), Some("Effective"));
}

#[test]
fn verify_requires_completed_and_input() {
    let ncr = NcrBuilder::new().build();

    let mut pending = ActionBuilder::new(ncr.id).build();
    let err = action_workflow::verify(&mut pending, "ok", "qa", fixed_now()).unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

    let mut completed = ActionBuilder::new(ncr.id).status(ActionStatus::Completed).build();
    let err = action_workflow::verify(&mut completed, " ", "qa", fixed_now()).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    let err = action_workflow::verify(&mut completed, "ok", "", fixed_now()).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(completed.status, ActionStatus::Completed);
}

#[test]
fn verified_action_is_terminal() {
    let ncr = NcrBuilder::new().build();
    let mut action = ActionBuilder::new(ncr.id).status(ActionStatus::Verified).build();

    for requested in ActionStatus::STATES {
        let err =
            action_workflow::apply_transition(&mut action, *requested, fixed_now()).unwrap_err();
        assert!(matches!(err, WorkflowError::TerminalState { .. }));
    }
    assert!(matches!(
        action_workflow::verify(&mut action, "again", "qa", fixed_now()),
        Err(WorkflowError::TerminalState { .. })
    ));
    assert!(matches!(
        action_workflow::assign(&mut action, "someone", fixed_now()),
        Err(WorkflowError::TerminalState { .. })
    ));
}

// =============================================================================
// NON-CONFORMITY LIFECYCLE
// =============================================================================

#[test]
fn ncr_closes_with_zero_actions() {
    let mut ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let now = fixed_now();

    ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Closed, &[], now).unwrap();
    assert_eq!(ncr.status, NcrStatus::Closed);
    assert_eq!(ncr.closed_at, Some(now));
}

#[test]
fn close_guard_counts_unverified_actions() {
    let mut ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let actions = vec![
        ActionBuilder::new(ncr.id).status(ActionStatus::Verified).build(),
        ActionBuilder::new(ncr.id).status(ActionStatus::Completed).build(),
        ActionBuilder::new(ncr.id).build(),
    ];

    let err = ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Closed, &actions, fixed_now())
        .unwrap_err();
    assert_eq!(err, WorkflowError::OpenActionsRemain { open: 2 });
    assert_eq!(ncr.status, NcrStatus::Resolved);
    assert_eq!(ncr.closed_at, None);
}

#[test]
fn close_guard_ignores_other_ncrs_actions() {
    let mut ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let other = NcrBuilder::new().build();
    let actions = vec![
        ActionBuilder::new(ncr.id).status(ActionStatus::Verified).build(),
        ActionBuilder::new(other.id).build(),
    ];

    ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Closed, &actions, fixed_now()).unwrap();
    assert_eq!(ncr.status, NcrStatus::Closed);
}

#[test]
fn edge_check_runs_before_close_guard() {
    let mut ncr = NcrBuilder::new().build();
    let actions = vec![ActionBuilder::new(ncr.id).build()];

    let err = ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Closed, &actions, fixed_now())
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[test]
fn closed_ncr_is_terminal() {
    let mut ncr = NcrBuilder::new().status(NcrStatus::Closed).build();
    let err = ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Open, &[], fixed_now())
        .unwrap_err();
    assert!(matches!(err, WorkflowError::TerminalState { .. }));
}

#[test]
fn reopening_resolved_ncr() {
    let mut ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let previous =
        ncr_lifecycle::apply_transition(&mut ncr, NcrStatus::Open, &[], fixed_now()).unwrap();
    assert_eq!(previous, NcrStatus::Resolved);
    assert_eq!(ncr.status, NcrStatus::Open);
}

// =============================================================================
// SUMMARY
// =============================================================================

#[test]
fn summary_counts_overdue_and_closability() {
    let now = fixed_now();
    let ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let actions = vec![
        ActionBuilder::new(ncr.id).due(now - Duration::days(3)).build(),
        ActionBuilder::new(ncr.id)
            .status(ActionStatus::Completed)
            .due(now - Duration::days(3))
            .build(),
        ActionBuilder::new(ncr.id).status(ActionStatus::Verified).build(),
    ];

    let summary = summarize_ncr(&ncr, &actions, now);
    assert_eq!(summary.actions.total(), 3);
    assert_eq!(summary.actions.open(), 2);
    assert_eq!(summary.overdue_actions, 1);
    assert!(!summary.can_close);

    let verified: Vec<_> = actions
        .into_iter()
        .map(|mut a| {
            a.status = ActionStatus::Verified;
            a
        })
        .collect();
    assert!(summarize_ncr(&ncr, &verified, now).can_close);
}

#[test]
fn open_ncr_cannot_close_even_without_actions() {
    let ncr = NcrBuilder::new().build();
    assert!(!summarize_ncr(&ncr, &[], fixed_now()).can_close);
}
