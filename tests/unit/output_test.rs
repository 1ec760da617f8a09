//! Tests for the Output module
//!
//! Every result renders either as human-readable text or as JSON that
//! matches the API's wire format.

use isoaudit::api::{self, DeletedData, PageRequest};
use isoaudit::core::models::{ActionStatus, NcrStatus};
use isoaudit::core::services::summarize_ncr;
use isoaudit::output::{OperationResult, OutputMode, Render, percent};
use uuid::Uuid;

use crate::common::fixtures::{ActionBuilder, NcrBuilder, fixed_now};

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn percent_formatting() {
    assert_eq!(percent(Some(66.666)), "66.7%");
    assert_eq!(percent(None), "n/a");
}

// =============================================================================
// JSON Mode
// =============================================================================

#[test]
fn json_mode_uses_wire_names() {
    let ncr = NcrBuilder::new().status(NcrStatus::InProgress).build();
    let json: serde_json::Value =
        serde_json::from_str(&ncr.format(OutputMode::Json)).unwrap();
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["severity"], "MAJOR");
    assert!(json.get("createdAt").is_some());
}

#[test]
fn operation_result_json() {
    let json: serde_json::Value =
        serde_json::from_str(&OperationResult::ok("done").format(OutputMode::Json)).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "done");
}

// =============================================================================
// Human Mode
// =============================================================================

#[test]
fn ncr_summary_human() {
    let ncr = NcrBuilder::new().status(NcrStatus::Resolved).build();
    let actions = vec![
        ActionBuilder::new(ncr.id).status(ActionStatus::Verified).build(),
        ActionBuilder::new(ncr.id).build(),
    ];
    let text = summarize_ncr(&ncr, &actions, fixed_now()).format(OutputMode::Human);
    assert!(text.contains("2 total, 1 pending"));
    assert!(text.contains("1 verified"));
    assert!(text.contains("Can close:"));
}

#[test]
fn action_human_shows_verification() {
    let mut action = ActionBuilder::new(Uuid::new_v4()).status(ActionStatus::Verified).build();
    action.verified_by_id = Some("qa-lead".to_string());
    action.verified_date = Some(fixed_now());
    action.effectiveness_notes = Some("No recurrence".to_string());

    let text = action.format(OutputMode::Human);
    assert!(text.contains("Recalibrate gauge"));
    assert!(text.contains("2026-06-15 12:00 by qa-lead"));
    assert!(text.contains("Effectiveness:  No recurrence"));
}

#[test]
fn empty_pages_say_so() {
    let ctx = api::ApiContext::in_memory();
    let page = api::list_ncrs(&ctx, api::NcrFilter::default(), PageRequest::default()).unwrap();
    assert_eq!(page.format(OutputMode::Human), "No non-conformities found.");
}

#[test]
fn workflow_human_marks_gated_and_terminal() {
    let text = api::workflow().format(OutputMode::Human);
    assert!(text.contains("VERIFIED (verify)"));
    assert!(text.contains("terminal"));
}

#[test]
fn delete_human_mentions_cascade() {
    let id = Uuid::new_v4();
    let cascaded = DeletedData {
        id,
        cascaded_actions: Some(3),
    };
    assert!(cascaded.format(OutputMode::Human).contains("3 corrective action(s)"));

    let plain = DeletedData {
        id,
        cascaded_actions: None,
    };
    assert_eq!(plain.format(OutputMode::Human), format!("Deleted {id}"));
}
