//! Integration tests for the non-conformity lifecycle
//!
//! Tests the complete flow:
//! 1. An assessment is scored and an NCR raised from a weak response
//! 2. Corrective actions are worked and verified
//! 3. The NCR can only close once every action is verified

use predicates::prelude::*;
use tempfile::TempDir;

use super::{id_of, isoaudit, json};

const QUESTION_7_5: &str = "90010000-0000-4000-8000-9e5700000705";

#[test]
fn test_ncr_closes_after_verification() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let ncr = id_of(&json(dir, &["ncr", "create", "Calibration overdue", "-s", "major"]));
    let action = id_of(&json(
        dir,
        &["action", "create", &ncr, "Recalibrate all gauges", "-p", "high", "--due", "2030-01-31"],
    ));

    json(dir, &["ncr", "transition", &ncr, "in_progress"]);
    json(dir, &["ncr", "transition", &ncr, "resolved"]);

    // Closing with an unverified action is refused
    isoaudit(dir)
        .args(["ncr", "transition", &ncr, "closed"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("OPEN_ACTIONS_REMAIN"));

    json(dir, &["action", "status", &action, "in_progress"]);
    let completed = json(dir, &["action", "status", &action, "completed"]);
    assert_eq!(completed["status"], "COMPLETED");
    assert_eq!(completed["previousStatus"], "IN_PROGRESS");

    // A plain status change cannot verify
    isoaudit(dir)
        .args(["action", "status", &action, "verified"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERIFICATION_REQUIRED"));

    let verified = json(
        dir,
        &["action", "verify", &action, "-n", "Spot checks passed", "-b", "qa-lead"],
    );
    assert_eq!(verified["status"], "VERIFIED");
    assert_eq!(verified["verifiedById"], "qa-lead");

    let closed = json(dir, &["ncr", "transition", &ncr, "closed"]);
    assert_eq!(closed["status"], "CLOSED");
    assert!(closed["closedAt"].is_string());

    isoaudit(dir)
        .args(["ncr", "show", &ncr])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calibration overdue"))
        .stdout(predicate::str::contains("Recalibrate all gauges"));

    // Terminal: no further moves, no new actions
    isoaudit(dir)
        .args(["ncr", "transition", &ncr, "open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TERMINAL_STATE"));
    isoaudit(dir)
        .args(["action", "create", &ncr, "Late follow-up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TERMINAL_STATE"));
}

#[test]
fn test_assessment_scoring_and_dashboard() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let assessment = id_of(&json(dir, &["assessment", "create", "Annual audit", "-l", "lead-1"]));
    let scored = json(dir, &["assessment", "score", &assessment, QUESTION_7_5, "2", "-j", "Gaps"]);
    assert_eq!(scored["status"], "IN_PROGRESS");
    assert_eq!(scored["compliance"], 40.0);

    json(dir, &["assessment", "score", &assessment, "90010000-0000-4000-8000-9e5700000401", "na"]);

    isoaudit(dir)
        .args(["assessment", "score", &assessment, QUESTION_7_5, "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_SCORE"));

    // NCR raised from the weak response
    let ncr = json(
        dir,
        &["ncr", "create", "Uncontrolled documents", "--assessment", &assessment, "--question", QUESTION_7_5],
    );
    assert_eq!(ncr["source"]["questionId"], QUESTION_7_5);

    let compliance = json(dir, &["assessment", "compliance", &assessment]);
    assert_eq!(compliance["overall"], 40.0);
    assert_eq!(compliance["sections"].as_array().unwrap().len(), 7);

    let done = json(dir, &["assessment", "complete", &assessment]);
    assert_eq!(done["overallScore"], 40.0);

    let dashboard = json(dir, &["dashboard"]);
    assert_eq!(dashboard["assessments"]["completed"], 1);
    assert_eq!(dashboard["averageCompliance"], 40.0);
    assert_eq!(dashboard["ncrs"]["open"], 1);

    let trend = json(dir, &["trend", "--months", "3"]);
    assert_eq!(trend["points"].as_array().unwrap().len(), 3);
}

#[test]
fn test_delete_ncr_cascades() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let ncr = id_of(&json(dir, &["ncr", "create", "Short-lived"]));
    json(dir, &["action", "create", &ncr, "First"]);
    json(dir, &["action", "create", &ncr, "Second"]);

    let deleted = json(dir, &["ncr", "delete", &ncr]);
    assert_eq!(deleted["cascadedActions"], 2);

    isoaudit(dir)
        .args(["action", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No corrective actions found."));
}
