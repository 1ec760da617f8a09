//! Tests for compliance scoring and the monthly trend

use chrono::{Duration, TimeZone, Utc};
use isoaudit::core::models::{Assessment, AssessmentStatus, NcrStatus, Response, Score, Section};
use isoaudit::core::services::{
    ComplianceTally, TrendWindow, YearMonth, assess, monthly_trend, overall_compliance,
};
use isoaudit::standard::{self, question_id, section_id};

use crate::common::fixtures::{NcrBuilder, fixed_now};

fn response(clause: u8, sub: u8, score: Option<u8>) -> Response {
    Response {
        question_id: question_id(clause, sub),
        section_id: section_id(clause),
        score: score.map(|s| Score::new(s).unwrap()),
        justification: None,
        answered_at: fixed_now(),
    }
}

fn assessment_with(responses: Vec<Response>) -> Assessment {
    let mut assessment = Assessment::new("Q2 audit".into(), "auditor".into(), None, fixed_now());
    assessment.responses = responses;
    assessment
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// SCORES
// =============================================================================

#[test]
fn score_scale_is_zero_to_five() {
    assert!(close(Score::new(0).unwrap().percentage(), 0.0));
    assert!(close(Score::new(3).unwrap().percentage(), 60.0));
    assert!(close(Score::new(5).unwrap().percentage(), 100.0));
    assert!(Score::new(6).is_err());
}

#[test]
fn score_rejects_out_of_range_json() {
    assert!(serde_json::from_str::<Score>("4").is_ok());
    assert!(serde_json::from_str::<Score>("7").is_err());
}

// =============================================================================
// OVERALL COMPLIANCE
// =============================================================================

#[test]
fn overall_is_mean_of_scored_responses() {
    let responses = vec![response(4, 1, Some(5)), response(4, 2, Some(3)), response(5, 1, Some(1))];
    // (100 + 60 + 20) / 3
    assert!(close(overall_compliance(&responses).unwrap(), 60.0));
}

#[test]
fn not_applicable_is_excluded() {
    let responses = vec![response(4, 1, Some(4)), response(4, 2, None)];
    assert!(close(overall_compliance(&responses).unwrap(), 80.0));

    let tally = ComplianceTally::from_scores(responses.iter().map(|r| r.score));
    assert_eq!(tally.answered(), 1);
    assert_eq!(tally.not_applicable(), 1);
}

#[test]
fn no_scored_responses_means_no_figure() {
    assert_eq!(overall_compliance(&[]), None);
    assert_eq!(overall_compliance(&[response(4, 1, None)]), None);
}

// =============================================================================
// SECTION BREAKDOWN
// =============================================================================

#[test]
fn breakdown_covers_included_sections_only() {
    let sections: Vec<Section> = standard::sections_for(Some(standard::CONTEXT_AND_LEADERSHIP))
        .unwrap();
    let included: Vec<&Section> = sections.iter().collect();
    let assessment = assessment_with(vec![
        response(4, 1, Some(5)),
        response(4, 2, None),
        response(5, 1, Some(0)),
        // Clause 8 is outside the template and must not count
        response(8, 1, Some(5)),
    ]);

    let result = assess(&assessment, &included);
    assert_eq!(result.sections.len(), 2);
    assert_eq!(result.total_questions, 7);
    assert_eq!(result.answered, 2);
    assert!(close(result.overall.unwrap(), 50.0));

    let clause4 = &result.sections[0];
    assert_eq!(clause4.clause, "4");
    assert_eq!(clause4.answered, 1);
    assert_eq!(clause4.not_applicable, 1);
    assert!(close(clause4.answered_percentage, 25.0));
    assert!(close(clause4.compliance.unwrap(), 100.0));

    let clause5 = &result.sections[1];
    assert!(close(clause5.compliance.unwrap(), 0.0));
}

#[test]
fn overall_is_not_mean_of_section_means() {
    let sections = standard::standard_sections();
    let included: Vec<&Section> = sections.iter().collect();
    let assessment = assessment_with(vec![
        response(4, 1, Some(5)),
        response(4, 2, Some(5)),
        response(4, 3, Some(5)),
        response(5, 1, Some(0)),
    ]);

    // Section means are 100 and 0; response mean is 75
    let result = assess(&assessment, &included);
    assert!(close(result.overall.unwrap(), 75.0));
}

// =============================================================================
// TRENDS
// =============================================================================

#[test]
fn window_ends_with_current_month() {
    let window = TrendWindow::ending_at(fixed_now(), 3);
    let months = window.months();
    assert_eq!(
        months,
        vec![
            YearMonth::new(2026, 4).unwrap(),
            YearMonth::new(2026, 5).unwrap(),
            YearMonth::new(2026, 6).unwrap(),
        ]
    );
}

#[test]
fn window_crosses_year_boundary() {
    let now = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
    let months = TrendWindow::ending_at(now, 4).months();
    assert_eq!(months.first(), YearMonth::new(2025, 11).as_ref());
    assert_eq!(months.last(), YearMonth::new(2026, 2).as_ref());
}

#[test]
fn trend_has_a_point_for_every_month() {
    let now = fixed_now();
    let mut completed = assessment_with(vec![response(4, 1, Some(5)), response(4, 2, Some(0))]);
    completed.status = AssessmentStatus::Completed;
    completed.completed_at = Some(now);

    let opened = NcrBuilder::new().build();
    let mut closed = NcrBuilder::new().status(NcrStatus::Closed).build();
    closed.created_at = now - Duration::days(62);
    closed.closed_at = Some(now);

    let window = TrendWindow::ending_at(now, 6);
    let points = monthly_trend(&[completed], &[opened, closed], &window);
    assert_eq!(points.len(), 6);

    let june = points.last().unwrap();
    assert_eq!(june.assessments_completed, 1);
    assert!(close(june.average_compliance.unwrap(), 50.0));
    assert_eq!(june.ncrs_opened, 1);
    assert_eq!(june.ncrs_closed, 1);

    let april = &points[3];
    assert_eq!(april.month, YearMonth::new(2026, 4).unwrap());
    assert_eq!(april.ncrs_opened, 1);

    let january = &points[0];
    assert_eq!(january.assessments_completed, 0);
    assert_eq!(january.average_compliance, None);
}
