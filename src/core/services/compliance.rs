//! Compliance aggregation
//!
//! Compliance is the mean of `score / 5 * 100` over answered responses. N/A
//! responses (no score) never enter the denominator, so a section where
//! nothing was answered has no compliance figure at all rather than 0%.
//!
//! Everything here is a pure reducer over response rows; callers recompute
//! on every read.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::core::models::{Assessment, NonConformity, Response, Score, Section};

/// Running totals for a set of responses
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplianceTally {
    answered: usize,
    not_applicable: usize,
    points: f64,
}

impl ComplianceTally {
    /// Fold one response score into the tally
    pub fn record(&mut self, score: Option<Score>) {
        match score {
            Some(score) => {
                self.answered += 1;
                self.points += score.percentage();
            },
            None => self.not_applicable += 1,
        }
    }

    /// Tally a sequence of scores
    #[must_use]
    pub fn from_scores(scores: impl IntoIterator<Item = Option<Score>>) -> Self {
        scores.into_iter().fold(Self::default(), |mut tally, score| {
            tally.record(score);
            tally
        })
    }

    /// Number of scored responses
    #[must_use]
    pub const fn answered(&self) -> usize {
        self.answered
    }

    /// Number of N/A responses
    #[must_use]
    pub const fn not_applicable(&self) -> usize {
        self.not_applicable
    }

    /// Mean compliance percentage, `None` when nothing was answered
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        (self.answered > 0).then(|| self.points / self.answered as f64)
    }
}

/// Compliance of one section within an assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompliance {
    /// Section id
    pub section_id: Uuid,
    /// Clause number
    pub clause: String,
    /// Section title
    pub title: String,
    /// Questions in the section
    pub total_questions: usize,
    /// Questions with a score
    pub answered: usize,
    /// Questions marked N/A
    pub not_applicable: usize,
    /// `answered / total_questions * 100`
    pub answered_percentage: f64,
    /// Mean compliance, `None` when nothing was answered
    pub compliance: Option<f64>,
}

/// Compliance of a whole assessment, with its section breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCompliance {
    /// Assessment id
    pub assessment_id: Uuid,
    /// Mean compliance over every answered response
    pub overall: Option<f64>,
    /// Questions across included sections
    pub total_questions: usize,
    /// Scored responses across included sections
    pub answered: usize,
    /// One entry per included section, in catalog order
    pub sections: Vec<SectionCompliance>,
}

/// Overall compliance over a set of responses
#[must_use]
pub fn overall_compliance(responses: &[Response]) -> Option<f64> {
    ComplianceTally::from_scores(responses.iter().map(|r| r.score)).percentage()
}

/// Compliance of one section, counting only responses to its questions
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn section_compliance(section: &Section, responses: &[Response]) -> SectionCompliance {
    let tally = ComplianceTally::from_scores(
        responses
            .iter()
            .filter(|r| section.contains_question(r.question_id))
            .map(|r| r.score),
    );

    let total_questions = section.questions.len();
    let answered_percentage = if total_questions == 0 {
        0.0
    } else {
        tally.answered() as f64 / total_questions as f64 * 100.0
    };

    SectionCompliance {
        section_id: section.id,
        clause: section.clause.clone(),
        title: section.title.clone(),
        total_questions,
        answered: tally.answered(),
        not_applicable: tally.not_applicable(),
        answered_percentage,
        compliance: tally.percentage(),
    }
}

/// Compliance of an assessment over the sections it includes
///
/// The overall figure is the mean over every answered response in the
/// included sections, not the mean of section means.
#[must_use]
pub fn assess(assessment: &Assessment, sections: &[&Section]) -> AssessmentCompliance {
    let breakdown: Vec<SectionCompliance> =
        sections.iter().map(|s| section_compliance(s, &assessment.responses)).collect();

    let overall = ComplianceTally::from_scores(
        assessment
            .responses
            .iter()
            .filter(|r| sections.iter().any(|s| s.contains_question(r.question_id)))
            .map(|r| r.score),
    );

    AssessmentCompliance {
        assessment_id: assessment.id,
        overall: overall.percentage(),
        total_questions: breakdown.iter().map(|s| s.total_questions).sum(),
        answered: overall.answered(),
        sections: breakdown,
    }
}

// =============================================================================
// TRENDS
// =============================================================================

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
}

impl YearMonth {
    /// Build from a year and month, `None` if the month is out of range
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month == 0 || month > 12 {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month a timestamp falls in
    #[must_use]
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// The following month
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The month `months` before this one
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn back(self, months: u32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) - months as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A run of consecutive months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    start: YearMonth,
    months: u32,
}

impl TrendWindow {
    /// `months` months starting at `start`
    #[must_use]
    pub const fn new(start: YearMonth, months: u32) -> Self {
        Self { start, months }
    }

    /// The last `months` months, ending with the month of `now`
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, months: u32) -> Self {
        let months = months.max(1);
        Self {
            start: YearMonth::of(now).back(months - 1),
            months,
        }
    }

    /// Months in the window, oldest first
    #[must_use]
    pub fn months(&self) -> Vec<YearMonth> {
        std::iter::successors(Some(self.start), |m| Some(m.next()))
            .take(self.months as usize)
            .collect()
    }
}

/// Activity in one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Month ("2026-03")
    pub month: YearMonth,
    /// Assessments completed in the month
    pub assessments_completed: usize,
    /// Mean overall compliance of those assessments
    pub average_compliance: Option<f64>,
    /// Non-conformities raised in the month
    pub ncrs_opened: usize,
    /// Non-conformities closed in the month
    pub ncrs_closed: usize,
}

#[derive(Default)]
struct MonthTotals {
    completed: usize,
    compliance_sum: f64,
    scored: usize,
    opened: usize,
    closed: usize,
}

/// Monthly compliance and NCR activity over a window
///
/// Every month of the window gets a point, including months with no
/// activity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn monthly_trend(
    assessments: &[Assessment],
    ncrs: &[NonConformity],
    window: &TrendWindow,
) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<YearMonth, MonthTotals> =
        window.months().into_iter().map(|m| (m, MonthTotals::default())).collect();

    for assessment in assessments {
        let Some(completed_at) = assessment.completed_at else {
            continue;
        };
        if let Some(month) = totals.get_mut(&YearMonth::of(completed_at)) {
            month.completed += 1;
            if let Some(compliance) = overall_compliance(&assessment.responses) {
                month.compliance_sum += compliance;
                month.scored += 1;
            }
        }
    }

    for ncr in ncrs {
        if let Some(month) = totals.get_mut(&YearMonth::of(ncr.created_at)) {
            month.opened += 1;
        }
        if let Some(month) = ncr.closed_at.and_then(|at| totals.get_mut(&YearMonth::of(at))) {
            month.closed += 1;
        }
    }

    totals
        .into_iter()
        .map(|(month, t)| TrendPoint {
            month,
            assessments_completed: t.completed,
            average_compliance: (t.scored > 0).then(|| t.compliance_sum / t.scored as f64),
            ncrs_opened: t.opened,
            ncrs_closed: t.closed,
        })
        .collect()
}
