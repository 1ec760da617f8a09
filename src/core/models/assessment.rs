//! Assessment model
//!
//! An assessment is one self-audit run against the standard catalog. It owns
//! the scored responses, one per question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifecycle::{Lifecycle, Tone};
use crate::core::error::WorkflowError;

/// Assessment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    /// Created, no responses yet
    #[default]
    Draft,
    /// Being scored
    InProgress,
    /// Scoring finished, overall score frozen
    Completed,
    /// Kept for history only (terminal)
    Archived,
}

impl Lifecycle for AssessmentStatus {
    const ENTITY: &'static str = "assessment";

    const STATES: &'static [Self] = &[Self::Draft, Self::InProgress, Self::Completed, Self::Archived];

    const TRANSITIONS: &'static [(Self, &'static [Self])] = &[
        (Self::Draft, &[Self::InProgress]),
        (Self::InProgress, &[Self::Completed, Self::Draft]),
        (Self::Completed, &[Self::Archived]),
        (Self::Archived, &[]),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Draft => Tone::Neutral,
            Self::InProgress => Tone::Info,
            Self::Completed => Tone::Success,
            Self::Archived => Tone::Neutral,
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Archived => write!(f, "ARCHIVED"),
        }
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(Self::Draft),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" | "complete" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(format!(
                "Invalid assessment status: {s}. Use: draft, in_progress, completed, archived"
            )),
        }
    }
}

/// A response score on the 0-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Highest score on the scale
    pub const MAX: u8 = 5;

    /// Validate a raw score
    pub fn new(value: u8) -> Result<Self, WorkflowError> {
        if value > Self::MAX {
            return Err(WorkflowError::InvalidScore(value));
        }
        Ok(Self(value))
    }

    /// The raw 0-5 value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The score as a percentage of the maximum (`score / 5 * 100`)
    #[must_use]
    pub fn percentage(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX) * 100.0
    }
}

impl TryFrom<u8> for Score {
    type Error = WorkflowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A scored answer to one audit question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Question answered
    pub question_id: Uuid,

    /// Section the question belongs to
    pub section_id: Uuid,

    /// Score, `None` when the question is not applicable
    pub score: Option<Score>,

    /// Auditor's justification / evidence
    pub justification: Option<String>,

    /// When recorded
    pub answered_at: DateTime<Utc>,
}

/// A self-assessment against the standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Unique identifier
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Optional scope notes
    pub description: Option<String>,

    /// Current status
    pub status: AssessmentStatus,

    /// Template restricting which sections are included (`None` = all)
    pub template_id: Option<Uuid>,

    /// Lead auditor
    pub lead_auditor_id: String,

    /// Scored responses, at most one per question
    #[serde(default)]
    pub responses: Vec<Response>,

    /// Overall compliance, frozen on completion
    pub overall_score: Option<f64>,

    /// When created
    pub created_at: DateTime<Utc>,

    /// Last mutation
    pub updated_at: DateTime<Utc>,

    /// When completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Assessment {
    /// Create a new DRAFT assessment
    #[must_use]
    pub fn new(
        title: String,
        lead_auditor_id: String,
        template_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            status: AssessmentStatus::Draft,
            template_id,
            lead_auditor_id,
            responses: Vec::new(),
            overall_score: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Whether responses may still be recorded
    #[must_use]
    pub const fn accepts_responses(&self) -> bool {
        matches!(self.status, AssessmentStatus::Draft | AssessmentStatus::InProgress)
    }

    /// The response for a question, if any
    #[must_use]
    pub fn response_for(&self, question_id: Uuid) -> Option<&Response> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    /// Insert a response, replacing an earlier one for the same question
    pub fn upsert_response(&mut self, response: Response) {
        if let Some(existing) =
            self.responses.iter_mut().find(|r| r.question_id == response.question_id)
        {
            *existing = response;
        } else {
            self.responses.push(response);
        }
    }
}
