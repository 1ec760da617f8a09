//! Non-conformity model
//!
//! A non-conformity (NCR) records a detected deviation from the standard,
//! usually raised from a low-scoring assessment response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifecycle::{Lifecycle, Tone};

/// Non-conformity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NcrStatus {
    /// Raised, not yet worked
    #[default]
    Open,
    /// Corrective work underway
    InProgress,
    /// Work believed complete
    Resolved,
    /// Closed out (terminal)
    Closed,
}

impl Lifecycle for NcrStatus {
    const ENTITY: &'static str = "non-conformity";

    const STATES: &'static [Self] = &[Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    const TRANSITIONS: &'static [(Self, &'static [Self])] = &[
        (Self::Open, &[Self::InProgress]),
        (Self::InProgress, &[Self::Resolved, Self::Open]),
        (Self::Resolved, &[Self::Closed, Self::Open]),
        (Self::Closed, &[]),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Open => Tone::Danger,
            Self::InProgress => Tone::Info,
            Self::Resolved => Tone::Warning,
            Self::Closed => Tone::Success,
        }
    }
}

impl std::fmt::Display for NcrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Resolved => write!(f, "RESOLVED"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

impl std::str::FromStr for NcrStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "open" | "reopen" => Ok(Self::Open),
            "in_progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" | "close" => Ok(Self::Closed),
            _ => Err(format!("Invalid NCR status: {s}. Use: open, in_progress, resolved, closed")),
        }
    }
}

/// Non-conformity severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Isolated lapse, system still effective
    #[default]
    Minor,
    /// Requirement not met or system breakdown
    Major,
    /// Immediate risk to product or customer
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minor => write!(f, "MINOR"),
            Self::Major => write!(f, "MAJOR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Invalid severity: {s}. Use: minor, major, critical")),
        }
    }
}

/// The assessment response a non-conformity was raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRef {
    /// Assessment holding the response
    pub assessment_id: Uuid,
    /// Question the response answers
    pub question_id: Uuid,
}

/// A non-conformity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonConformity {
    /// Unique identifier
    pub id: Uuid,

    /// Short title
    pub title: String,

    /// Full description of the deviation
    pub description: String,

    /// Severity
    pub severity: Severity,

    /// Current status
    pub status: NcrStatus,

    /// Originating assessment response, if any
    pub source: Option<ResponseRef>,

    /// When raised
    pub created_at: DateTime<Utc>,

    /// Last mutation
    pub updated_at: DateTime<Utc>,

    /// When closed
    pub closed_at: Option<DateTime<Utc>>,
}

impl NonConformity {
    /// Create a new OPEN non-conformity
    #[must_use]
    pub fn new(title: String, description: String, severity: Severity, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            severity,
            status: NcrStatus::Open,
            source: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// Link to the response this NCR was raised from
    #[must_use]
    pub fn with_source(mut self, source: ResponseRef) -> Self {
        self.source = Some(source);
        self
    }
}
