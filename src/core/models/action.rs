//! Corrective action model
//!
//! A corrective action is the remediation task raised against a
//! non-conformity. It moves through its own status workflow and is closed out
//! by a verification of effectiveness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifecycle::{Lifecycle, Tone};

/// Corrective action status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    /// Raised, nobody working on it yet
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Work done, awaiting verification
    Completed,
    /// Effectiveness verified (terminal)
    Verified,
}

impl Lifecycle for ActionStatus {
    const ENTITY: &'static str = "corrective action";

    const STATES: &'static [Self] = &[Self::Pending, Self::InProgress, Self::Completed, Self::Verified];

    const TRANSITIONS: &'static [(Self, &'static [Self])] = &[
        (Self::Pending, &[Self::InProgress]),
        (Self::InProgress, &[Self::Completed, Self::Pending]),
        (Self::Completed, &[Self::Verified, Self::InProgress]),
        (Self::Verified, &[]),
    ];

    const GATED: &'static [(Self, Self)] = &[(Self::Completed, Self::Verified)];

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Verified => "Verified",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Pending => Tone::Neutral,
            Self::InProgress => Tone::Info,
            Self::Completed => Tone::Warning,
            Self::Verified => Tone::Success,
        }
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Verified => write!(f, "VERIFIED"),
        }
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "verified" => Ok(Self::Verified),
            _ => Err(format!(
                "Invalid action status: {s}. Use: pending, in_progress, completed, verified"
            )),
        }
    }
}

/// Corrective action priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal (default)
    #[default]
    Medium,
    /// Should be handled soon
    High,
    /// Handle immediately
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" | "crit" => Ok(Self::Critical),
            _ => Err(format!("Invalid priority: {s}. Use: low, medium, high, critical")),
        }
    }
}

/// A corrective action attached to a non-conformity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveAction {
    /// Unique identifier
    pub id: Uuid,

    /// Owning non-conformity
    pub non_conformity_id: Uuid,

    /// What must be done
    pub description: String,

    /// Current status
    pub status: ActionStatus,

    /// Priority
    pub priority: Priority,

    /// When the action is due
    pub target_date: Option<DateTime<Utc>>,

    /// When the action moved to COMPLETED
    pub completed_date: Option<DateTime<Utc>>,

    /// When the action was verified
    pub verified_date: Option<DateTime<Utc>>,

    /// Verifier's assessment of whether the fix worked
    pub effectiveness_notes: Option<String>,

    /// User responsible for the work
    pub assigned_to_id: Option<String>,

    /// User who verified effectiveness
    pub verified_by_id: Option<String>,

    /// When the action was raised
    pub created_at: DateTime<Utc>,

    /// Last mutation
    pub updated_at: DateTime<Utc>,
}

impl CorrectiveAction {
    /// Create a new PENDING action for a non-conformity
    #[must_use]
    pub fn new(
        non_conformity_id: Uuid,
        description: String,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            non_conformity_id,
            description,
            status: ActionStatus::Pending,
            priority,
            target_date: None,
            completed_date: None,
            verified_date: None,
            effectiveness_notes: None,
            assigned_to_id: None,
            verified_by_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the action still blocks its non-conformity from closing
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != ActionStatus::Verified
    }

    /// Past its target date and no work delivered yet
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        matches!(self.status, ActionStatus::Pending | ActionStatus::InProgress)
            && self.target_date.is_some_and(|due| due < now)
    }
}
