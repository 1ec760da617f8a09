//! Shared status-lifecycle definition
//!
//! Every status enum in the domain describes its workflow as data: the list of
//! states, an explicit transition table keyed by state, and presentation
//! metadata (label and tone). Engines and clients read the same table, so the
//! rules cannot drift between layers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::WorkflowError;

/// Presentation hint for a status, shared by every client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Not started or idle
    Neutral,
    /// Work underway
    Info,
    /// Needs attention
    Warning,
    /// Done and accepted
    Success,
    /// Problem state
    Danger,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral => write!(f, "neutral"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Success => write!(f, "success"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A status enum with an explicit transition table
pub trait Lifecycle: Copy + Eq + fmt::Display + 'static {
    /// Human name of the entity this status belongs to (used in errors)
    const ENTITY: &'static str;

    /// Every state, in workflow order
    const STATES: &'static [Self];

    /// Outgoing edges for each state
    const TRANSITIONS: &'static [(Self, &'static [Self])];

    /// Edges that exist in the workflow but may only be taken through a
    /// dedicated operation, never a plain transition
    const GATED: &'static [(Self, Self)] = &[];

    /// Display label ("In Progress")
    fn label(self) -> &'static str;

    /// Presentation tone
    fn tone(self) -> Tone;

    /// States reachable from `self`, gated edges included
    #[must_use]
    fn allowed_next(self) -> &'static [Self] {
        Self::TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
            .unwrap_or(&[])
    }

    /// Whether `next` is an edge out of `self`
    #[must_use]
    fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Whether the edge `self -> next` needs a dedicated operation
    #[must_use]
    fn is_gated(self, next: Self) -> bool {
        Self::GATED.contains(&(self, next))
    }

    /// Whether no edge leaves `self`
    #[must_use]
    fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

/// Take one edge of a lifecycle table
///
/// Fails with [`WorkflowError::TerminalState`] when `current` has no outgoing
/// edges and with [`WorkflowError::InvalidTransition`] when `requested` is not
/// one of them. Gated edges are not checked here; callers that expose plain
/// transitions reject them first.
pub fn advance<S: Lifecycle>(current: S, requested: S) -> Result<S, WorkflowError> {
    if current.is_terminal() {
        return Err(WorkflowError::TerminalState {
            entity: S::ENTITY,
            state: current.to_string(),
        });
    }

    if !current.can_transition_to(requested) {
        return Err(WorkflowError::InvalidTransition {
            entity: S::ENTITY,
            from: current.to_string(),
            to: requested.to_string(),
        });
    }

    Ok(requested)
}
