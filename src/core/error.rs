//! Business rule violations
//!
//! Every variant carries a stable machine-readable code so clients can tell
//! workflow violations apart from transport failures.

use thiserror::Error;

/// A rejected domain operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The requested state is not an edge out of the current one
    #[error("cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        /// Entity kind ("corrective action", "non-conformity", ...)
        entity: &'static str,
        /// Current state
        from: String,
        /// Requested state
        to: String,
    },

    /// The current state has no outgoing edges
    #[error("{entity} is {state}, which is a terminal state")]
    TerminalState {
        /// Entity kind
        entity: &'static str,
        /// Current state
        state: String,
    },

    /// VERIFIED was requested through a plain status change
    #[error("corrective actions reach VERIFIED only through verification")]
    VerificationRequired,

    /// A non-conformity cannot close while actions are unverified
    #[error("{open} corrective action(s) are not verified yet")]
    OpenActionsRemain {
        /// Number of child actions not in VERIFIED
        open: usize,
    },

    /// A response score outside 0-5
    #[error("score {0} is out of range (0-5)")]
    InvalidScore(u8),

    /// Any other rejected input
    #[error("{0}")]
    Validation(String),
}

impl WorkflowError {
    /// Machine-readable error kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::TerminalState { .. } => "TERMINAL_STATE",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::OpenActionsRemain { .. } => "OPEN_ACTIONS_REMAIN",
            Self::InvalidScore(_) => "INVALID_SCORE",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Shorthand for [`WorkflowError::Validation`]
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
