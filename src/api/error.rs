//! API error types with HTTP status code mapping

use serde::Serialize;

use crate::core::error::WorkflowError;

/// Error codes that map to HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,
    /// Invalid request (400)
    BadRequest,
    /// Requested state is not an edge out of the current one (409)
    InvalidTransition,
    /// Entity is in a terminal state (409)
    TerminalState,
    /// VERIFIED requested without verification (409)
    VerificationRequired,
    /// Close requested while actions are unverified (409)
    OpenActionsRemain,
    /// Input failed validation (422)
    Validation,
    /// Score outside 0-5 (422)
    InvalidScore,
    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::InvalidTransition
            | Self::TerminalState
            | Self::VerificationRequired
            | Self::OpenActionsRemain => 409,
            Self::Validation | Self::InvalidScore => 422,
            Self::Internal => 500,
        }
    }

    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::TerminalState => "TERMINAL_STATE",
            Self::VerificationRequired => "VERIFICATION_REQUIRED",
            Self::OpenActionsRemain => "OPEN_ACTIONS_REMAIN",
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidScore => "INVALID_SCORE",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Whether the error reports a business rule violation rather than a
    /// transport or server failure
    #[must_use]
    pub const fn is_business_rule(self) -> bool {
        !matches!(self, Self::NotFound | Self::BadRequest | Self::Internal)
    }
}

/// API error with code and message
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error code (determines HTTP status)
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create an error with an explicit code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a bad request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let code = match err {
            WorkflowError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            WorkflowError::TerminalState { .. } => ErrorCode::TerminalState,
            WorkflowError::VerificationRequired => ErrorCode::VerificationRequired,
            WorkflowError::OpenActionsRemain { .. } => ErrorCode::OpenActionsRemain,
            WorkflowError::InvalidScore(_) => ErrorCode::InvalidScore,
            WorkflowError::Validation(_) => ErrorCode::Validation,
        };
        Self::new(code, err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        log::error!("Store failure: {err:#}");
        Self::internal(format!("{err:#}"))
    }
}

/// Serializable error data for JSON responses
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Error code string
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
