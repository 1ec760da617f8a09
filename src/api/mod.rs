//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients (the CLI).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take an [`ApiContext`] and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod context;
mod error;
mod handlers;
mod types;

pub use context::ApiContext;
pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    MAX_TREND_MONTHS, assessment_compliance, assign_action, complete_assessment, create_action,
    create_assessment, create_ncr, delete_action, delete_assessment, delete_ncr, get_action,
    get_assessment, get_dashboard, get_ncr, get_standard, get_trends, list_actions,
    list_assessments, list_ncrs, list_templates, ncr_summary, record_response,
    transition_assessment, transition_ncr, update_action_status, verify_action, workflow,
};
pub use types::{
    ActionFilter, ActionStatusRequest, ApiResponse, AssessmentDetail, AssessmentFilter,
    AssignActionRequest, CreateActionRequest, CreateAssessmentRequest, CreateNcrRequest,
    DeletedData, LifecycleDefinition, NcrDetail, NcrFilter, NcrTransitionRequest, Page,
    PageRequest, Pagination, RecordResponseRequest, StatusDefinition, TemplateItem,
    TransitionData, TrendData, VerifyActionRequest, WorkflowData,
};
