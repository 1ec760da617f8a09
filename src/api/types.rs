//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client. Field
//! names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ApiErrorData;
use crate::config::ApiConfig;
use crate::core::models::{
    ActionStatus, Assessment, AssessmentStatus, AssessmentTemplate, CorrectiveAction, Lifecycle,
    NcrStatus, NonConformity, Priority, ResponseRef, Severity, Tone,
};
use crate::core::services::{NcrSummary, TrendPoint};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Paging details (list endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            error: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Create a successful response for one page of a list
    #[must_use]
    pub fn paginated(page: Page<T>) -> Self {
        Self {
            success: true,
            data: Some(page.items),
            pagination: Some(page.pagination),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Paging metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    /// Items per page
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    /// Number of pages
    pub total_pages: usize,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Paging metadata
    pub pagination: Pagination,
}

/// Paging parameters of a list request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page (defaults to 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Items per page (defaults to the configured size)
    #[serde(default, alias = "limit")]
    pub page_size: Option<usize>,
}

impl PageRequest {
    /// Cut `items` down to the requested page
    #[must_use]
    pub fn apply<T>(self, items: Vec<T>, config: &ApiConfig) -> Page<T> {
        let page_size = config.page_size(self.page_size);
        let page = self.page.unwrap_or(1).max(1);
        let total_items = items.len();
        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();
        Page {
            items,
            pagination: Pagination {
                page,
                page_size,
                total_items,
                total_pages: total_items.div_ceil(page_size),
            },
        }
    }
}

// =============================================================================
// LIST FILTERS
// =============================================================================

/// Filters for listing non-conformities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NcrFilter {
    /// Only this status
    pub status: Option<NcrStatus>,
    /// Only this severity
    pub severity: Option<Severity>,
}

/// Filters for listing corrective actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFilter {
    /// Only this status
    pub status: Option<ActionStatus>,
    /// Only actions of this non-conformity
    pub ncr_id: Option<Uuid>,
}

/// Filters for listing assessments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssessmentFilter {
    /// Only this status
    pub status: Option<AssessmentStatus>,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for raising a non-conformity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNcrRequest {
    /// Short title
    pub title: String,
    /// Full description
    #[serde(default)]
    pub description: String,
    /// Severity (defaults to MINOR)
    #[serde(default)]
    pub severity: Severity,
    /// Response the NCR was raised from
    #[serde(default)]
    pub source: Option<ResponseRef>,
}

/// Request body for moving a non-conformity through its lifecycle
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NcrTransitionRequest {
    /// Requested status
    pub status: NcrStatus,
}

/// Request body for creating a corrective action
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionRequest {
    /// Owning non-conformity
    #[serde(alias = "ncrId")]
    pub non_conformity_id: Uuid,
    /// What must be done
    pub description: String,
    /// Priority (defaults to MEDIUM)
    #[serde(default)]
    pub priority: Priority,
    /// Due date
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    /// Initial assignee
    #[serde(default)]
    pub assigned_to_id: Option<String>,
}

/// Request body for a plain status change
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStatusRequest {
    /// Requested status
    pub status: ActionStatus,
}

/// Request body for verifying a completed action
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyActionRequest {
    /// Whether the fix worked, and the evidence
    pub effectiveness_notes: String,
    /// Verifier
    pub verified_by_id: String,
}

/// Request body for assigning an action
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignActionRequest {
    /// New assignee
    #[serde(alias = "assignedToId")]
    pub assignee_id: String,
}

/// Request body for creating an assessment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    /// Title
    pub title: String,
    /// Scope notes
    #[serde(default)]
    pub description: Option<String>,
    /// Template restricting the sections (`None` = all)
    #[serde(default)]
    pub template_id: Option<Uuid>,
    /// Lead auditor
    pub lead_auditor_id: String,
}

/// Request body for recording a response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponseRequest {
    /// Question answered
    pub question_id: Uuid,
    /// Score 0-5, `null` for N/A
    #[serde(default)]
    pub score: Option<u8>,
    /// Evidence
    #[serde(default)]
    pub justification: Option<String>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// One status in a workflow definition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDefinition {
    /// Wire value ("IN_PROGRESS")
    pub value: String,
    /// Display label
    pub label: &'static str,
    /// Presentation tone
    pub tone: Tone,
    /// States reachable by a plain transition
    pub allowed_next: Vec<String>,
    /// States reachable only through a dedicated operation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gated_next: Vec<String>,
    /// Whether no edge leaves this state
    pub terminal: bool,
}

/// The full workflow of one entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleDefinition {
    /// Entity name
    pub entity: &'static str,
    /// Every status, in workflow order
    pub statuses: Vec<StatusDefinition>,
}

impl LifecycleDefinition {
    /// Describe the lifecycle of `S`
    #[must_use]
    pub fn of<S: Lifecycle>() -> Self {
        let statuses = S::STATES
            .iter()
            .map(|&state| {
                let (gated, plain): (Vec<S>, Vec<S>) =
                    state.allowed_next().iter().copied().partition(|next| state.is_gated(*next));
                StatusDefinition {
                    value: state.to_string(),
                    label: state.label(),
                    tone: state.tone(),
                    allowed_next: plain.iter().map(ToString::to_string).collect(),
                    gated_next: gated.iter().map(ToString::to_string).collect(),
                    terminal: state.is_terminal(),
                }
            })
            .collect();
        Self {
            entity: S::ENTITY,
            statuses,
        }
    }
}

/// Workflow definitions shared with every client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowData {
    /// Corrective-action workflow
    pub corrective_action: LifecycleDefinition,
    /// Non-conformity lifecycle
    pub non_conformity: LifecycleDefinition,
    /// Assessment lifecycle
    pub assessment: LifecycleDefinition,
}

/// A template with the sections it resolves to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    /// The template
    #[serde(flatten)]
    pub template: AssessmentTemplate,
    /// Included section ids, in catalog order
    pub section_ids: Vec<Uuid>,
    /// Questions across included sections
    pub question_count: usize,
}

/// A non-conformity with its actions and summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcrDetail {
    /// The record
    #[serde(flatten)]
    pub ncr: NonConformity,
    /// Its corrective actions, oldest first
    pub actions: Vec<CorrectiveAction>,
    /// Roll-up of the actions
    pub summary: NcrSummary,
}

/// An assessment with its live compliance figure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDetail {
    /// The assessment
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Overall compliance over the current responses
    pub compliance: Option<f64>,
    /// Questions in the included sections
    pub total_questions: usize,
}

/// Result of a status change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionData<E, S> {
    /// Status before the change
    pub previous_status: S,
    /// The entity after the change
    #[serde(flatten)]
    pub entity: E,
}

/// Result of a delete
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedData {
    /// Deleted id
    pub id: Uuid,
    /// Corrective actions removed along with it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cascaded_actions: Option<usize>,
}

/// Monthly trend report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendData {
    /// Months covered
    pub months: u32,
    /// One point per month, oldest first
    pub points: Vec<TrendPoint>,
}
