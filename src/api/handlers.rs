//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.
//!
//! Every mutation of a corrective action or non-conformity drops the owning
//! NCR's cached summary once the change is stored. Rejected requests leave
//! the cache alone.

use uuid::Uuid;

use super::context::ApiContext;
use super::error::ApiError;
use super::types::{
    ActionFilter, ActionStatusRequest, AssessmentDetail, AssessmentFilter, AssignActionRequest,
    CreateActionRequest, CreateAssessmentRequest, CreateNcrRequest, DeletedData,
    LifecycleDefinition, NcrDetail, NcrFilter, NcrTransitionRequest, Page, PageRequest,
    RecordResponseRequest, TemplateItem, TransitionData, TrendData, VerifyActionRequest,
    WorkflowData,
};
use crate::core::error::WorkflowError;
use crate::core::models::{
    ActionStatus, Assessment, AssessmentStatus, CorrectiveAction, Lifecycle, NcrStatus,
    NonConformity, Response, Score, Section, advance,
};
use crate::core::ports::{ActionRepository, AssessmentRepository, NcrRepository, is_fresh};
use crate::core::services::{
    AssessmentCompliance, DashboardSummary, NcrSummary, TrendWindow, action_workflow, assess,
    dashboard, monthly_trend, ncr_lifecycle, overall_compliance, summarize_ncr,
};
use crate::standard;

/// Longest trend window a request may ask for
pub const MAX_TREND_MONTHS: u32 = 120;

// =============================================================================
// REFERENCE DATA
// =============================================================================

/// Status tables for every lifecycle
#[must_use]
pub fn workflow() -> WorkflowData {
    WorkflowData {
        corrective_action: LifecycleDefinition::of::<ActionStatus>(),
        non_conformity: LifecycleDefinition::of::<NcrStatus>(),
        assessment: LifecycleDefinition::of::<AssessmentStatus>(),
    }
}

/// The standard's sections and questions
#[must_use]
pub fn get_standard() -> Vec<Section> {
    standard::standard_sections()
}

/// The seven assessment templates with their resolved sections
#[must_use]
pub fn list_templates() -> Vec<TemplateItem> {
    let sections = standard::standard_sections();
    standard::templates()
        .into_iter()
        .map(|template| {
            let selected = template.select(&sections);
            TemplateItem {
                section_ids: selected.iter().map(|s| s.id).collect(),
                question_count: selected.iter().map(|s| s.questions.len()).sum(),
                template,
            }
        })
        .collect()
}

// =============================================================================
// ASSESSMENTS
// =============================================================================

fn load_assessment(ctx: &ApiContext, id: Uuid) -> Result<Assessment, ApiError> {
    ctx.store()
        .get_assessment(id)?
        .ok_or_else(|| ApiError::not_found(format!("Assessment '{id}' not found")))
}

fn assessment_sections(assessment: &Assessment) -> Result<Vec<Section>, ApiError> {
    standard::sections_for(assessment.template_id).ok_or_else(|| {
        ApiError::internal(format!(
            "Assessment '{}' references an unknown template",
            assessment.id
        ))
    })
}

/// List assessments, newest last
pub fn list_assessments(
    ctx: &ApiContext,
    filter: AssessmentFilter,
    page: PageRequest,
) -> Result<Page<Assessment>, ApiError> {
    let assessments: Vec<Assessment> = ctx
        .store()
        .list_assessments()?
        .into_iter()
        .filter(|a| filter.status.is_none_or(|s| a.status == s))
        .collect();
    Ok(page.apply(assessments, ctx.config()))
}

/// Create a DRAFT assessment
pub fn create_assessment(
    ctx: &ApiContext,
    req: &CreateAssessmentRequest,
) -> Result<Assessment, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::validation("Assessment title cannot be empty"));
    }
    if req.lead_auditor_id.trim().is_empty() {
        return Err(ApiError::validation("Lead auditor is required"));
    }
    if let Some(template_id) = req.template_id
        && standard::find_template(template_id).is_none()
    {
        return Err(ApiError::validation(format!("Unknown template '{template_id}'")));
    }

    let mut assessment = Assessment::new(
        req.title.trim().to_string(),
        req.lead_auditor_id.clone(),
        req.template_id,
        ctx.now(),
    );
    assessment.description.clone_from(&req.description);

    ctx.store().save_assessment(&assessment)?;
    log::info!("Created assessment {} ({})", assessment.id, assessment.title);
    Ok(assessment)
}

/// Get an assessment with its live compliance
pub fn get_assessment(ctx: &ApiContext, id: Uuid) -> Result<AssessmentDetail, ApiError> {
    let assessment = load_assessment(ctx, id)?;
    let sections = assessment_sections(&assessment)?;
    Ok(AssessmentDetail {
        compliance: overall_compliance(&assessment.responses),
        total_questions: sections.iter().map(|s| s.questions.len()).sum(),
        assessment,
    })
}

/// Per-section compliance breakdown
pub fn assessment_compliance(
    ctx: &ApiContext,
    id: Uuid,
) -> Result<AssessmentCompliance, ApiError> {
    let assessment = load_assessment(ctx, id)?;
    let sections = assessment_sections(&assessment)?;
    let included: Vec<&Section> = sections.iter().collect();
    Ok(assess(&assessment, &included))
}

/// Record or replace the response to one question
///
/// The first response moves a DRAFT assessment to IN_PROGRESS.
pub fn record_response(
    ctx: &ApiContext,
    id: Uuid,
    req: &RecordResponseRequest,
) -> Result<Assessment, ApiError> {
    let mut assessment = load_assessment(ctx, id)?;
    if !assessment.accepts_responses() {
        return Err(WorkflowError::validation(format!(
            "Assessment is {}; responses can no longer be recorded",
            assessment.status
        ))
        .into());
    }

    let sections = assessment_sections(&assessment)?;
    let section = sections
        .iter()
        .find(|s| s.contains_question(req.question_id))
        .ok_or_else(|| {
            ApiError::validation(format!(
                "Question '{}' is not part of this assessment",
                req.question_id
            ))
        })?;
    let score = req.score.map(Score::new).transpose()?;

    let now = ctx.now();
    if assessment.status == AssessmentStatus::Draft {
        assessment.status = advance(assessment.status, AssessmentStatus::InProgress)?;
    }
    assessment.upsert_response(Response {
        question_id: req.question_id,
        section_id: section.id,
        score,
        justification: req.justification.clone().filter(|j| !j.trim().is_empty()),
        answered_at: now,
    });
    assessment.updated_at = now;

    ctx.store().save_assessment(&assessment)?;
    log::debug!("Recorded response to {} on assessment {id}", req.question_id);
    Ok(assessment)
}

/// Move an assessment through its lifecycle
///
/// Entering COMPLETED freezes the overall score and stamps the completion
/// time; going back to DRAFT clears both.
pub fn transition_assessment(
    ctx: &ApiContext,
    id: Uuid,
    requested: AssessmentStatus,
) -> Result<TransitionData<Assessment, AssessmentStatus>, ApiError> {
    let mut assessment = load_assessment(ctx, id)?;
    let previous = assessment.status;
    let next = advance(previous, requested)?;
    let now = ctx.now();

    match next {
        AssessmentStatus::Completed => {
            assessment.overall_score = overall_compliance(&assessment.responses);
            assessment.completed_at = Some(now);
        },
        AssessmentStatus::Draft | AssessmentStatus::InProgress => {
            assessment.overall_score = None;
            assessment.completed_at = None;
        },
        AssessmentStatus::Archived => {},
    }
    assessment.status = next;
    assessment.updated_at = now;

    ctx.store().save_assessment(&assessment)?;
    log::info!("Assessment {id}: {previous} -> {next}");
    Ok(TransitionData {
        previous_status: previous,
        entity: assessment,
    })
}

/// Complete an assessment
pub fn complete_assessment(
    ctx: &ApiContext,
    id: Uuid,
) -> Result<TransitionData<Assessment, AssessmentStatus>, ApiError> {
    transition_assessment(ctx, id, AssessmentStatus::Completed)
}

/// Delete an assessment
pub fn delete_assessment(ctx: &ApiContext, id: Uuid) -> Result<DeletedData, ApiError> {
    if !ctx.store().delete_assessment(id)? {
        return Err(ApiError::not_found(format!("Assessment '{id}' not found")));
    }
    log::info!("Deleted assessment {id}");
    Ok(DeletedData {
        id,
        cascaded_actions: None,
    })
}

// =============================================================================
// NON-CONFORMITIES
// =============================================================================

fn load_ncr(ctx: &ApiContext, id: Uuid) -> Result<NonConformity, ApiError> {
    ctx.store()
        .get_ncr(id)?
        .ok_or_else(|| ApiError::not_found(format!("Non-conformity '{id}' not found")))
}

/// List non-conformities, newest last
pub fn list_ncrs(
    ctx: &ApiContext,
    filter: NcrFilter,
    page: PageRequest,
) -> Result<Page<NonConformity>, ApiError> {
    let ncrs: Vec<NonConformity> = ctx
        .store()
        .list_ncrs()?
        .into_iter()
        .filter(|n| filter.status.is_none_or(|s| n.status == s))
        .filter(|n| filter.severity.is_none_or(|s| n.severity == s))
        .collect();
    Ok(page.apply(ncrs, ctx.config()))
}

/// Raise a non-conformity
///
/// When `source` is given, the assessment must exist and hold a response to
/// the question.
pub fn create_ncr(ctx: &ApiContext, req: &CreateNcrRequest) -> Result<NonConformity, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::validation("Non-conformity title cannot be empty"));
    }

    let mut ncr = NonConformity::new(
        req.title.trim().to_string(),
        req.description.clone(),
        req.severity,
        ctx.now(),
    );
    if let Some(source) = req.source {
        let assessment = load_assessment(ctx, source.assessment_id)?;
        if assessment.response_for(source.question_id).is_none() {
            return Err(ApiError::validation(format!(
                "Assessment '{}' has no response to question '{}'",
                source.assessment_id, source.question_id
            )));
        }
        ncr = ncr.with_source(source);
    }

    ctx.store().save_ncr(&ncr)?;
    log::info!("Raised {} non-conformity {} ({})", ncr.severity, ncr.id, ncr.title);
    Ok(ncr)
}

/// Get a non-conformity with its actions and summary
pub fn get_ncr(ctx: &ApiContext, id: Uuid) -> Result<NcrDetail, ApiError> {
    let ncr = load_ncr(ctx, id)?;
    let actions = ctx.store().actions_for_ncr(id)?;
    let summary = summarize_ncr(&ncr, &actions, ctx.now());
    Ok(NcrDetail {
        ncr,
        actions,
        summary,
    })
}

/// Summary of one non-conformity, served from the cache when fresh
pub fn ncr_summary(ctx: &ApiContext, id: Uuid) -> Result<NcrSummary, ApiError> {
    let ncr = load_ncr(ctx, id)?;
    let now = ctx.now();
    if let Some(cached) = ctx.cache().get(id)
        && is_fresh(&cached, ncr.status, now)
    {
        log::debug!("Summary cache hit for {id}");
        return Ok(cached);
    }

    let actions = ctx.store().actions_for_ncr(id)?;
    let summary = summarize_ncr(&ncr, &actions, now);
    ctx.cache().put(summary);
    Ok(summary)
}

/// Move a non-conformity through its lifecycle
///
/// Closing requires every corrective action to be VERIFIED.
pub fn transition_ncr(
    ctx: &ApiContext,
    id: Uuid,
    req: NcrTransitionRequest,
) -> Result<TransitionData<NonConformity, NcrStatus>, ApiError> {
    let mut ncr = load_ncr(ctx, id)?;
    let actions = ctx.store().actions_for_ncr(id)?;
    let previous = ncr_lifecycle::apply_transition(&mut ncr, req.status, &actions, ctx.now())
        .inspect_err(|e| log::warn!("Rejected transition of non-conformity {id}: {e}"))?;

    ctx.store().save_ncr(&ncr)?;
    ctx.cache().invalidate(id);
    log::info!("Non-conformity {id}: {previous} -> {}", ncr.status);
    Ok(TransitionData {
        previous_status: previous,
        entity: ncr,
    })
}

/// Delete a non-conformity and its corrective actions
pub fn delete_ncr(ctx: &ApiContext, id: Uuid) -> Result<DeletedData, ApiError> {
    let cascaded = ctx.store().actions_for_ncr(id)?.len();
    if !ctx.store().delete_ncr(id)? {
        return Err(ApiError::not_found(format!("Non-conformity '{id}' not found")));
    }
    ctx.cache().invalidate(id);
    log::info!("Deleted non-conformity {id} and {cascaded} corrective action(s)");
    Ok(DeletedData {
        id,
        cascaded_actions: Some(cascaded),
    })
}

// =============================================================================
// CORRECTIVE ACTIONS
// =============================================================================

fn load_action(ctx: &ApiContext, id: Uuid) -> Result<CorrectiveAction, ApiError> {
    ctx.store()
        .get_action(id)?
        .ok_or_else(|| ApiError::not_found(format!("Corrective action '{id}' not found")))
}

fn store_action(ctx: &ApiContext, action: &CorrectiveAction) -> Result<(), ApiError> {
    ctx.store().save_action(action)?;
    ctx.cache().invalidate(action.non_conformity_id);
    Ok(())
}

/// List corrective actions, newest last
pub fn list_actions(
    ctx: &ApiContext,
    filter: ActionFilter,
    page: PageRequest,
) -> Result<Page<CorrectiveAction>, ApiError> {
    let actions = match filter.ncr_id {
        Some(ncr_id) => ctx.store().actions_for_ncr(ncr_id)?,
        None => ctx.store().list_actions()?,
    };
    let actions: Vec<CorrectiveAction> = actions
        .into_iter()
        .filter(|a| filter.status.is_none_or(|s| a.status == s))
        .collect();
    Ok(page.apply(actions, ctx.config()))
}

/// Create a PENDING corrective action on an open non-conformity
pub fn create_action(
    ctx: &ApiContext,
    req: &CreateActionRequest,
) -> Result<CorrectiveAction, ApiError> {
    if req.description.trim().is_empty() {
        return Err(ApiError::validation("Corrective action description cannot be empty"));
    }

    let ncr = load_ncr(ctx, req.non_conformity_id)?;
    if ncr.status.is_terminal() {
        return Err(WorkflowError::TerminalState {
            entity: NcrStatus::ENTITY,
            state: ncr.status.to_string(),
        }
        .into());
    }

    let mut action = CorrectiveAction::new(
        ncr.id,
        req.description.trim().to_string(),
        req.priority,
        ctx.now(),
    );
    action.target_date = req.target_date;
    action.assigned_to_id = req.assigned_to_id.clone().filter(|a| !a.trim().is_empty());

    store_action(ctx, &action)?;
    log::info!("Created corrective action {} on non-conformity {}", action.id, ncr.id);
    Ok(action)
}

/// Get a corrective action
pub fn get_action(ctx: &ApiContext, id: Uuid) -> Result<CorrectiveAction, ApiError> {
    load_action(ctx, id)
}

/// Plain status change of a corrective action
pub fn update_action_status(
    ctx: &ApiContext,
    id: Uuid,
    req: ActionStatusRequest,
) -> Result<TransitionData<CorrectiveAction, ActionStatus>, ApiError> {
    let mut action = load_action(ctx, id)?;
    let previous = action_workflow::apply_transition(&mut action, req.status, ctx.now())
        .inspect_err(|e| log::warn!("Rejected status change of action {id}: {e}"))?;

    store_action(ctx, &action)?;
    log::info!("Corrective action {id}: {previous} -> {}", action.status);
    Ok(TransitionData {
        previous_status: previous,
        entity: action,
    })
}

/// Verify a completed corrective action
pub fn verify_action(
    ctx: &ApiContext,
    id: Uuid,
    req: &VerifyActionRequest,
) -> Result<CorrectiveAction, ApiError> {
    let mut action = load_action(ctx, id)?;
    action_workflow::verify(&mut action, &req.effectiveness_notes, &req.verified_by_id, ctx.now())
        .inspect_err(|e| log::warn!("Rejected verification of action {id}: {e}"))?;

    store_action(ctx, &action)?;
    log::info!("Corrective action {id} verified by {}", req.verified_by_id);
    Ok(action)
}

/// Assign a corrective action
pub fn assign_action(
    ctx: &ApiContext,
    id: Uuid,
    req: &AssignActionRequest,
) -> Result<CorrectiveAction, ApiError> {
    let mut action = load_action(ctx, id)?;
    action_workflow::assign(&mut action, &req.assignee_id, ctx.now())?;

    store_action(ctx, &action)?;
    log::info!("Corrective action {id} assigned to {}", req.assignee_id);
    Ok(action)
}

/// Delete a corrective action
pub fn delete_action(ctx: &ApiContext, id: Uuid) -> Result<DeletedData, ApiError> {
    let action = load_action(ctx, id)?;
    ctx.store().delete_action(id)?;
    ctx.cache().invalidate(action.non_conformity_id);
    log::info!("Deleted corrective action {id}");
    Ok(DeletedData {
        id,
        cascaded_actions: None,
    })
}

// =============================================================================
// REPORTS
// =============================================================================

/// Organization-wide dashboard, recomputed on every call
pub fn get_dashboard(ctx: &ApiContext) -> Result<DashboardSummary, ApiError> {
    let store = ctx.store();
    Ok(dashboard(
        &store.list_assessments()?,
        &store.list_ncrs()?,
        &store.list_actions()?,
        ctx.now(),
    ))
}

/// Monthly trend ending with the current month
pub fn get_trends(ctx: &ApiContext, months: Option<u32>) -> Result<TrendData, ApiError> {
    let months = months.unwrap_or_else(|| ctx.trend_months());
    if months == 0 || months > MAX_TREND_MONTHS {
        return Err(ApiError::validation(format!(
            "months must be between 1 and {MAX_TREND_MONTHS}"
        )));
    }

    let window = TrendWindow::ending_at(ctx.now(), months);
    let store = ctx.store();
    Ok(TrendData {
        months,
        points: monthly_trend(&store.list_assessments()?, &store.list_ncrs()?, &window),
    })
}
