//! Assessment command - create, score and complete assessments

use isoaudit::api::{self, AssessmentFilter, CreateAssessmentRequest, RecordResponseRequest};
use isoaudit::output::Render;

use super::Session;
use crate::cli::AssessmentAction;

/// Handle assessment subcommands
pub fn assessment_cmd(session: &Session, action: AssessmentAction) -> anyhow::Result<()> {
    let ctx = &session.ctx;
    let mode = session.mode;

    match action {
        AssessmentAction::Create {
            title,
            lead,
            template,
            description,
        } => {
            let req = CreateAssessmentRequest {
                title,
                description,
                template_id: template,
                lead_auditor_id: lead,
            };
            api::create_assessment(ctx, &req)?.render(mode);
        },
        AssessmentAction::List { status, page } => {
            api::list_assessments(ctx, AssessmentFilter { status }, page.into())?.render(mode);
        },
        AssessmentAction::Show { id } => api::get_assessment(ctx, id)?.render(mode),
        AssessmentAction::Score {
            id,
            question,
            score,
            justification,
        } => {
            let req = RecordResponseRequest {
                question_id: question,
                score: score.0,
                justification,
            };
            api::record_response(ctx, id, &req)?;
            api::get_assessment(ctx, id)?.render(mode);
        },
        AssessmentAction::Compliance { id } => api::assessment_compliance(ctx, id)?.render(mode),
        AssessmentAction::Complete { id } => api::complete_assessment(ctx, id)?.render(mode),
        AssessmentAction::Transition { id, status } => {
            api::transition_assessment(ctx, id, status)?.render(mode);
        },
        AssessmentAction::Delete { id } => api::delete_assessment(ctx, id)?.render(mode),
    }

    Ok(())
}
