//! Ncr command - manage non-conformities

use isoaudit::api::{self, CreateNcrRequest, NcrFilter, NcrTransitionRequest};
use isoaudit::core::models::ResponseRef;
use isoaudit::output::Render;

use super::Session;
use crate::cli::NcrAction;

/// Handle ncr subcommands
pub fn ncr_cmd(session: &Session, action: NcrAction) -> anyhow::Result<()> {
    let ctx = &session.ctx;
    let mode = session.mode;

    match action {
        NcrAction::Create {
            title,
            description,
            severity,
            assessment,
            question,
        } => {
            let source = assessment.zip(question).map(|(assessment_id, question_id)| ResponseRef {
                assessment_id,
                question_id,
            });
            let req = CreateNcrRequest {
                title,
                description,
                severity,
                source,
            };
            api::create_ncr(ctx, &req)?.render(mode);
        },
        NcrAction::List {
            status,
            severity,
            page,
        } => {
            let filter = NcrFilter { status, severity };
            api::list_ncrs(ctx, filter, page.into())?.render(mode);
        },
        NcrAction::Show { id } => api::get_ncr(ctx, id)?.render(mode),
        NcrAction::Summary { id } => api::ncr_summary(ctx, id)?.render(mode),
        NcrAction::Transition { id, status } => {
            api::transition_ncr(ctx, id, NcrTransitionRequest { status })?.render(mode);
        },
        NcrAction::Delete { id } => api::delete_ncr(ctx, id)?.render(mode),
    }

    Ok(())
}
