//! Action command - manage corrective actions

use isoaudit::api::{
    self, ActionFilter, ActionStatusRequest, AssignActionRequest, CreateActionRequest,
    VerifyActionRequest,
};
use isoaudit::output::Render;

use super::Session;
use crate::cli::ActionAction;

/// Handle action subcommands
pub fn action_cmd(session: &Session, action: ActionAction) -> anyhow::Result<()> {
    let ctx = &session.ctx;
    let mode = session.mode;

    match action {
        ActionAction::Create {
            ncr,
            description,
            priority,
            due,
            assign,
        } => {
            let req = CreateActionRequest {
                non_conformity_id: ncr,
                description,
                priority,
                target_date: due,
                assigned_to_id: assign,
            };
            api::create_action(ctx, &req)?.render(mode);
        },
        ActionAction::List { ncr, status, page } => {
            let filter = ActionFilter {
                status,
                ncr_id: ncr,
            };
            api::list_actions(ctx, filter, page.into())?.render(mode);
        },
        ActionAction::Show { id } => api::get_action(ctx, id)?.render(mode),
        ActionAction::Status { id, status } => {
            api::update_action_status(ctx, id, ActionStatusRequest { status })?.render(mode);
        },
        ActionAction::Verify { id, notes, by } => {
            let req = VerifyActionRequest {
                effectiveness_notes: notes,
                verified_by_id: by,
            };
            api::verify_action(ctx, id, &req)?.render(mode);
        },
        ActionAction::Assign { id, assignee } => {
            let req = AssignActionRequest {
                assignee_id: assignee,
            };
            api::assign_action(ctx, id, &req)?.render(mode);
        },
        ActionAction::Delete { id } => api::delete_action(ctx, id)?.render(mode),
    }

    Ok(())
}
