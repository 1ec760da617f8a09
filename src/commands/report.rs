//! Reference data and report commands

use isoaudit::api;
use isoaudit::output::Render;

use super::Session;

/// Print the standard's sections and questions
pub fn standard(session: &Session) -> anyhow::Result<()> {
    api::get_standard().render(session.mode);
    Ok(())
}

/// Print the assessment templates
pub fn templates(session: &Session) -> anyhow::Result<()> {
    api::list_templates().render(session.mode);
    Ok(())
}

/// Print the status workflows
pub fn workflow(session: &Session) -> anyhow::Result<()> {
    api::workflow().render(session.mode);
    Ok(())
}

/// Print the dashboard summary
pub fn dashboard(session: &Session) -> anyhow::Result<()> {
    api::get_dashboard(&session.ctx)?.render(session.mode);
    Ok(())
}

/// Print the monthly trend
pub fn trend(session: &Session, months: Option<u32>) -> anyhow::Result<()> {
    api::get_trends(&session.ctx, months)?.render(session.mode);
    Ok(())
}
