//! Output formatting for human and JSON modes
//!
//! Every CLI result can be rendered either as human-readable text, with
//! statuses colored by their tone, or as pretty-printed JSON.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::api::{
    AssessmentDetail, DeletedData, LifecycleDefinition, NcrDetail, Page, TemplateItem,
    TransitionData, TrendData, WorkflowData,
};
use crate::core::models::{
    Assessment, CorrectiveAction, Lifecycle, NonConformity, Section, Severity, Tone,
};
use crate::core::services::{AssessmentCompliance, DashboardSummary, NcrSummary};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A result the CLI can print
pub trait Render: Serialize {
    /// Human-readable lines
    fn human(&self) -> Vec<String>;

    /// Format for `mode`
    fn format(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Human => self.human().join("\n"),
            OutputMode::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }

    /// Print to stdout
    fn render(&self, mode: OutputMode) {
        println!("{}", self.format(mode));
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// A successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl Render for OperationResult {
    fn human(&self) -> Vec<String> {
        vec![self.message.clone()]
    }
}

// =============================================================================
// FORMATTING HELPERS
// =============================================================================

/// Color `text` by tone
#[must_use]
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Neutral => text.normal(),
        Tone::Info => text.cyan(),
        Tone::Warning => text.yellow(),
        Tone::Success => text.green(),
        Tone::Danger => text.red(),
    }
}

/// A status, colored by its tone
#[must_use]
pub fn status<S: Lifecycle>(state: S) -> ColoredString {
    paint(&state.to_string(), state.tone())
}

fn severity(s: Severity) -> ColoredString {
    match s {
        Severity::Minor => paint("MINOR", Tone::Neutral),
        Severity::Major => paint("MAJOR", Tone::Warning),
        Severity::Critical => paint("CRITICAL", Tone::Danger).bold(),
    }
}

/// `87.5%`, or `n/a` when undefined
#[must_use]
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

fn pagination_footer<T>(page: &Page<T>) -> String {
    let p = &page.pagination;
    format!("Page {}/{} ({} total)", p.page, p.total_pages.max(1), p.total_items).dimmed().to_string()
}

// =============================================================================
// NON-CONFORMITIES
// =============================================================================

fn ncr_line(ncr: &NonConformity) -> String {
    format!("  {} [{}] [{}] {}", ncr.id, status(ncr.status), severity(ncr.severity), ncr.title)
}

impl Render for NonConformity {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", "Non-conformity".bold(), self.id),
            format!("  Title:    {}", self.title),
            format!("  Status:   {}", status(self.status)),
            format!("  Severity: {}", severity(self.severity)),
            format!("  Raised:   {}", self.created_at.format("%Y-%m-%d %H:%M")),
        ];
        if !self.description.is_empty() {
            lines.push(format!("  {}", self.description));
        }
        if let Some(closed) = self.closed_at {
            lines.push(format!("  Closed:   {}", closed.format("%Y-%m-%d %H:%M")));
        }
        if let Some(source) = self.source {
            lines.push(format!(
                "  Source:   assessment {} question {}",
                source.assessment_id, source.question_id
            ));
        }
        lines
    }
}

impl Render for Page<NonConformity> {
    fn human(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec!["No non-conformities found.".to_string()];
        }
        let mut lines = vec!["Non-conformities:".bold().to_string()];
        lines.extend(self.items.iter().map(ncr_line));
        lines.push(pagination_footer(self));
        lines
    }
}

impl Render for NcrSummary {
    fn human(&self) -> Vec<String> {
        let a = &self.actions;
        vec![
            format!("Summary for {} [{}]", self.ncr_id, status(self.status)),
            format!(
                "  Actions: {} total, {} pending, {} in progress, {} completed, {} verified",
                a.total(),
                a.pending,
                a.in_progress,
                a.completed,
                a.verified
            ),
            format!("  Overdue: {}", self.overdue_actions),
            format!(
                "  Can close: {}",
                if self.can_close { "yes".green() } else { "no".red() }
            ),
        ]
    }
}

impl Render for NcrDetail {
    fn human(&self) -> Vec<String> {
        let mut lines = self.ncr.human();
        lines.push(String::new());
        if self.actions.is_empty() {
            lines.push("  No corrective actions.".to_string());
        } else {
            lines.push("  Corrective actions:".to_string());
            lines.extend(self.actions.iter().map(action_line));
        }
        lines.push(String::new());
        lines.extend(self.summary.human());
        lines
    }
}

// =============================================================================
// CORRECTIVE ACTIONS
// =============================================================================

fn action_line(action: &CorrectiveAction) -> String {
    let assignee = action.assigned_to_id.as_deref().unwrap_or("unassigned");
    format!(
        "  {} [{}] {} ({}, {})",
        action.id,
        status(action.status),
        action.description,
        action.priority,
        assignee
    )
}

impl Render for CorrectiveAction {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", "Corrective action".bold(), self.id),
            format!("  Non-conformity: {}", self.non_conformity_id),
            format!("  Description:    {}", self.description),
            format!("  Status:         {}", status(self.status)),
            format!("  Priority:       {}", self.priority),
        ];
        if let Some(assignee) = &self.assigned_to_id {
            lines.push(format!("  Assigned to:    {assignee}"));
        }
        if let Some(target) = self.target_date {
            lines.push(format!("  Due:            {}", target.format("%Y-%m-%d")));
        }
        if let Some(done) = self.completed_date {
            lines.push(format!("  Completed:      {}", done.format("%Y-%m-%d %H:%M")));
        }
        if let Some(verified) = self.verified_date {
            lines.push(format!(
                "  Verified:       {} by {}",
                verified.format("%Y-%m-%d %H:%M"),
                self.verified_by_id.as_deref().unwrap_or("?")
            ));
        }
        if let Some(notes) = &self.effectiveness_notes {
            lines.push(format!("  Effectiveness:  {notes}"));
        }
        lines
    }
}

impl Render for Page<CorrectiveAction> {
    fn human(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec!["No corrective actions found.".to_string()];
        }
        let mut lines = vec!["Corrective actions:".bold().to_string()];
        lines.extend(self.items.iter().map(action_line));
        lines.push(pagination_footer(self));
        lines
    }
}

impl<E: Render, S: Lifecycle + Serialize> Render for TransitionData<E, S> {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![format!("Moved from {}", status(self.previous_status))];
        lines.extend(self.entity.human());
        lines
    }
}

// =============================================================================
// ASSESSMENTS
// =============================================================================

impl Render for Assessment {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} {}", "Assessment".bold(), self.id),
            format!("  Title:     {}", self.title),
            format!("  Status:    {}", status(self.status)),
            format!("  Lead:      {}", self.lead_auditor_id),
            format!("  Responses: {}", self.responses.len()),
        ];
        if let Some(template) = self.template_id {
            lines.push(format!("  Template:  {template}"));
        }
        if let Some(score) = self.overall_score {
            lines.push(format!("  Overall:   {}", percent(Some(score))));
        }
        lines
    }
}

impl Render for AssessmentDetail {
    fn human(&self) -> Vec<String> {
        let mut lines = self.assessment.human();
        lines.push(format!(
            "  Answered:  {}/{} questions, compliance {}",
            self.assessment.responses.iter().filter(|r| r.score.is_some()).count(),
            self.total_questions,
            percent(self.compliance)
        ));
        lines
    }
}

impl Render for Page<Assessment> {
    fn human(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec!["No assessments found.".to_string()];
        }
        let mut lines = vec!["Assessments:".bold().to_string()];
        lines.extend(self.items.iter().map(|a| {
            format!("  {} [{}] {} ({} responses)", a.id, status(a.status), a.title, a.responses.len())
        }));
        lines.push(pagination_footer(self));
        lines
    }
}

impl Render for AssessmentCompliance {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Compliance {} ({}/{} answered)",
            percent(self.overall).bold(),
            self.answered,
            self.total_questions
        )];
        for s in &self.sections {
            lines.push(format!(
                "  {:>2} {:<28} {:>7}  answered {:>3.0}% ({}/{}, {} n/a)",
                s.clause,
                s.title,
                percent(s.compliance),
                s.answered_percentage,
                s.answered,
                s.total_questions,
                s.not_applicable
            ));
        }
        lines
    }
}

// =============================================================================
// REFERENCE DATA
// =============================================================================

impl Render for Vec<Section> {
    fn human(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in self {
            lines.push(format!("{} {}", section.clause.bold(), section.title.bold()));
            for q in &section.questions {
                lines.push(format!("  {:<5} {}  ({})", q.reference, q.text, q.id));
            }
        }
        lines
    }
}

impl Render for Vec<TemplateItem> {
    fn human(&self) -> Vec<String> {
        self.iter()
            .map(|t| {
                format!(
                    "  {} {} ({} sections, {} questions)\n      {}",
                    t.template.id,
                    t.template.name.bold(),
                    t.section_ids.len(),
                    t.question_count,
                    t.template.description
                )
            })
            .collect()
    }
}

fn lifecycle_lines(def: &LifecycleDefinition) -> Vec<String> {
    let mut lines = vec![format!("{}:", def.entity).bold().to_string()];
    for s in &def.statuses {
        let mut next = s.allowed_next.join(", ");
        if !s.gated_next.is_empty() {
            if !next.is_empty() {
                next.push_str(", ");
            }
            next.push_str(&format!("{} (verify)", s.gated_next.join(", ")));
        }
        if s.terminal {
            next = "terminal".to_string();
        }
        lines.push(format!("  {:<12} -> {next}", paint(&s.value, s.tone)));
    }
    lines
}

impl Render for WorkflowData {
    fn human(&self) -> Vec<String> {
        let mut lines = lifecycle_lines(&self.corrective_action);
        lines.extend(lifecycle_lines(&self.non_conformity));
        lines.extend(lifecycle_lines(&self.assessment));
        lines
    }
}

// =============================================================================
// REPORTS
// =============================================================================

impl Render for DashboardSummary {
    fn human(&self) -> Vec<String> {
        let a = &self.assessments;
        let n = &self.ncrs;
        let s = &self.ncr_severity;
        let c = &self.actions;
        vec![
            "Dashboard".bold().to_string(),
            format!(
                "  Assessments: {} draft, {} in progress, {} completed, {} archived",
                a.draft, a.in_progress, a.completed, a.archived
            ),
            format!("  Average compliance: {}", percent(self.average_compliance)),
            format!(
                "  NCRs: {} open, {} in progress, {} resolved, {} closed",
                n.open, n.in_progress, n.resolved, n.closed
            ),
            format!(
                "  Severity: {} minor, {} major, {} critical ({} critical still open)",
                s.minor, s.major, s.critical, self.open_critical_ncrs
            ),
            format!(
                "  Actions: {} pending, {} in progress, {} completed, {} verified",
                c.pending, c.in_progress, c.completed, c.verified
            ),
            format!("  Overdue actions: {}", self.overdue_actions),
        ]
    }
}

impl Render for TrendData {
    fn human(&self) -> Vec<String> {
        let mut lines = vec![format!("Trend over {} month(s)", self.months).bold().to_string()];
        lines.push(format!(
            "  {:<8} {:>9} {:>11} {:>7} {:>7}",
            "month", "completed", "compliance", "opened", "closed"
        ));
        for p in &self.points {
            lines.push(format!(
                "  {:<8} {:>9} {:>11} {:>7} {:>7}",
                p.month.to_string(),
                p.assessments_completed,
                percent(p.average_compliance),
                p.ncrs_opened,
                p.ncrs_closed
            ));
        }
        lines
    }
}

impl Render for DeletedData {
    fn human(&self) -> Vec<String> {
        match self.cascaded_actions {
            Some(n) if n > 0 => vec![format!("Deleted {} and {n} corrective action(s)", self.id)],
            _ => vec![format!("Deleted {}", self.id)],
        }
    }
}
