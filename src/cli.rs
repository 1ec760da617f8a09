//! CLI definitions and entry point

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::commands::{self, Session};
use isoaudit::core::models::{ActionStatus, AssessmentStatus, NcrStatus, Priority, Severity};
use isoaudit::output::OutputMode;

/// isoaudit - ISO 9001 self-assessment and corrective-action tracking
#[derive(Parser, Debug)]
#[command(
    name = "isoaudit",
    version,
    about = "ISO 9001 self-assessment and corrective-action tracking",
    long_about = "Score assessments against the ISO 9001:2015 clauses, raise non-conformities\n\
                  and drive their corrective actions through verification."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write isoaudit.toml and create the data store
    Init {
        /// Overwrite an existing isoaudit.toml
        #[arg(short, long)]
        force: bool,
    },

    /// List the standard's sections and questions
    Standard,

    /// List the assessment templates
    Templates,

    /// Show the status workflows
    Workflow,

    /// Manage non-conformities
    Ncr {
        #[command(subcommand)]
        action: NcrAction,
    },

    /// Manage corrective actions
    Action {
        #[command(subcommand)]
        action: ActionAction,
    },

    /// Manage assessments
    Assessment {
        #[command(subcommand)]
        action: AssessmentAction,
    },

    /// Show the dashboard summary
    Dashboard,

    /// Show the monthly trend
    Trend {
        /// Number of months (defaults to reports.trend_months)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Serve the HTTP API
    Serve {
        /// Bind address (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show version
    Version,
}

/// Paging flags shared by list commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum NcrAction {
    /// Raise a non-conformity
    Create {
        /// Short title
        title: String,

        /// Full description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Severity: minor, major, critical
        #[arg(short, long, default_value = "minor")]
        severity: Severity,

        /// Assessment the NCR was raised from
        #[arg(long, requires = "question")]
        assessment: Option<Uuid>,

        /// Question the NCR was raised from
        #[arg(long, requires = "assessment")]
        question: Option<Uuid>,
    },

    /// List non-conformities
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<NcrStatus>,

        /// Filter by severity
        #[arg(long)]
        severity: Option<Severity>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a non-conformity with its actions
    Show {
        /// NCR ID
        id: Uuid,
    },

    /// Show the action summary of a non-conformity
    Summary {
        /// NCR ID
        id: Uuid,
    },

    /// Move a non-conformity to another status
    #[command(alias = "move")]
    Transition {
        /// NCR ID
        id: Uuid,

        /// Target status: open, in_progress, resolved, closed
        status: NcrStatus,
    },

    /// Delete a non-conformity and its actions
    Delete {
        /// NCR ID
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum ActionAction {
    /// Create a corrective action
    Create {
        /// Owning NCR ID
        ncr: Uuid,

        /// What must be done
        description: String,

        /// Priority: low, medium, high, critical
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        due: Option<DateTime<Utc>>,

        /// Assignee
        #[arg(short, long)]
        assign: Option<String>,
    },

    /// List corrective actions
    List {
        /// Only actions of this NCR
        #[arg(long)]
        ncr: Option<Uuid>,

        /// Filter by status
        #[arg(short, long)]
        status: Option<ActionStatus>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a corrective action
    Show {
        /// Action ID
        id: Uuid,
    },

    /// Change the status of an action
    Status {
        /// Action ID
        id: Uuid,

        /// Target status: pending, in_progress, completed
        status: ActionStatus,
    },

    /// Verify a completed action
    Verify {
        /// Action ID
        id: Uuid,

        /// Effectiveness notes
        #[arg(short, long)]
        notes: String,

        /// Verifier
        #[arg(short, long)]
        by: String,
    },

    /// Assign an action
    Assign {
        /// Action ID
        id: Uuid,

        /// Assignee
        assignee: String,
    },

    /// Delete an action
    Delete {
        /// Action ID
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssessmentAction {
    /// Create an assessment
    Create {
        /// Title
        title: String,

        /// Lead auditor
        #[arg(short, long)]
        lead: String,

        /// Template ID (see `isoaudit templates`)
        #[arg(short, long)]
        template: Option<Uuid>,

        /// Scope notes
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List assessments
    List {
        /// Filter by status
        #[arg(short, long)]
        status: Option<AssessmentStatus>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show an assessment
    Show {
        /// Assessment ID
        id: Uuid,
    },

    /// Score a question (0-5, or "na")
    Score {
        /// Assessment ID
        id: Uuid,

        /// Question ID (see `isoaudit standard`)
        question: Uuid,

        /// Score 0-5, or "na" when not applicable
        #[arg(value_parser = parse_score)]
        score: ScoreArg,

        /// Justification / evidence
        #[arg(short, long)]
        justification: Option<String>,
    },

    /// Show the per-section compliance breakdown
    Compliance {
        /// Assessment ID
        id: Uuid,
    },

    /// Complete an assessment
    Complete {
        /// Assessment ID
        id: Uuid,
    },

    /// Move an assessment to another status
    Transition {
        /// Assessment ID
        id: Uuid,

        /// Target status: draft, in_progress, completed, archived
        status: AssessmentStatus,
    },

    /// Delete an assessment
    Delete {
        /// Assessment ID
        id: Uuid,
    },
}

/// A score argument; `None` means not applicable
#[derive(Debug, Clone, Copy)]
pub struct ScoreArg(pub Option<u8>);

fn parse_score(s: &str) -> Result<ScoreArg, String> {
    match s.to_lowercase().as_str() {
        "na" | "n/a" | "-" => Ok(ScoreArg(None)),
        other => other
            .parse::<u8>()
            .map(|v| ScoreArg(Some(v)))
            .map_err(|_| format!("Invalid score: {s}. Use 0-5 or na")),
    }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(|| format!("Invalid date: {s}. Use YYYY-MM-DD"))
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("isoaudit v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'isoaudit --help' for usage");
            println!("Run 'isoaudit init' to get started");
        }
        return Ok(());
    };

    if let Command::Version = command {
        if output_mode == OutputMode::Json {
            println!("{}", serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }));
        } else {
            println!("isoaudit v{}", env!("CARGO_PKG_VERSION"));
        }
        return Ok(());
    }

    let session = Session::open(cli.data_dir, output_mode)?;

    match command {
        Command::Init { force } => commands::init(&session, force),
        Command::Standard => commands::standard(&session),
        Command::Templates => commands::templates(&session),
        Command::Workflow => commands::workflow(&session),
        Command::Ncr { action } => commands::ncr_cmd(&session, action),
        Command::Action { action } => commands::action_cmd(&session, action),
        Command::Assessment { action } => commands::assessment_cmd(&session, action),
        Command::Dashboard => commands::dashboard(&session),
        Command::Trend { months } => commands::trend(&session, months),
        Command::Serve { host, port } => commands::serve(&session, host, port),
        Command::Version => Ok(()),
    }
}
