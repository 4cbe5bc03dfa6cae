use crate::types::{KindArg, OutputFormat, PeriodArg, PriorityArg, SortArg};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studyflow")]
#[command(about = "Track study assignments, focus sessions, and productivity", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to STUDYFLOW_PATH or the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Act as this user instead of the configured one
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Act with premium capabilities
    #[arg(long, global = true)]
    pub premium: bool,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage assignments
    Assignment {
        #[command(subcommand)]
        command: AssignmentCommand,
    },

    /// Run and inspect focus sessions
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Generate a prioritized study plan from outstanding assignments
    Plan,

    /// Productivity analytics over past sessions
    Stats {
        #[arg(long, default_value = "week")]
        period: PeriodArg,
    },
}

#[derive(Subcommand)]
pub enum AssignmentCommand {
    /// Add an assignment
    Add {
        title: String,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        priority: Option<PriorityArg>,

        /// Estimated effort in minutes
        #[arg(long)]
        estimated: Option<u32>,

        #[arg(long)]
        course: Option<String>,
    },

    /// List assignments
    List {
        /// Only completed (true) or only outstanding (false)
        #[arg(long)]
        completed: Option<bool>,

        #[arg(long, default_value = "due-date")]
        sort: SortArg,
    },

    /// Update fields of an assignment
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        priority: Option<PriorityArg>,

        /// Estimated effort in minutes
        #[arg(long)]
        estimated: Option<u32>,

        #[arg(long)]
        course: Option<String>,

        #[arg(long)]
        completed: Option<bool>,
    },

    /// Mark an assignment completed
    Done { id: String },

    /// Delete an assignment
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Start a focus session
    Start {
        /// Assignment to attribute the session to
        #[arg(long)]
        assignment: Option<String>,

        /// Session length in minutes (premium)
        #[arg(long)]
        duration: Option<u32>,

        #[arg(long, default_value = "focus")]
        kind: KindArg,
    },

    /// End a session
    End {
        id: String,

        /// Record the session as not completed
        #[arg(long)]
        incomplete: bool,

        /// Record the session as interrupted
        #[arg(long)]
        interrupted: bool,
    },

    /// Show the currently running session
    Active,

    /// List past sessions
    History {
        /// Earliest start date to include (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        since: Option<String>,

        /// Latest start date to include (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        until: Option<String>,

        /// Only sessions attributed to this assignment
        #[arg(long)]
        assignment: Option<String>,

        /// Keep only the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,
    },
}
