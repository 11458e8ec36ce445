use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use u_allocate::models::{Shift, ShiftPreference, Urgency};

/// Task-to-worker allocation desk.
///
/// Works against a CSV roster (or the built-in demo roster) and writes the
/// roster back after commands that change it.
#[derive(Parser, Debug)]
#[command(name = "u-allocate", version, about = "Task-to-worker allocation desk")]
pub struct CliArgs {
    /// Path to a TOML config file (defaults are used when absent)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Roster CSV; the demo roster is used when not set
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ranks available individuals for a task.
    Match {
        /// Task description
        #[arg(long)]
        task: String,
        /// Category; classified from the description when omitted
        #[arg(long)]
        category: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        urgency: Urgency,
        /// any, morning or night
        #[arg(long, default_value = "any")]
        shift: ShiftPreference,
        /// Due date as "YYYY-MM-DD HH:MM"
        #[arg(long)]
        due: Option<String>,
        /// Assign the task to the top-ranked individual
        #[arg(long)]
        assign_top: bool,
        /// Write the match history CSV here
        #[arg(long)]
        history_out: Option<PathBuf>,
    },
    /// Adds an individual to the roster.
    Add {
        #[arg(long)]
        name: String,
        /// Comma-separated skills
        #[arg(long)]
        skills: String,
        /// Comma-separated ratings (1-5), in skill order
        #[arg(long, default_value = "")]
        proficiencies: String,
        /// morning or night
        #[arg(long, default_value = "morning")]
        shift: Shift,
        /// Add as not accepting work
        #[arg(long)]
        unavailable: bool,
    },
    /// Completes an individual's current task.
    Complete {
        #[arg(long)]
        id: String,
    },
    /// Releases overdue tasks and hands them to someone else.
    Reassign,
    /// Writes a CSV export.
    Export {
        kind: ExportKind,
        #[arg(long)]
        out: PathBuf,
    },
    /// Prints team KPIs.
    Kpi,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    /// Full roster (re-importable)
    Individuals,
    /// Per-individual performance
    Analytics,
}
