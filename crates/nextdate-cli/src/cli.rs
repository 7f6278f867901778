//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nextdate_core::CalendarDate;

use crate::config::MAX_UPCOMING_COUNT;

/// nextdate - when does a recurring task come up next
#[derive(Debug, Parser)]
#[command(name = "nextdate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NEXTDATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the next occurrence of a repeat rule
    Next(RuleArgs),

    /// Print several upcoming occurrences of a repeat rule
    Upcoming {
        #[command(flatten)]
        rule: RuleArgs,

        /// Number of occurrences, 1 to 100 (default from config, 5 otherwise)
        #[arg(long, short = 'n', value_parser = parse_count)]
        count: Option<usize>,
    },

    /// Task record commands
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Rule and dates for `next` and `upcoming`.
#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Repeat rule: "d <1-400>", "w <1-7,...>", "m <days> [<months>]" or "y"
    #[arg(long, short)]
    pub repeat: String,

    /// Reference date (YYYYMMDD), defaults to today
    #[arg(long)]
    pub now: Option<CalendarDate>,

    /// Anchor date (YYYYMMDD), defaults to the reference date
    #[arg(long)]
    pub date: Option<CalendarDate>,
}

/// Task record actions. Task files hold JSON; `-` reads standard input.
#[derive(Debug, Subcommand)]
pub enum TaskAction {
    /// Print the date a new task would be stored with
    Schedule {
        /// Task JSON file
        file: PathBuf,

        /// Today's date (YYYYMMDD), defaults to the local date
        #[arg(long)]
        now: Option<CalendarDate>,
    },

    /// Mark a task done and print what happens to it
    Done {
        /// Task JSON file
        file: PathBuf,

        /// Today's date (YYYYMMDD), defaults to the local date
        #[arg(long)]
        now: Option<CalendarDate>,
    },

    /// Search a JSON list of tasks by text or DD.MM.YYYY date
    Search {
        /// Search text; empty lists every task
        query: String,

        /// Task list JSON file
        file: PathBuf,

        /// Maximum number of results (default from config, 50 otherwise)
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Dump,
    /// Check the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

fn parse_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_UPCOMING_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(format!("must be between 1 and {MAX_UPCOMING_COUNT}"))
    }
}

fn parse_limit(s: &str) -> Result<usize, String> {
    match s.parse().map_err(|e| format!("{e}"))? {
        0 => Err("must be at least 1".to_string()),
        limit => Ok(limit),
    }
}
