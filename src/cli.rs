//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::prompts::Mode;

/// braindump - turn a racing-thoughts brain dump into a structured action plan
#[derive(Debug, Parser)]
#[command(
    name = "bd",
    about = "ADHD-friendly brain dump organizer",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a brain dump once and print the plan (batch mode)
    Run {
        /// The brain dump text
        input: String,

        /// Presentation mode for the generated steps
        #[arg(short, long, value_enum, default_value = "robotic")]
        mode: Mode,

        /// Granularity level (1=minimal, 2=moderate, 3=detailed)
        #[arg(short, long, default_value_t = 2)]
        granularity: u8,

        /// Print the raw model response instead of the rendered plan
        #[arg(long)]
        raw: bool,
    },
}
