//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ArchiveArgs, ConfigArgs, JournalArgs, ScheduleArgs};

/// IFRS 16 - Lease accounting schedules
#[derive(Parser)]
#[command(name = "ifrs16")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "IFRS16_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute a lease schedule
    Schedule(ScheduleArgs),

    /// Show journal entries of a contract
    Journal(JournalArgs),

    /// Produce the archived version payload (JSON)
    Archive(ArchiveArgs),

    /// Inspect engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
