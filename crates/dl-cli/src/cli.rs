//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Day-column event layout.
///
/// Reads calendar events and computes where each one is drawn in a single
/// day column: vertical position from its time span, width and offset from
/// the events it overlaps.
#[derive(Debug, Parser)]
#[command(name = "dl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lay out events read from JSON (an array or JSON Lines).
    Layout {
        /// Input file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Only lay out events overlapping this day (e.g. 2025-01-15, today,
        /// tomorrow, "2 days ago", "in 3 days").
        #[arg(long)]
        date: Option<String>,

        /// Time of day at the top of the column (HH:MM).
        #[arg(long)]
        day_start: Option<String>,

        /// Minutes visible in the column.
        #[arg(long)]
        total_minutes: Option<i64>,

        /// Minimum slot size in minutes.
        #[arg(long)]
        step: Option<i64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON.
    Config,
}
