//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Supported shells for completion generation.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// drillfile CLI - SQLite drill-design storage with undo/redo
#[derive(Parser, Debug)]
#[command(name = "dfl", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Drill file path (default: platform data dir)
    #[arg(long, global = true, env = "DFL_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new drill file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Marcher management
    Marcher {
        #[command(subcommand)]
        command: MarcherCommands,
    },

    /// Page management
    Page {
        #[command(subcommand)]
        command: PageCommands,
    },

    /// Move a marcher on a page
    Move {
        /// Marcher ID
        marcher_id: i64,

        /// Page ID
        page_id: i64,

        /// New X coordinate
        x: f64,

        /// New Y coordinate
        y: f64,

        /// Replace the placement's notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Undo the most recent action
    Undo,

    /// Redo the most recently undone action
    Redo,

    /// Undo/redo history inspection and configuration
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Section appearance overrides
    Appearance {
        #[command(subcommand)]
        command: AppearanceCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum MarcherCommands {
    /// Add marchers to the drill
    Add {
        /// Instrument section (e.g. "Trumpet")
        section: String,

        /// Drill number prefix (e.g. "T")
        prefix: String,

        /// First drill order to assign
        #[arg(long, default_value_t = 1)]
        order: i64,

        /// Number of marchers to add with consecutive orders
        #[arg(long, default_value_t = 1)]
        count: i64,

        /// Display name (single marcher only)
        #[arg(long)]
        name: Option<String>,

        /// Class year
        #[arg(long)]
        year: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all marchers
    List,

    /// Update a marcher's fields
    Update {
        /// Marcher ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        section: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove marchers (and their placements)
    Remove {
        /// Marcher IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// Add a page
    Add {
        /// Counts to reach this page (default: same as the last page)
        #[arg(long)]
        counts: Option<i64>,

        /// Mark as a subset of the previous page
        #[arg(long)]
        subset: bool,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all pages
    List,

    /// Update a page's fields
    Update {
        /// Page ID
        id: i64,

        #[arg(long)]
        counts: Option<i64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove pages (and their placements)
    Remove {
        /// Page IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Show every marcher's coordinate on a page
    Coords {
        /// Page ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Show pending undo/redo groups and the retention limit
    Status,

    /// Set the retention limit (distinct undo groups kept)
    Limit {
        /// New limit; 0 or negative disables retention
        limit: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppearanceCommands {
    /// Set (or replace) a section's colors
    Set {
        /// Section name
        section: String,

        /// Fill color (e.g. "rgba(255, 0, 0, 1)")
        fill: String,

        /// Outline color
        outline: String,
    },

    /// List all overrides
    List,
}
