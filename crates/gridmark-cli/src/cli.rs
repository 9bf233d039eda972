//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gridmark - Display and mark the relation grid of a logic puzzle.
#[derive(Debug, Parser)]
#[command(name = "gridmark")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GRIDMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Puzzle to mark interactively when no command is given
    pub puzzle: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the block layout for a number of categories
    Layout(LayoutArgs),

    /// Render the empty grid of a puzzle
    Show(ShowArgs),

    /// Apply a file of relation events and render the result
    Replay(ReplayArgs),

    /// Mark a puzzle interactively
    Play(PlayArgs),

    /// Inspect or change settings
    Config(ConfigArgs),
}

/// Arguments for the layout command.
#[derive(Debug, Parser)]
pub struct LayoutArgs {
    /// Number of categories
    #[arg(allow_negative_numbers = true)]
    pub categories: i64,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Puzzle definition (TOML)
    pub puzzle: PathBuf,
}

/// Arguments for the replay command.
#[derive(Debug, Parser)]
pub struct ReplayArgs {
    /// Puzzle definition (TOML)
    pub puzzle: PathBuf,

    /// Events file, one `Category:Item verb Category:Item` per line
    pub events: PathBuf,

    /// Also print the chart pivoted on this category
    #[arg(long)]
    pub chart: Option<String>,

    /// Stop at the first contradiction
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the play command.
#[derive(Debug, Parser)]
pub struct PlayArgs {
    /// Puzzle definition (TOML)
    pub puzzle: PathBuf,
}

/// Arguments for settings management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show current settings
    Show,

    /// Set the value entered when picking a cell
    Verb {
        /// `is` or `not`
        #[arg(value_enum)]
        verb: VerbArg,
    },

    /// Set the log filter used when RUST_LOG is unset
    LogLevel {
        /// Filter directive, e.g. `info` or `gridmark_domain=debug`
        level: String,
    },
}

/// Grid verb argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VerbArg {
    /// Confirm the pair
    Is,
    /// Rule the pair out
    Not,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<VerbArg> for crate::config::GridVerb {
    fn from(verb: VerbArg) -> Self {
        match verb {
            VerbArg::Is => crate::config::GridVerb::Is,
            VerbArg::Not => crate::config::GridVerb::Not,
        }
    }
}
