//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// camp - virtualenvs and a shared wheelhouse for sibling Python packages
///
/// Finds every directory next to each other that has both setup.py and
/// requirements.txt, gives each its own virtualenv, builds all their
/// requirements once into a shared wheelhouse and installs from it.
#[derive(Parser, Debug)]
#[command(name = "camp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the workspace's .camp.toml
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Workspace root (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create virtualenvs, build wheels and install requirements
    Up(UpArgs),

    /// Remove virtualenvs and the wheelhouse
    Down,

    /// Show packages and what is installed in each virtualenv
    Show(ShowArgs),

    /// Check tools and summarize the workspace
    Status,

    /// Initialize a workspace-local .camp.toml config
    Init(InitArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Print shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the up command
#[derive(Parser, Debug)]
pub struct UpArgs {
    /// Recreate virtualenvs that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Stop at the first failed step
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Also list directories that are not packages, with the reason
    #[arg(long)]
    pub skipped: bool,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing .camp.toml
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., tools.pip)
        key: String,
        /// Value to set (comma-separated for lists)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Write to the workspace's .camp.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Output format for the show command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Table,
    /// JSON output
    Json,
    /// Package paths and freeze lines only
    Plain,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
