//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "todo")]
#[command(version, about = "Interactive task tracker with urgency tiers", long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    TODO_TRACKER_DEBUG=1     Enable debug logging to stderr"
)]
pub struct Cli {
    /// Config file (defaults to ~/.todo-tracker/config.toml)
    #[arg(long, global = true, env = "TODO_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Action log file, overriding the config
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Do not write the action log
    #[arg(long, global = true, conflicts_with = "log_file")]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        shell: Shell,
    },
}
