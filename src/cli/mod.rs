//! CLI command implementations

pub mod config;
pub mod definition;
pub mod menu;
pub mod table;

pub use definition::{Cli, Commands};
pub use menu::MenuSession;

use anyhow::{Context, Result};
use std::io;

use crate::action_log::ActionLog;
use crate::config::Config;
use crate::task::TaskStore;

/// Command-line flags win over the config file.
pub fn resolve_action_log(cli: &Cli, config: &Config) -> ActionLog {
    if cli.no_log {
        return ActionLog::disabled();
    }
    match cli.log_file.clone().or_else(|| config.log_path()) {
        Some(path) => ActionLog::to_file(path),
        None => ActionLog::disabled(),
    }
}

pub fn open_store(log: ActionLog, config: &Config) -> TaskStore {
    let mut store = TaskStore::new(log);
    store.set_field_quoting(config.export.field_quoting);
    store
}

/// Run the interactive menu on stdin/stdout
pub fn run_menu(cli: &Cli, config: Config) -> Result<()> {
    let store = open_store(resolve_action_log(cli, &config), &config);
    let stdin = io::stdin();
    let mut session = MenuSession::new(store, config, stdin.lock(), io::stdout());
    session.run().context("Console I/O failed")
}
