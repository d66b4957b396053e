//! `todo config` subcommands implementation

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration as TOML
    Show,
}

pub fn run(command: &ConfigCommands, path: &Path, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let note = if path.exists() { "" } else { " (not created yet)" };
            println!("{}{}", path.display(), note);
        }
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}
