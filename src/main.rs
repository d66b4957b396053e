//! todo-tracker - Interactive task tracker

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use todo_tracker::cli::{self, Cli, Commands};
use todo_tracker::config::{self, Config};

fn main() -> Result<()> {
    if std::env::var("TODO_TRACKER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("todo_tracker=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    // Completions don't need a config
    if let Some(Commands::Completion { shell }) = &cli.command {
        generate(*shell, &mut Cli::command(), "todo", &mut std::io::stdout());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match &cli.command {
        Some(Commands::Config { command }) => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => config::config_path()?,
            };
            cli::config::run(command, &path, &config)
        }
        Some(Commands::Menu) | None => cli::run_menu(&cli, config),
        Some(Commands::Completion { .. }) => unreachable!(),
    }
}
