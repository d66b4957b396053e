//! xtask - Development tasks for todo-tracker

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for todo-tracker")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs,
}

fn main() -> Result<()> {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_cli_docs(),
    }
}

fn generate_cli_docs() -> Result<()> {
    let markdown = clap_markdown::help_markdown::<todo_tracker::cli::Cli>();

    let docs_dir = Path::new("docs/cli");
    fs::create_dir_all(docs_dir).context("Failed to create docs/cli directory")?;

    let output_path = docs_dir.join("reference.md");
    fs::write(&output_path, markdown).context("Failed to write CLI reference")?;

    println!("Generated CLI documentation at {}", output_path.display());
    Ok(())
}
