//! tracwiki CLI
//!
//! Checkout and commit wiki pages stored on a Trac server.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    execute_command(cli.command, dir)
}

fn execute_command(cmd: Commands, dir: PathBuf) -> Result<()> {
    match cmd {
        Commands::Config { url, user, pass } => commands::run_config(&dir, &url, &user, &pass),
        Commands::Checkout { page, json } => commands::run_checkout(&dir, page.as_deref(), json),
        Commands::Commit {
            page,
            message,
            minor,
            json,
        } => commands::run_commit(&dir, page.as_deref(), message.as_deref(), minor, json),
        Commands::Status { json } => commands::run_status(&dir, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tracwiki", &mut std::io::stdout());
            Ok(())
        }
    }
}
