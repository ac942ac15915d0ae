//! Status command implementation

use std::path::Path;

use colored::Colorize;
use tracwiki_core::{LocalState, StateFile, check_local};
use tracwiki_fs::NormalizedPath;

use crate::error::Result;

/// Run the status command
///
/// Compares tracked files against their records. Never contacts the server.
pub fn run_status(path: &Path, json: bool) -> Result<()> {
    let root = NormalizedPath::new(path);
    let state = StateFile::load(&StateFile::path_in(&root))?;
    let report = check_local(&root, &state.store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &state.remote {
        Some(remote) => println!("{}: {}", "Wiki".dimmed(), remote.base_url().cyan()),
        None => println!(
            "{}: {} (use {} to set one)",
            "Wiki".dimmed(),
            "not configured".yellow(),
            "tracwiki config".cyan()
        ),
    }
    println!();

    if report.entries.is_empty() {
        println!(
            "  {} (use {} to fetch pages)",
            "No tracked pages".dimmed(),
            "tracwiki checkout".cyan()
        );
        return Ok(());
    }

    for entry in &report.entries {
        let label = match entry.state {
            LocalState::Unchanged => "unchanged".dimmed(),
            LocalState::Modified => "modified ".yellow(),
            LocalState::Missing => "missing  ".red(),
        };
        println!("  {} {} (v{})", label, entry.page, entry.version);
    }

    let modified = report.modified().count();
    if modified > 0 {
        println!();
        println!(
            "{} {} modified page(s); run {} to upload.",
            "=>".blue().bold(),
            modified,
            "tracwiki commit".cyan()
        );
    }
    Ok(())
}
