//! Command implementations for tracwiki-cli

pub mod checkout;
pub mod commit;
pub mod config;
pub mod status;

pub use checkout::run_checkout;
pub use commit::run_commit;
pub use config::run_config;
pub use status::run_status;

use std::path::Path;

use colored::Colorize;
use tracwiki_core::{PageReport, PageStatus, StateFile, SyncEngine, SyncReport};
use tracwiki_fs::NormalizedPath;
use tracwiki_rpc::JsonRpcClient;

use crate::error::Result;

/// Loaded state plus an engine bound to the configured server.
pub(crate) struct Session {
    pub state_path: NormalizedPath,
    pub state: StateFile,
    pub engine: SyncEngine<JsonRpcClient>,
}

impl Session {
    /// Load the state file under `path` and connect to its server.
    pub fn open(path: &Path) -> Result<Self> {
        let root = NormalizedPath::new(path);
        let state_path = StateFile::path_in(&root);
        let state = StateFile::load(&state_path)?;
        let client = state.remote()?.connect()?;

        Ok(Self {
            state_path,
            state,
            engine: SyncEngine::new(root, client),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.state.save(&self.state_path)?;
        Ok(())
    }
}

/// Print one page outcome in the colour of its status.
pub(crate) fn print_entry(entry: &PageReport) {
    let line = match entry.status {
        PageStatus::Created | PageStatus::Updated | PageStatus::Committed => {
            entry.message.green()
        }
        PageStatus::UpToDate => entry.message.dimmed(),
        PageStatus::Conflict | PageStatus::Untracked => entry.message.yellow(),
        PageStatus::NotFound | PageStatus::Failed => entry.message.red(),
    };
    println!("{line}");
}

/// Print a batch report, either line by line or as one JSON document.
pub(crate) fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for entry in &report.entries {
        print_entry(entry);
    }

    let skipped = report.failures().count();
    if skipped > 0 {
        println!();
        println!(
            "{} {} of {} pages skipped.",
            "=>".yellow().bold(),
            skipped,
            report.entries.len()
        );
    }
    Ok(())
}
