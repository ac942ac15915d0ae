//! Config command implementation

use std::path::Path;

use colored::Colorize;
use tracwiki_core::{RemoteConfig, StateFile};
use tracwiki_fs::NormalizedPath;

use crate::error::Result;

/// Run the config command
///
/// Stores the server address and credentials in the state file, keeping any
/// page records already there.
pub fn run_config(path: &Path, url: &str, user: &str, pass: &str) -> Result<()> {
    let remote = RemoteConfig::parse(url, user, pass)?;

    let root = NormalizedPath::new(path);
    let state_path = StateFile::path_in(&root);
    let mut state = StateFile::load(&state_path)?;

    let base_url = remote.base_url();
    let anonymous = remote.username.is_empty();
    state.configure(remote);
    state.save(&state_path)?;

    tracing::debug!(path = %state_path, tracked = state.store.len(), "Configuration saved");

    if anonymous {
        println!("{} Configured {} (anonymous)", "OK".green().bold(), base_url.cyan());
    } else {
        println!(
            "{} Configured {} as {}",
            "OK".green().bold(),
            base_url.cyan(),
            user.bold()
        );
    }
    Ok(())
}
