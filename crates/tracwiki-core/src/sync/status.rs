//! Offline status of tracked pages
//!
//! Compares each working file against its record without talking to the
//! server.

use serde::{Deserialize, Serialize};
use tracwiki_fs::checksum::compute_file_hash;
use tracwiki_fs::{NormalizedPath, page_path};

use crate::Result;
use crate::metadata::MetadataStore;

/// Local state of one tracked page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalState {
    /// File content matches the record
    Unchanged,
    /// File has been edited since the last checkout or commit
    Modified,
    /// File has been deleted
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub page: String,
    pub state: LocalState,
    pub version: u64,
}

/// Status of every tracked page, in the store's order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// Pages that `commit` would try to upload.
    pub fn modified(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries
            .iter()
            .filter(|e| e.state == LocalState::Modified)
    }

    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.state == LocalState::Unchanged)
    }
}

/// Check every tracked page under `root` against its record.
///
/// # Errors
///
/// Returns an error if a recorded name is not a valid page name or a file
/// exists but cannot be read.
pub fn check_local(root: &NormalizedPath, store: &MetadataStore) -> Result<StatusReport> {
    let mut report = StatusReport::default();

    for (name, record) in store.iter() {
        let path = page_path(root, name)?;
        let state = match compute_file_hash(&path.to_native())? {
            None => LocalState::Missing,
            Some(hash) if hash == record.hash => LocalState::Unchanged,
            Some(_) => LocalState::Modified,
        };
        report.entries.push(StatusEntry {
            page: name.to_string(),
            state,
            version: record.version,
        });
    }

    Ok(report)
}
