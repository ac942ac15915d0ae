//! Outcome types for sync operations

use serde::{Deserialize, Serialize};

use crate::Error;

/// Result of checking out one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The page was not tracked; its file and record were created
    Created { version: u64 },
    /// New remote content was written over an unmodified local copy
    Updated { version: u64 },
    /// Local, recorded and remote content are identical
    UpToDate,
}

/// Result of committing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Local edits were uploaded; `version` is the new recorded version
    Committed { version: u64 },
    /// The local file matches the record; nothing to upload
    UpToDate,
}

/// What happened to one page in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Created,
    Updated,
    Committed,
    UpToDate,
    /// Refused because of a local or remote conflict
    Conflict,
    NotFound,
    Untracked,
    Failed,
}

impl PageStatus {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            PageStatus::Conflict | PageStatus::NotFound | PageStatus::Untracked | PageStatus::Failed
        )
    }
}

/// One line of a [`SyncReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    pub page: String,
    pub status: PageStatus,
    /// Human-readable description, as printed by the CLI
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl PageReport {
    pub fn from_checkout(page: &str, outcome: CheckoutOutcome) -> Self {
        let (status, version) = match outcome {
            CheckoutOutcome::Created { version } => (PageStatus::Created, Some(version)),
            CheckoutOutcome::Updated { version } => (PageStatus::Updated, Some(version)),
            CheckoutOutcome::UpToDate => (PageStatus::UpToDate, None),
        };
        let message = match status {
            PageStatus::UpToDate => format!("\"{page}\" is up to date."),
            _ => format!("Updated \"{page}\"."),
        };
        Self {
            page: page.to_string(),
            status,
            message,
            version,
        }
    }

    pub fn from_commit(page: &str, outcome: CommitOutcome) -> Self {
        match outcome {
            CommitOutcome::Committed { version } => Self {
                page: page.to_string(),
                status: PageStatus::Committed,
                message: format!("Committed \"{page}\"."),
                version: Some(version),
            },
            CommitOutcome::UpToDate => Self {
                page: page.to_string(),
                status: PageStatus::UpToDate,
                message: format!("\"{page}\" is up to date."),
                version: None,
            },
        }
    }

    pub fn from_error(page: &str, error: &Error) -> Self {
        let status = match error {
            Error::LocalModifiedConflict { .. } | Error::VersionConflict { .. } => {
                PageStatus::Conflict
            }
            Error::PageNotFound { .. } => PageStatus::NotFound,
            Error::UntrackedPage { .. } => PageStatus::Untracked,
            _ => PageStatus::Failed,
        };
        let message = match error {
            Error::Remote(_) | Error::Fs(_) => format!("\"{page}\": {error}"),
            _ => error.to_string(),
        };
        Self {
            page: page.to_string(),
            status,
            message,
            version: None,
        }
    }
}

/// Per-page outcomes of a batch checkout or commit, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub entries: Vec<PageReport>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PageReport) {
        self.entries.push(entry);
    }

    /// Entries whose page was not synchronized.
    pub fn failures(&self) -> impl Iterator<Item = &PageReport> {
        self.entries.iter().filter(|e| e.status.is_failure())
    }

    /// Number of pages whose file or record changed.
    pub fn changed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.status,
                    PageStatus::Created | PageStatus::Updated | PageStatus::Committed
                )
            })
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn get(&self, page: &str) -> Option<&PageReport> {
        self.entries.iter().find(|e| e.page == page)
    }
}
