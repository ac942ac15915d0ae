//! Error types for tracwiki-core

use std::path::PathBuf;

/// Result type for tracwiki-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tracwiki-core operations
///
/// The per-page conditions (`PageNotFound` through `CommitRejected`) end the
/// operation on one page only; batch operations record them and move on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The state file exists but cannot be parsed
    #[error("State file {path} is corrupt: {message}")]
    CorruptConfig { path: PathBuf, message: String },

    /// Writing the state file failed; page records from this run are lost
    #[error("Failed to save state file {path}: {message}")]
    MetadataSave { path: PathBuf, message: String },

    /// No remote wiki has been configured for this working directory
    #[error("No configuration found, use \"config\".")]
    NotConfigured,

    /// The configured URL has no `scheme://` delimiter
    #[error("Invalid URL {url:?}: expected protocol://location")]
    InvalidUrl { url: String },

    /// The server has no page with this name
    #[error("No such page \"{name}\".")]
    PageNotFound { name: String },

    /// The local file differs from the last checked-out content
    #[error("\"{name}\" has local modifications.")]
    LocalModifiedConflict { name: String },

    /// Someone else committed since the last checkout
    #[error("Version error, can not commit \"{name}\".")]
    VersionConflict { name: String, local: u64, remote: u64 },

    /// Commit of a page that was never checked out
    #[error("\"{name}\" is not tracked, check it out first.")]
    UntrackedPage { name: String },

    /// Commit of a tracked page whose working file is gone
    #[error("\"{name}\" is tracked but {path} does not exist.")]
    LocalFileMissing { name: String, path: PathBuf },

    /// The recorded version cannot be advanced
    #[error("Version {version} of \"{name}\" cannot be advanced.")]
    VersionOverflow { name: String, version: u64 },

    /// The server answered `false` to the upload
    #[error("Server refused to store \"{name}\".")]
    CommitRejected { name: String },

    // Transparent wrappers for underlying crate errors
    /// Remote wiki error from tracwiki-rpc
    #[error(transparent)]
    Remote(#[from] tracwiki_rpc::Error),

    /// Filesystem error from tracwiki-fs
    #[error(transparent)]
    Fs(#[from] tracwiki_fs::Error),
}

impl Error {
    /// Whether the server could not be reached or answered garbage.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Error::Remote(e) if e.is_transport())
    }
}
