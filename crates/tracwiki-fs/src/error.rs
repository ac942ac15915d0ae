//! Error types for tracwiki-fs

use std::path::PathBuf;

/// Result type for tracwiki-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tracwiki-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    NotUtf8 { path: PathBuf },

    #[error("Invalid page name {name:?}: {reason}")]
    InvalidPageName { name: String, reason: &'static str },

    #[error("Invalid content hash {value:?}: expected 32 hex digits")]
    InvalidHash { value: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
