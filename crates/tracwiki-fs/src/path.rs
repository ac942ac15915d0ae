//! Page-name to filesystem path mapping

use std::path::{Path, PathBuf};

use crate::{Error, Result, STATE_FILE_NAME};

/// A path normalized to use forward slashes internally.
///
/// Wiki page names use `/` as their hierarchy separator, so page files are
/// joined onto the working directory in this form and converted to a
/// platform-native path only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Check that a page name maps to a file strictly inside the working
/// directory.
///
/// Hierarchical names (`Project/Notes`) are allowed; anything that could
/// escape the directory or clobber the state document is not.
pub fn validate_page_name(name: &str) -> Result<()> {
    let invalid = |reason| Error::InvalidPageName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("name contains a NUL byte"));
    }
    if name.contains('\\') {
        return Err(invalid("name contains a backslash"));
    }
    if name.starts_with('/') || Path::new(name).is_absolute() {
        return Err(invalid("name is an absolute path"));
    }
    for segment in name.split('/') {
        match segment {
            "" => return Err(invalid("name contains an empty segment")),
            "." | ".." => return Err(invalid("name contains a relative segment")),
            _ => {}
        }
    }
    if name == STATE_FILE_NAME {
        return Err(invalid("name collides with the state file"));
    }
    Ok(())
}

/// Resolve the local file that mirrors `name` inside `root`.
pub fn page_path(root: &NormalizedPath, name: &str) -> Result<NormalizedPath> {
    validate_page_name(name)?;
    Ok(root.join(name))
}
