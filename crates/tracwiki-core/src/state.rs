//! The `.trac_config` state file
//!
//! One JSON document per working directory holds the remote settings and the
//! page records:
//!
//! ```json
//! {
//!   "protocol": "https",
//!   "location": "trac.example.org/project",
//!   "username": "alice",
//!   "password": "secret",
//!   "info": { "WikiStart": [3, "5eb63bbbe01eeed093cb22bb8f5acdc3"] }
//! }
//! ```
//!
//! The file is read under a shared lock and replaced atomically under an
//! exclusive one.

use serde::{Deserialize, Serialize};
use tracwiki_fs::{NormalizedPath, STATE_FILE_NAME, io};

use crate::config::RemoteConfig;
use crate::metadata::MetadataStore;
use crate::{Error, Result};

/// On-disk layout. Field order here is the order written.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default)]
    info: MetadataStore,
}

/// Remote settings plus page records, loaded once per command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateFile {
    pub remote: Option<RemoteConfig>,
    pub store: MetadataStore,
}

impl StateFile {
    /// Location of the state file inside `root`.
    pub fn path_in(root: &NormalizedPath) -> NormalizedPath {
        root.join(STATE_FILE_NAME)
    }

    /// Load the state file, or an empty state if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptConfig`] if the file exists but is not a valid
    /// state document.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = match io::read_locked(path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!(path = %path, "No state file, starting empty");
                return Ok(Self::default());
            }
            Err(tracwiki_fs::Error::NotUtf8 { path }) => {
                return Err(Error::CorruptConfig {
                    path,
                    message: "not valid UTF-8".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let document: Document =
            serde_json::from_str(&content).map_err(|e| Error::CorruptConfig {
                path: path.to_native(),
                message: e.to_string(),
            })?;

        let remote = match (document.protocol, document.location) {
            (Some(protocol), Some(location)) => Some(RemoteConfig {
                protocol,
                location,
                username: document.username.unwrap_or_default(),
                password: document.password.unwrap_or_default(),
            }),
            _ => None,
        };

        tracing::debug!(path = %path, pages = document.info.len(), "Loaded state file");

        Ok(Self {
            remote,
            store: document.info,
        })
    }

    /// Write the state file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataSave`] on any failure; callers must treat it as
    /// fatal.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        let content = self.to_json().map_err(|e| Error::MetadataSave {
            path: path.to_native(),
            message: e.to_string(),
        })?;

        io::write_text(path, &content).map_err(|e| Error::MetadataSave {
            path: path.to_native(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path, pages = self.store.len(), "Saved state file");
        Ok(())
    }

    /// The configured remote.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] before `config` has been run.
    pub fn remote(&self) -> Result<&RemoteConfig> {
        self.remote.as_ref().ok_or(Error::NotConfigured)
    }

    /// Replace the remote settings, keeping all page records.
    pub fn configure(&mut self, remote: RemoteConfig) {
        self.remote = Some(remote);
    }

    /// Pretty-printed document text, newline terminated.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let document = Document {
            protocol: self.remote.as_ref().map(|r| r.protocol.clone()),
            location: self.remote.as_ref().map(|r| r.location.clone()),
            username: self.remote.as_ref().map(|r| r.username.clone()),
            password: self.remote.as_ref().map(|r| r.password.clone()),
            info: self.store.clone(),
        };
        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');
        Ok(content)
    }
}
