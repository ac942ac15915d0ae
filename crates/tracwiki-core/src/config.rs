//! Remote wiki settings

use tracwiki_rpc::{Credentials, JsonRpcClient};

use crate::{Error, Result};

const DELIMITER: &str = "://";

/// Where the wiki lives and who to log in as.
///
/// An empty `username` means anonymous access.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub protocol: String,
    pub location: String,
    pub username: String,
    pub password: String,
}

impl RemoteConfig {
    /// Split `url` into protocol and location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` has no `://` or either side is empty.
    pub fn parse(
        url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let (protocol, location) = url
            .split_once(DELIMITER)
            .filter(|(p, l)| !p.is_empty() && !l.is_empty())
            .ok_or_else(|| Error::InvalidUrl {
                url: url.to_string(),
            })?;

        Ok(Self {
            protocol: protocol.to_string(),
            location: location.trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> String {
        format!("{}{}{}", self.protocol, DELIMITER, self.location)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        if self.username.is_empty() {
            None
        } else {
            Some(Credentials::new(&self.username, &self.password))
        }
    }

    /// Open a JSON-RPC client for this wiki.
    pub fn connect(&self) -> Result<JsonRpcClient> {
        Ok(JsonRpcClient::connect(&self.base_url(), self.credentials())?)
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("protocol", &self.protocol)
            .field("location", &self.location)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
