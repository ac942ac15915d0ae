//! Error types for tracwiki-rpc

use thiserror::Error;

/// Result type alias for remote wiki operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the wiki server
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be reached or the connection broke mid-request
    #[error("wiki at {endpoint} is unavailable: {source}")]
    Unavailable {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success HTTP status and no RPC fault
    #[error("wiki at {endpoint} answered HTTP {status}")]
    Http { endpoint: String, status: u16 },

    /// The server answered, but not with a JSON-RPC response we understand
    #[error("unexpected response to {method}: {message}")]
    Decode { method: String, message: String },

    /// The server reported a JSON-RPC fault
    #[error("{method} failed: {message}")]
    Fault {
        method: String,
        code: Option<i64>,
        message: String,
    },

    /// The configured base URL cannot be used as an endpoint
    #[error("invalid endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },
}

impl Error {
    /// Whether this error means the server could not be talked to at all,
    /// as opposed to the server rejecting a well-formed request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Unavailable { .. } | Error::Http { .. } | Error::Decode { .. }
        )
    }
}
