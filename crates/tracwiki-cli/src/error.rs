//! Error types for tracwiki-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tracwiki-core
    #[error(transparent)]
    Core(#[from] tracwiki_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_message() {
        let error = CliError::from(tracwiki_core::Error::NotConfigured);
        assert_eq!(error.to_string(), "No configuration found, use \"config\".");
    }

    #[test]
    fn logging_error_names_the_cause() {
        let error = CliError::Logging("bad directive".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to initialize logging: bad directive"
        );
    }
}
