use std::io;
use thiserror::Error;

/// Application-wide error type for the collaborators around the classifier.
///
/// The classifier itself never fails; these errors come from configuration,
/// the message source, the state file and the Beeper transport.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (state file, subprocess spawn).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparseable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The message source (mcporter) failed or returned unusable output.
    #[error("Message source error: {0}")]
    Source(String),

    /// The Beeper MCP endpoint rejected a call or could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// No pending response exists for the requested chat.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Validation(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<which::Error> for AppError {
    fn from(err: which::Error) -> Self {
        AppError::Config(format!("Command not found: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            AppError::Transport(format!("HTTP error: {}", err))
        }
    }
}
