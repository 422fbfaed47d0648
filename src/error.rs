// Error types for gh-focus.
// Covers configuration, GitHub API transport, and notification resolution errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FocusError {
    #[error("GitHub personal access token has not been set. Run `gh-focus set-token <TOKEN>`")]
    MissingToken,

    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("{url}; status: {status}")]
    Http { url: String, status: StatusCode },

    #[error("{url}; received unexpected status: {actual} (expected {expected})")]
    UnexpectedStatus {
        url: String,
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("Could not find ID in API URL '{0}'")]
    MalformedSubjectUrl(String),

    #[error("Not sure how to get URL for the subject of notification {0}")]
    UnknownSubjectType(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FocusError {
    /// Whether this error means the process is not configured. These are
    /// surfaced to the user and never retried automatically.
    pub fn is_configuration(&self) -> bool {
        matches!(self, FocusError::MissingToken)
    }
}

pub type Result<T> = std::result::Result<T, FocusError>;
