//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Non-success HTTP status from the API.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network or connection error.
    #[error("network error: {0}")]
    Transport(#[from] HttpError),

    /// Response body did not parse as the expected JSON shape.
    #[error("unexpected response body: {message}")]
    Json { message: String },
}

impl GitHubError {
    /// Create an API error from a status code and response body.
    #[inline]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a JSON shape error.
    #[inline]
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// The HTTP status code, if this error carries one.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that include multi-line details. This provides a concise message for
/// progress reporting and logging.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, GitHubError>;
