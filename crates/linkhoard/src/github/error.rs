//! GitHub API error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Failed to decode GitHub response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GitHub user not found: {username}")]
    NotFound { username: String },

    #[error("GitHub rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("GitHub API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid GitHub username: {0}")]
    InvalidUsername(String),
}

/// Check if a GitHubError indicates rate limiting.
pub fn is_rate_limited(e: &GitHubError) -> bool {
    matches!(e, GitHubError::RateLimited { .. })
}
