//! GitHub integration: the starred-repositories feed.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GITHUB_API_URL, GitHubClient, PER_PAGE, STAR_MEDIA_TYPE};
pub use error::GitHubError;
pub use types::{FetchResult, Owner, Repository, StarredRepo};

/// Longest username GitHub allows.
const MAX_USERNAME_LEN: usize = 39;

/// Whether `username` is a syntactically valid GitHub login.
///
/// Alphanumerics and single hyphens, not starting or ending with a hyphen,
/// at most 39 characters.
pub fn is_valid_username(username: &str) -> bool {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return false;
    }
    if username.starts_with('-') || username.ends_with('-') || username.contains("--") {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
}
