//! Stars sync result, errors and limits.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::github::GitHubError;
use crate::repository::RepositoryError;

/// Hard cap on pages fetched per sync (100 stars per page).
pub const MAX_PAGES: u32 = 50;

/// Counts reported by a stars sync.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarsSyncResult {
    /// Items inserted by this run.
    pub added: usize,
    /// Fetched stars the user already had (or that repeated within the fetch).
    pub skipped: usize,
    /// Stars fetched from GitHub.
    pub total: usize,
}

/// Errors that abort a stars sync.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("A GitHub stars sync is already running for user {user_id}")]
    AlreadyRunning { user_id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_result_is_all_zero() {
        let result = StarsSyncResult::default();
        assert_eq!((result.added, result.skipped, result.total), (0, 0, 0));
    }

    #[test]
    fn github_errors_pass_through_unchanged() {
        let err = SyncError::from(GitHubError::NotFound {
            username: "ghost".into(),
        });
        assert_eq!(err.to_string(), "GitHub user not found: ghost");
    }
}
