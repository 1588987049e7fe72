//! GitHub API response types.

use serde::{Deserialize, Serialize};

/// An entry from `GET /users/{username}/starred` with the star media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredRepo {
    /// RFC 3339 timestamp of when the user starred the repository.
    pub starred_at: String,
    pub repo: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Result of a conditional GET request using ETag caching.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    /// Server returned 304 Not Modified.
    NotModified,
    /// Server returned new data with an optional ETag for future requests.
    Fetched { data: T, etag: Option<String> },
}

impl<T> FetchResult<T> {
    /// Returns true if the result indicates not modified.
    #[inline]
    pub fn is_not_modified(&self) -> bool {
        matches!(self, FetchResult::NotModified)
    }
}
