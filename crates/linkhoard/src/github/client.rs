//! GitHub REST client for the starred-repositories feed.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::http::{HttpHeaders, HttpRequest, HttpTransport, header_get};
use crate::retry::{RetryConfig, send_with_retry};

use super::error::GitHubError;
use super::types::{FetchResult, StarredRepo};

/// Public GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type that adds `starred_at` to each starred entry.
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";

/// Page size requested from the starred endpoint (GitHub's maximum).
pub const PER_PAGE: usize = 100;

/// Longest message kept from an error response body.
const MAX_ERROR_BODY: usize = 200;

/// Thin client over [`HttpTransport`] for the endpoints the sync needs.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: Option<String>,
    base_url: String,
    retry: RetryConfig,
}

impl GitHubClient {
    /// Create a client. Without a token requests are anonymous (60/hour).
    pub fn new(transport: Arc<dyn HttpTransport>, token: Option<String>) -> Self {
        Self {
            transport,
            token: token.filter(|t| !t.is_empty()),
            base_url: GITHUB_API_URL.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Point the client at a different API root (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// URL of one page of a user's stars, newest first.
    pub fn starred_url(&self, username: &str, page: u32) -> String {
        format!(
            "{}/users/{}/starred?per_page={}&page={}&sort=created&direction=desc",
            self.base_url, username, PER_PAGE, page
        )
    }

    /// Fetch one page of a user's starred repositories.
    ///
    /// When `etag` is given it is sent as `If-None-Match` and a 304 yields
    /// [`FetchResult::NotModified`].
    pub async fn fetch_starred_page(
        &self,
        username: &str,
        page: u32,
        etag: Option<&str>,
    ) -> Result<FetchResult<Vec<StarredRepo>>, GitHubError> {
        let mut request = HttpRequest::get(self.starred_url(username, page))
            .header("Accept", STAR_MEDIA_TYPE)
            .header("User-Agent", "linkhoard")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(etag) = etag {
            request = request.header("If-None-Match", etag);
        }

        let response = send_with_retry(self.transport.as_ref(), request, &self.retry).await?;

        match response.status {
            304 => Ok(FetchResult::NotModified),
            s if (200..300).contains(&s) => {
                let etag = response.header("etag").map(str::to_string);
                let data: Vec<StarredRepo> = serde_json::from_slice(&response.body)?;
                tracing::debug!(username, page, count = data.len(), "Fetched starred page");
                Ok(FetchResult::Fetched { data, etag })
            }
            404 => Err(GitHubError::NotFound {
                username: username.to_string(),
            }),
            403 | 429 if rate_limit_exhausted(&response.headers) => Err(GitHubError::RateLimited {
                reset_at: rate_limit_reset(&response.headers).unwrap_or_else(Utc::now),
            }),
            status => {
                let body = String::from_utf8_lossy(&response.body);
                let message: String = body.chars().take(MAX_ERROR_BODY).collect();
                Err(GitHubError::Upstream { status, message })
            }
        }
    }
}

/// True when `x-ratelimit-remaining` reports zero requests left.
fn rate_limit_exhausted(headers: &HttpHeaders) -> bool {
    header_get(headers, "x-ratelimit-remaining")
        .and_then(|v| v.trim().parse::<u64>().ok())
        == Some(0)
}

/// Reset time from `x-ratelimit-reset` (epoch seconds).
fn rate_limit_reset(headers: &HttpHeaders) -> Option<DateTime<Utc>> {
    let epoch = header_get(headers, "x-ratelimit-reset")?
        .trim()
        .parse::<i64>()
        .ok()?;
    DateTime::from_timestamp(epoch, 0)
}
