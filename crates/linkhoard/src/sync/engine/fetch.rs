use crate::github::{FetchResult, GitHubClient, GitHubError, PER_PAGE, StarredRepo};

use super::super::progress::{ProgressCallback, SyncProgress, emit};
use super::super::types::MAX_PAGES;

/// Every star fetched in one run, plus the first page's ETag.
pub(super) struct FetchedStars {
    pub stars: Vec<StarredRepo>,
    pub etag: Option<String>,
}

/// Fetch all pages of a user's stars, newest first.
///
/// Only page 1 is conditional. Returns `None` when GitHub reports it
/// unchanged. Any page failure fails the whole fetch.
pub(super) async fn fetch_all_stars(
    client: &GitHubClient,
    username: &str,
    etag: Option<&str>,
    on_progress: Option<&ProgressCallback>,
) -> Result<Option<FetchedStars>, GitHubError> {
    let (mut stars, first_etag) = match client.fetch_starred_page(username, 1, etag).await? {
        FetchResult::NotModified => return Ok(None),
        FetchResult::Fetched { data, etag } => (data, etag),
    };
    emit(
        on_progress,
        SyncProgress::FetchedPage {
            page: 1,
            count: stars.len(),
            total_so_far: stars.len(),
        },
    );

    let mut page = 1;
    let mut has_more = stars.len() == PER_PAGE;
    while has_more {
        if page >= MAX_PAGES {
            tracing::warn!(username, max_pages = MAX_PAGES, "Stopped at page limit");
            emit(
                on_progress,
                SyncProgress::PageLimitReached {
                    max_pages: MAX_PAGES,
                },
            );
            break;
        }
        page += 1;

        let batch = match client.fetch_starred_page(username, page, None).await? {
            FetchResult::Fetched { data, .. } => data,
            FetchResult::NotModified => Vec::new(),
        };
        let count = batch.len();
        has_more = count == PER_PAGE;
        stars.extend(batch);
        emit(
            on_progress,
            SyncProgress::FetchedPage {
                page,
                count,
                total_so_far: stars.len(),
            },
        );
    }

    Ok(Some(FetchedStars {
        stars,
        etag: first_etag,
    }))
}
