//! Progress reporting for stars syncs.

use super::types::StarsSyncResult;

/// Progress events emitted during a stars sync.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Starting a sync for a GitHub user.
    Starting { username: String },

    /// GitHub answered 304: nothing changed since the last sync.
    NotModified { username: String },

    /// Fetched a page of stars.
    FetchedPage {
        /// Page number (1-indexed).
        page: u32,
        count: usize,
        /// Running total of stars fetched so far.
        total_so_far: usize,
    },

    /// Stopped paginating at the page cap with more pages remaining.
    PageLimitReached { max_pages: u32 },

    /// Finished fetching all pages.
    FetchComplete { total: usize },

    /// Split fetched stars into new and already-saved.
    Partitioned { new: usize, skipped: usize },

    /// New stars written to the item store.
    Persisted { added: usize },

    /// Inserted items linked to the GitHub source list.
    Linked { linked: usize },

    /// Sync finished.
    Complete { result: StarsSyncResult },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
