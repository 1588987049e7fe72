use linkhoard::sync::SyncProgress;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::Starting { username } => {
                tracing::info!(username = %username, "Syncing GitHub stars");
            }

            SyncProgress::NotModified { username } => {
                tracing::info!(username = %username, "Stars unchanged since last sync");
            }

            SyncProgress::FetchedPage {
                page,
                count,
                total_so_far,
            } => {
                tracing::debug!(page, count, total_so_far, "Fetched page");
            }

            SyncProgress::PageLimitReached { max_pages } => {
                tracing::warn!(max_pages, "Stopped at page limit");
            }

            SyncProgress::FetchComplete { total } => {
                tracing::info!(total, "Fetch complete");
            }

            SyncProgress::Partitioned { new, skipped } => {
                tracing::info!(new, skipped, "Compared with saved items");
            }

            SyncProgress::Persisted { added } => {
                tracing::info!(added, "Saved new stars");
            }

            SyncProgress::Linked { linked } => {
                tracing::debug!(linked, "Linked items to source list");
            }

            SyncProgress::Complete { result } => {
                tracing::info!(
                    added = result.added,
                    skipped = result.skipped,
                    total = result.total,
                    "Sync complete"
                );
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
