//! Progress reporting for stars syncs.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): an animated spinner using indicatif
//! - Logging mode (non-TTY): structured logging using tracing

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use linkhoard::sync::{ProgressCallback, SyncProgress};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive spinner for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a [`ProgressCallback`] for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| reporter.handle(event))
    }

    /// Finish the spinner (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkhoard::StarsSyncResult;

    fn all_events() -> Vec<SyncProgress> {
        vec![
            SyncProgress::Starting {
                username: "octocat".to_string(),
            },
            SyncProgress::FetchedPage {
                page: 1,
                count: 100,
                total_so_far: 100,
            },
            SyncProgress::PageLimitReached { max_pages: 50 },
            SyncProgress::FetchComplete { total: 100 },
            SyncProgress::Partitioned {
                new: 60,
                skipped: 40,
            },
            SyncProgress::Persisted { added: 60 },
            SyncProgress::Linked { linked: 60 },
            SyncProgress::NotModified {
                username: "octocat".to_string(),
            },
            SyncProgress::Complete {
                result: StarsSyncResult {
                    added: 60,
                    skipped: 40,
                    total: 100,
                },
            },
        ]
    }

    #[test]
    fn logging_reporter_handles_every_event() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        for event in all_events() {
            callback(event);
        }
        reporter.finish();
    }

    #[test]
    fn interactive_reporter_handles_every_event() {
        let reporter = ProgressReporter::Interactive(InteractiveReporter::hidden());
        for event in all_events() {
            reporter.handle(event);
        }
        reporter.finish();
    }
}
