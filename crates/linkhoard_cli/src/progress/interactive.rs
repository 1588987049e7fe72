use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use linkhoard::sync::SyncProgress;

/// Interactive progress reporter using an indicatif spinner.
///
/// The spinner message tracks the current phase; the final line is left on
/// screen when the sync completes.
pub struct InteractiveReporter {
    bar: ProgressBar,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix(format!("{:12}", "stars"));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A reporter that draws nowhere.
    #[cfg(test)]
    pub fn hidden() -> Self {
        let bar = ProgressBar::with_draw_target(None, indicatif::ProgressDrawTarget::hidden());
        Self { bar }
    }

    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::Starting { username } => {
                self.bar.set_message(format!("Fetching stars for {}...", username));
            }
            SyncProgress::NotModified { username } => {
                self.bar
                    .finish_with_message(format!("{} has no new stars", username));
            }
            SyncProgress::FetchedPage {
                page, total_so_far, ..
            } => {
                self.bar
                    .set_message(format!("Page {}: {} stars fetched", page, total_so_far));
            }
            SyncProgress::PageLimitReached { max_pages } => {
                self.bar.println(format!(
                    "  Stopped after {} pages; older stars were not fetched",
                    max_pages
                ));
            }
            SyncProgress::FetchComplete { total } => {
                self.bar.set_message(format!("Fetched {} stars", total));
            }
            SyncProgress::Partitioned { new, skipped } => {
                self.bar
                    .set_message(format!("{} new, {} already saved", new, skipped));
            }
            SyncProgress::Persisted { added } => {
                self.bar.set_message(format!("Saved {} items", added));
            }
            SyncProgress::Linked { .. } => {}
            SyncProgress::Complete { result } => {
                self.bar.set_style(Self::done_style());
                self.bar.finish_with_message(format!(
                    "✓ {} added, {} skipped ({} total)",
                    result.added, result.skipped, result.total
                ));
            }
            _ => {}
        }
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn done_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {msg:.green}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
