//! Retry configuration for outbound HTTP calls.
//!
//! Only transport-level failures (connection resets, timeouts) are retried.
//! HTTP statuses are answers, not failures, and are surfaced to the caller.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};

/// Initial backoff before the first retry, in milliseconds.
pub const INITIAL_BACKOFF_MS: u64 = 500;
/// Upper bound on a single backoff, in milliseconds.
pub const MAX_BACKOFF_MS: u64 = 8_000;
/// Retries after the first attempt.
pub const MAX_RETRIES: usize = 3;

/// Configuration for retry operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Minimum delay between retries.
    pub min_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Maximum number of retry attempts.
    pub max_retries: usize,
    /// Whether to add jitter to delays.
    pub with_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_MS),
            max_retries: MAX_RETRIES,
            with_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom values.
    #[must_use]
    pub fn new(min_delay: Duration, max_delay: Duration, max_retries: usize) -> Self {
        Self {
            min_delay,
            max_delay,
            max_retries,
            with_jitter: true,
        }
    }

    /// A configuration that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, 0)
    }

    /// Set whether to use jitter.
    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.with_jitter = jitter;
        self
    }

    /// Build an exponential backoff strategy from this configuration.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        let mut builder = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries);

        if self.with_jitter {
            builder = builder.with_jitter();
        }

        builder
    }
}

/// Whether an HTTP error is worth another attempt.
pub fn is_transient(err: &HttpError) -> bool {
    matches!(err, HttpError::Transport(_) | HttpError::Timeout { .. })
}

/// Send a request, retrying transient transport failures with backoff.
pub async fn send_with_retry(
    transport: &dyn HttpTransport,
    request: HttpRequest,
    config: &RetryConfig,
) -> Result<HttpResponse, HttpError> {
    let url = request.url.clone();
    (|| async { transport.send(request.clone()).await })
        .retry(config.clone().into_backoff())
        .when(is_transient)
        .notify(|err, dur| {
            tracing::debug!(url = %url, "Request failed, retrying in {:?}: {}", dur, err);
        })
        .await
}
