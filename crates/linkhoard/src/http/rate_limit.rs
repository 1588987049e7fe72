use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use super::{HttpError, HttpRequest, HttpResponse, HttpTransport};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Outbound requests per second when nothing is configured.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Waits on a shared governor quota before every request.
///
/// Clones share the quota, so the scraper, the tweet fetcher and the GitHub
/// client can all sit behind one limiter.
#[derive(Clone)]
pub struct RateLimitedTransport {
    inner: Arc<dyn HttpTransport>,
    limiter: Arc<DirectLimiter>,
}

impl RateLimitedTransport {
    /// Allow at most `requests_per_second` through; zero is treated as one.
    pub fn new(inner: Arc<dyn HttpTransport>, requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rps))),
        }
    }
}

#[async_trait]
impl HttpTransport for RateLimitedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.limiter.until_ready().await;
        self.inner.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockTransport};

    #[tokio::test]
    async fn forwards_to_inner_transport() {
        let mock = MockTransport::new();
        mock.push_response(
            HttpMethod::Get,
            "https://example.com",
            HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: Vec::new(),
            },
        );

        let transport = RateLimitedTransport::new(Arc::new(mock.clone()), 0);
        let resp = transport
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status, 204);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_one_quota() {
        let mock = MockTransport::new();
        for _ in 0..3 {
            mock.push_response(
                HttpMethod::Get,
                "https://example.com",
                HttpResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: Vec::new(),
                },
            );
        }

        let a = RateLimitedTransport::new(Arc::new(mock.clone()), 1);
        let b = a.clone();
        a.send(HttpRequest::get("https://example.com")).await.unwrap();

        let started = tokio::time::Instant::now();
        b.send(HttpRequest::get("https://example.com")).await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(500));
    }
}
