use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{HttpError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

type Route = (HttpMethod, String);

/// Scripted transport for unit tests.
///
/// Responses are queued per method and URL and served in order; every request
/// is recorded for later inspection.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<Route, VecDeque<Result<HttpResponse, String>>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn enqueue(&self, method: HttpMethod, url: String, entry: Result<HttpResponse, String>) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, url))
            .or_default()
            .push_back(entry);
    }

    pub fn push_response(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        response: HttpResponse,
    ) {
        self.enqueue(method, url.into(), Ok(response));
    }

    /// Queue a connection-level failure.
    pub fn push_transport_error(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.enqueue(method, url.into(), Err(message.into()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let route = (request.method, request.url.clone());
        self.requests.lock().unwrap().push(request);

        let next = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(message)) => Err(HttpError::Transport(message)),
            None => Err(HttpError::NoMockResponse {
                method: route.0.as_str().to_string(),
                url: route.1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_queued_responses_in_order_then_errors() {
        let transport = MockTransport::new();
        let url = "https://example.com/api";
        for status in [500, 200] {
            transport.push_response(
                HttpMethod::Get,
                url,
                HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: Vec::new(),
                },
            );
        }

        let first = transport.send(HttpRequest::get(url)).await.unwrap();
        let second = transport.send(HttpRequest::get(url)).await.unwrap();
        assert_eq!((first.status, second.status), (500, 200));

        let err = transport.send(HttpRequest::get(url)).await.unwrap_err();
        assert!(matches!(err, HttpError::NoMockResponse { .. }));
        assert_eq!(transport.requests().len(), 3);
    }
}
