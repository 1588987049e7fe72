//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkhoard::connect_and_migrate;
use linkhoard::github::GitHubClient;
use linkhoard::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use linkhoard::ingest::Ingestor;
use linkhoard::retry::RetryConfig;
use linkhoard::services::{
    Enricher, MetadataFetcher, PageMetadata, ServiceError, Tweet, TweetFetcher, TweetUser,
};
use sea_orm::DatabaseConnection;
use tokio::sync::Barrier;

/// Create an in-memory SQLite database with migrations applied.
pub async fn setup_test_db() -> Arc<DatabaseConnection> {
    let db = connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Arc::new(db)
}

// ─── Page metadata ───────────────────────────────────────────────────────────

/// Serves canned titles; unknown URLs fail like a network error.
#[derive(Default)]
pub struct FakeMetadata {
    pages: HashMap<String, PageMetadata>,
    barrier: Option<Arc<Barrier>>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, url: &str, title: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            PageMetadata {
                title: Some(title.to_string()),
                description: Some(format!("About {title}")),
                image: None,
            },
        );
        self
    }

    /// Make every fetch wait until `barrier` is full.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

#[async_trait]
impl MetadataFetcher for FakeMetadata {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ServiceError> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ServiceError::Http(HttpError::Transport(format!("connect {url}"))))
    }
}

// ─── Tweets ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeTweets {
    tweets: HashMap<String, Tweet>,
}

impl FakeTweets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tweet(mut self, id: &str, name: &str, screen_name: &str, text: &str) -> Self {
        self.tweets.insert(
            id.to_string(),
            Tweet {
                text: text.to_string(),
                user: TweetUser {
                    name: name.to_string(),
                    screen_name: screen_name.to_string(),
                },
            },
        );
        self
    }
}

#[async_trait]
impl TweetFetcher for FakeTweets {
    async fn fetch_tweet(&self, id: &str) -> Result<Tweet, ServiceError> {
        self.tweets
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::Status {
                status: 404,
                url: format!("tweet {id}"),
            })
    }
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

pub struct FakeEnricher {
    pub fail: bool,
}

#[async_trait]
impl Enricher for FakeEnricher {
    async fn enrich(&self, author: &str, text: &str) -> Result<String, ServiceError> {
        if self.fail {
            return Err(ServiceError::Status {
                status: 529,
                url: "enricher".to_string(),
            });
        }
        Ok(format!("{author} wrote: {text}"))
    }
}

pub fn ingestor(
    db: &Arc<DatabaseConnection>,
    metadata: FakeMetadata,
    tweets: FakeTweets,
) -> Ingestor {
    Ingestor::new(Arc::clone(db), Arc::new(metadata), Arc::new(tweets))
}

// ─── GitHub ──────────────────────────────────────────────────────────────────

/// Scripted HTTP transport: responses are queued per URL.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Scripted>>,
}

#[derive(Default)]
struct Scripted {
    routes: HashMap<String, VecDeque<HttpResponse>>,
    requests: Vec<HttpRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: impl Into<String>, response: HttpResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .routes
            .entry(url.into())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut inner = self.inner.lock().unwrap();
        let url = request.url.clone();
        inner.requests.push(request);
        inner
            .routes
            .get_mut(&url)
            .and_then(VecDeque::pop_front)
            .ok_or(HttpError::NoMockResponse {
                method: "GET".to_string(),
                url,
            })
    }
}

pub fn github_client(transport: &ScriptedTransport) -> GitHubClient {
    GitHubClient::new(Arc::new(transport.clone()), Some("ghp_test".to_string()))
        .with_retry(RetryConfig::none())
}

pub fn response(status: u16, headers: &[(&str, &str)], body: Vec<u8>) -> HttpResponse {
    HttpResponse {
        status,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body,
    }
}

/// A star API entry for `owner/name`.
pub fn star_json(owner: &str, name: &str, starred_at: &str) -> serde_json::Value {
    serde_json::json!({
        "starred_at": starred_at,
        "repo": {
            "id": 1,
            "name": name,
            "full_name": format!("{owner}/{name}"),
            "html_url": format!("https://github.com/{owner}/{name}"),
            "description": format!("{name} description"),
            "language": "Rust",
            "stargazers_count": 42,
            "topics": ["cli"],
            "owner": {"login": owner, "avatar_url": format!("https://avatars.example/{owner}")}
        }
    })
}

/// A page of `count` stars named `{prefix}-{n}`.
pub fn star_page(prefix: &str, count: usize) -> Vec<u8> {
    let entries: Vec<serde_json::Value> = (0..count)
        .map(|i| star_json("owner", &format!("{prefix}-{i}"), "2024-01-01T00:00:00Z"))
        .collect();
    serde_json::to_vec(&entries).unwrap()
}
