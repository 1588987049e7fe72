//! Searchable-context generation for short posts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{HttpRequest, HttpTransport};

use super::ServiceError;

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_INPUT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str = r#"You write search context for saved social media posts.
Reply with one short paragraph naming the topic, the people, projects and products mentioned, and what the post is about.
Do not add opinions or commentary."#;

/// Produces searchable context for a post.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, author: &str, text: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// [`Enricher`] backed by the Anthropic messages API.
#[derive(Clone)]
pub struct ClaudeEnricher {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    model: String,
}

impl ClaudeEnricher {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: String) -> Self {
        Self {
            transport,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Enricher for ClaudeEnricher {
    async fn enrich(&self, author: &str, text: &str) -> Result<String, ServiceError> {
        let text: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let body = MessageRequest {
            model: &self.model,
            max_tokens: 300,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: format!("Author: {author}\n\nPost:\n{text}"),
            }],
        };

        let request = HttpRequest::post(CLAUDE_API_URL)
            .header("x-api-key", self.api_key.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)?;

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ServiceError::Status {
                status: response.status,
                url: CLAUDE_API_URL.to_string(),
            });
        }

        let message: MessageResponse = serde_json::from_slice(&response.body)?;
        let context = message
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        let context = context.trim();
        if context.is_empty() {
            return Err(ServiceError::Decode("enricher returned no text".to_string()));
        }
        Ok(context.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse, MockTransport, header_get};

    #[tokio::test]
    async fn joins_text_blocks() {
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Post,
            CLAUDE_API_URL,
            HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: br#"{"content":[{"type":"text","text":" A post about Rust. "}]}"#.to_vec(),
            },
        );

        let enricher = ClaudeEnricher::new(Arc::new(transport.clone()), "sk-test".to_string());
        let context = enricher.enrich("jack", "rust is great").await.unwrap();
        assert_eq!(context, "A post about Rust.");

        let request = &transport.requests()[0];
        assert_eq!(header_get(&request.headers, "x-api-key"), Some("sk-test"));
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent["model"], DEFAULT_MODEL);
        assert!(sent["messages"][0]["content"].as_str().unwrap().contains("jack"));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Post,
            CLAUDE_API_URL,
            HttpResponse {
                status: 529,
                headers: Vec::new(),
                body: Vec::new(),
            },
        );

        let enricher = ClaudeEnricher::new(Arc::new(transport), "sk-test".to_string());
        let err = enricher.enrich("jack", "hello").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 529, .. }));
    }
}
