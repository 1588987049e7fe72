//! Page metadata fetching.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::http::{HttpRequest, HttpTransport};

use super::ServiceError;

/// Title and description scraped from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Fetches a page and extracts its metadata.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ServiceError>;
}

/// [`MetadataFetcher`] that downloads the page over HTTP and parses the HTML.
#[derive(Clone)]
pub struct HttpMetadataFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl HttpMetadataFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ServiceError> {
        let request = HttpRequest::get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en");
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ServiceError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        let html = String::from_utf8_lossy(&response.body);
        Ok(extract_metadata(&html))
    }
}

/// Extract title, description and preview image from an HTML document.
///
/// Open Graph tags win over `<title>` and `meta[name=description]`.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = meta_content(&document, r#"meta[property="og:title"]"#)
        .or_else(|| element_text(&document, "title"));
    let description = meta_content(&document, r#"meta[name="description"]"#)
        .or_else(|| meta_content(&document, r#"meta[property="og:description"]"#));
    let image = meta_content(&document, r#"meta[property="og:image"]"#);

    PageMetadata {
        title,
        description,
        image,
    }
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .find(|s| !s.is_empty())
}

fn element_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|s| !s.is_empty())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
