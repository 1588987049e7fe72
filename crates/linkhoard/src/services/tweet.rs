//! Tweet lookup through the public syndication endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::{HttpRequest, HttpTransport};

use super::ServiceError;

/// Endpoint used by the public embed widget.
pub const SYNDICATION_URL: &str = "https://cdn.syndication.twimg.com/tweet-result";

/// The fields of a post the ingestor needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tweet {
    pub text: String,
    pub user: TweetUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TweetUser {
    /// Display name.
    pub name: String,
    /// Handle without the `@`.
    pub screen_name: String,
}

/// Looks up a post by id.
#[async_trait]
pub trait TweetFetcher: Send + Sync {
    async fn fetch_tweet(&self, id: &str) -> Result<Tweet, ServiceError>;
}

/// [`TweetFetcher`] backed by the syndication endpoint (no credentials needed).
#[derive(Clone)]
pub struct SyndicationTweetFetcher {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl SyndicationTweetFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: SYNDICATION_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn tweet_url(&self, id: &str) -> String {
        format!(
            "{}?id={}&lang=en&token={}",
            self.base_url,
            id,
            syndication_token(id)
        )
    }
}

#[async_trait]
impl TweetFetcher for SyndicationTweetFetcher {
    async fn fetch_tweet(&self, id: &str) -> Result<Tweet, ServiceError> {
        let url = self.tweet_url(id);
        let response = self
            .transport
            .send(HttpRequest::get(&url).header("Accept", "application/json"))
            .await?;
        if !response.is_success() {
            return Err(ServiceError::Status {
                status: response.status,
                url,
            });
        }
        if response.body.is_empty() {
            return Err(ServiceError::Decode(format!("empty response for post {id}")));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Token the syndication endpoint expects alongside the id.
///
/// It is `(id / 1e15) * PI` written in base 36 with zeros and the radix
/// point removed. The endpoint tolerates small differences in the trailing
/// digits, so the fraction is emitted without final rounding.
pub fn syndication_token(id: &str) -> String {
    let Ok(n) = id.parse::<f64>() else {
        return String::new();
    };
    let value = (n / 1e15) * std::f64::consts::PI;
    if !value.is_finite() {
        return String::new();
    }
    to_base36(value).replace(['0', '.'], "")
}

/// Render a finite, non-negative `value` in base 36. Anything else renders empty.
fn to_base36(value: f64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    const MAX_FRACTION_DIGITS: usize = 20;

    if !value.is_finite() || value < 0.0 {
        return String::new();
    }

    let mut int = value.trunc();
    let mut frac = value - int;

    let mut int_digits = Vec::new();
    loop {
        int_digits.push(char::from(DIGITS[(int % 36.0) as usize]));
        int = (int / 36.0).trunc();
        if int < 1.0 {
            break;
        }
    }
    let mut out: String = int_digits.into_iter().rev().collect();

    if frac > 0.0 {
        out.push('.');
        // Stop once the remaining fraction is below the precision of `value`.
        let mut delta = 0.5 * (value.next_up() - value);
        for _ in 0..MAX_FRACTION_DIGITS {
            frac *= 36.0;
            delta *= 36.0;
            let digit = frac.floor();
            out.push(char::from(DIGITS[digit as usize]));
            frac -= digit;
            if frac < delta {
                break;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse, MockTransport};

    #[test]
    fn base36_integers() {
        assert_eq!(to_base36(0.0), "0");
        assert_eq!(to_base36(35.0), "z");
        assert_eq!(to_base36(36.0), "10");
    }

    #[test]
    fn base36_fractions() {
        assert_eq!(to_base36(0.5), "0.i");
        assert!(to_base36(std::f64::consts::PI).starts_with("3.53i5ab8p5"));
    }

    #[test]
    fn token_has_no_zeros_or_dots() {
        let token = syndication_token("1700000000000000000");
        assert!(!token.is_empty());
        assert!(!token.contains('0'));
        assert!(!token.contains('.'));
        assert_eq!(syndication_token("not-a-number"), "");
    }

    #[test]
    fn base36_of_non_finite_is_empty() {
        assert_eq!(to_base36(f64::INFINITY), "");
        assert_eq!(to_base36(f64::NAN), "");
        assert_eq!(to_base36(-1.0), "");
    }

    #[test]
    fn token_for_overflowing_id_is_empty() {
        assert_eq!(syndication_token(&"9".repeat(400)), "");
        assert_eq!(syndication_token("NaN"), "");
        assert_eq!(syndication_token("inf"), "");
        // Large but finite ids still terminate with a token.
        assert!(!syndication_token(&"9".repeat(300)).is_empty());
    }

    #[tokio::test]
    async fn fetches_and_decodes_tweet() {
        let transport = MockTransport::new();
        let fetcher = SyndicationTweetFetcher::new(Arc::new(transport.clone()));
        transport.push_response(
            HttpMethod::Get,
            fetcher.tweet_url("20"),
            HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: br#"{"text":"just setting up my twttr","user":{"name":"jack","screen_name":"jack"},"lang":"en"}"#.to_vec(),
            },
        );

        let tweet = fetcher.fetch_tweet("20").await.unwrap();
        assert_eq!(tweet.text, "just setting up my twttr");
        assert_eq!(tweet.user.screen_name, "jack");
    }

    #[tokio::test]
    async fn missing_tweet_is_an_error() {
        let transport = MockTransport::new();
        let fetcher = SyndicationTweetFetcher::new(Arc::new(transport.clone()));
        transport.push_response(
            HttpMethod::Get,
            fetcher.tweet_url("1"),
            HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: Vec::new(),
            },
        );

        let err = fetcher.fetch_tweet("1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 404, .. }));
    }
}
