//! External collaborators used by the ingestors.
//!
//! Each collaborator is a trait so ingestion can be driven by fakes in tests;
//! the HTTP implementations all go through [`crate::http::HttpTransport`].

pub mod enrich;
pub mod metadata;
pub mod tweet;

mod error;

pub use enrich::{ClaudeEnricher, Enricher};
pub use error::ServiceError;
pub use metadata::{HttpMetadataFetcher, MetadataFetcher, PageMetadata};
pub use tweet::{SyndicationTweetFetcher, Tweet, TweetFetcher, TweetUser};
