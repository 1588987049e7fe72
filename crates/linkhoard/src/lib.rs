//! Linkhoard - ingestion and sync core for a personal link aggregator.
//!
//! Users save URLs (websites, tweets, starred GitHub repositories). This crate
//! turns each source into deduplicated, typed items:
//!
//! - [`ingest`] saves single URLs and bounded batches,
//! - [`sync`] imports a user's GitHub stars with ETag-conditional fetches,
//! - [`source_list`] maintains the per-platform lists imported items land in,
//! - [`token`] resolves API bearer tokens to users.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//! - `server` - The axum JSON API in [`api`].
//! - `sqlite` / `postgres` - Database drivers.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use linkhoard::{connect_and_migrate, ingest::Ingestor};
//! use linkhoard::http::reqwest_transport::ReqwestTransport;
//! use linkhoard::services::{HttpMetadataFetcher, SyndicationTweetFetcher};
//!
//! let db = connect_and_migrate("sqlite://linkhoard.db?mode=rwc").await?;
//! let transport = Arc::new(ReqwestTransport::with_timeout(Duration::from_secs(15))?);
//! let ingestor = Ingestor::new(
//!     Arc::new(db),
//!     Arc::new(HttpMetadataFetcher::new(transport.clone())),
//!     Arc::new(SyndicationTweetFetcher::new(transport)),
//! );
//!
//! let outcome = ingestor.create_item("https://example.com/post", user_id).await?;
//! ```

pub mod db;
pub mod entity;
pub mod github;
pub mod http;
pub mod ingest;
pub mod link;
pub mod repository;
pub mod retry;
pub mod services;
pub mod source_list;
pub mod sync;
pub mod token;

#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use ingest::{BulkReport, IngestError, IngestOutcome, Ingestor};
pub use repository::RepositoryError;
pub use source_list::ensure_source_list;
pub use sync::{StarsSyncResult, StarsSyncer, SyncError};
