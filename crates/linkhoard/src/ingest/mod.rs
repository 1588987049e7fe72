//! Single-item and bulk ingestion.
//!
//! [`Ingestor::create_item`] is the one entry point every caller uses for a
//! single URL: normalize, check for a live duplicate, classify, then hand off
//! to the website or tweet ingestor. Each successful call writes exactly one
//! item. [`Ingestor::bulk_create`] runs that pipeline sequentially over a
//! batch, isolating per-entry failures.
//!
//! The duplicate check and the insert are separate round trips, so two
//! concurrent submissions of the same URL can both be created.

pub mod bulk;
pub mod tweet;
pub mod website;

mod errors;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entity::item::Model;
use crate::link::{self, LinkKind};
use crate::repository;
use crate::services::{Enricher, MetadataFetcher, TweetFetcher};

pub use bulk::{BulkItemResult, BulkReport, BulkStatus, MAX_BULK_URLS};
pub use errors::{IngestError, Result};

/// What happened to a submitted URL.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Created(Model),
    /// A live item with the same canonical URL already existed.
    Duplicate(Model),
}

impl IngestOutcome {
    pub fn item(&self) -> &Model {
        match self {
            IngestOutcome::Created(item) | IngestOutcome::Duplicate(item) => item,
        }
    }

    pub fn into_item(self) -> Model {
        match self {
            IngestOutcome::Created(item) | IngestOutcome::Duplicate(item) => item,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, IngestOutcome::Duplicate(_))
    }
}

/// Turns URLs into stored items.
#[derive(Clone)]
pub struct Ingestor {
    db: Arc<DatabaseConnection>,
    metadata: Arc<dyn MetadataFetcher>,
    tweets: Arc<dyn TweetFetcher>,
    enricher: Option<Arc<dyn Enricher>>,
}

impl Ingestor {
    pub fn new(
        db: Arc<DatabaseConnection>,
        metadata: Arc<dyn MetadataFetcher>,
        tweets: Arc<dyn TweetFetcher>,
    ) -> Self {
        Self {
            db,
            metadata,
            tweets,
            enricher: None,
        }
    }

    /// Generate searchable context for tweets with `enricher`.
    #[must_use]
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn db(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }

    /// Save one URL for a user.
    ///
    /// Returns [`IngestOutcome::Duplicate`] with the existing item when the
    /// user already has a live item at the same canonical URL.
    pub async fn create_item(&self, raw_url: &str, user_id: Uuid) -> Result<IngestOutcome> {
        let url = link::normalize(raw_url)?;

        if let Some(existing) = repository::find_duplicate(&self.db, &url, user_id).await? {
            tracing::debug!(url, item_id = %existing.id, "Duplicate URL");
            return Ok(IngestOutcome::Duplicate(existing));
        }

        let item = match link::classify(&url)? {
            LinkKind::Website => website::ingest(self, &url, user_id).await?,
            LinkKind::TweetOrBookmark => tweet::ingest(self, &url, user_id).await?,
        };
        Ok(IngestOutcome::Created(item))
    }
}
