//! Website ingestion: page metadata with a URL-derived fallback title.

use uuid::Uuid;

use crate::entity::item::Model;
use crate::entity::item_type::ItemType;
use crate::link::{is_valid_title, title_from_url};
use crate::repository::{self, NewItem};
use crate::services::PageMetadata;

use super::{Ingestor, Result};

pub(super) async fn ingest(ingestor: &Ingestor, url: &str, user_id: Uuid) -> Result<Model> {
    let page = match ingestor.metadata.fetch_metadata(url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url, error = %e, "Metadata fetch failed, using URL-derived title");
            PageMetadata::default()
        }
    };

    let mut item = NewItem::new(
        user_id,
        url,
        resolve_title(page.title.as_deref(), url),
        ItemType::Website,
    );
    item.description = page.description;
    item.image = page.image;

    let model = repository::item::create(&ingestor.db, item).await?;
    tracing::info!(url, item_id = %model.id, "Saved website");
    Ok(model)
}

/// Pick the scraped title when it is usable, else derive one from the URL.
pub fn resolve_title(scraped: Option<&str>, url: &str) -> String {
    match scraped.map(str::trim) {
        Some(title) if is_valid_title(title) => title.to_string(),
        Some(title) => {
            tracing::debug!(url, title, "Rejected page title");
            title_from_url(url)
        }
        None => title_from_url(url),
    }
}
