//! Tweet and X bookmark ingestion.

use uuid::Uuid;

use crate::entity::item::Model;
use crate::entity::item_type::ItemType;
use crate::link;
use crate::repository::{self, NewItem};

use super::{IngestError, Ingestor, Result};

pub(super) async fn ingest(ingestor: &Ingestor, url: &str, user_id: Uuid) -> Result<Model> {
    let id = link::post_id(url).ok_or_else(|| IngestError::MissingPostId(url.to_string()))?;
    let tweet = ingestor
        .tweets
        .fetch_tweet(&id)
        .await
        .map_err(|source| IngestError::Tweet {
            id: id.clone(),
            source,
        })?;

    let content = collapse_newlines(&tweet.text);
    let tweet_url = format!("https://x.com/{}/status/{}", tweet.user.screen_name, id);

    let context = match &ingestor.enricher {
        Some(enricher) => match enricher.enrich(&tweet.user.name, &content).await {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::warn!(
                    tweet_id = %id,
                    error = %e,
                    "Enrichment failed, saving without context"
                );
                None
            }
        },
        None => None,
    };

    let mut item = NewItem::new(user_id, url, tweet.user.name.clone(), ItemType::Tweet);
    item.content = Some(content);
    item.context = context;
    item.metadata = serde_json::json!({
        "tweet_id": id,
        "tweet_url": tweet_url,
        "name": tweet.user.name,
    });

    let model = repository::item::create(&ingestor.db, item).await?;
    tracing::info!(url, tweet_id = %id, item_id = %model.id, "Saved tweet");
    Ok(model)
}

/// Replace each run of line breaks with a single space.
pub fn collapse_newlines(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
