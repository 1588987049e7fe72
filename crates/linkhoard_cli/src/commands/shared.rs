use std::sync::Arc;
use std::time::Duration;

use linkhoard::github::GitHubClient;
use linkhoard::http::reqwest_transport::ReqwestTransport;
use linkhoard::http::{HttpError, HttpTransport, RateLimitedTransport};
use linkhoard::services::{ClaudeEnricher, HttpMetadataFetcher, SyndicationTweetFetcher};
use linkhoard::{Ingestor, StarsSyncer};
use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Build the outbound transport shared by every client: a reqwest client with
/// the configured timeout behind one rate limiter.
pub(crate) fn build_transport(config: &Config) -> Result<Arc<dyn HttpTransport>, HttpError> {
    let inner = ReqwestTransport::with_timeout(Duration::from_secs(config.http.timeout))?;
    Ok(Arc::new(RateLimitedTransport::new(
        Arc::new(inner),
        config.http.rate,
    )))
}

/// Build the ingestor. Tweet enrichment is enabled only when a key is configured.
pub(crate) fn build_ingestor(
    db: Arc<DatabaseConnection>,
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> Ingestor {
    let ingestor = Ingestor::new(
        db,
        Arc::new(HttpMetadataFetcher::new(Arc::clone(&transport))),
        Arc::new(SyndicationTweetFetcher::new(Arc::clone(&transport))),
    );

    match config.enrich.key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            let mut enricher = ClaudeEnricher::new(transport, key.to_string());
            if let Some(model) = &config.enrich.model {
                enricher = enricher.with_model(model.clone());
            }
            ingestor.with_enricher(Arc::new(enricher))
        }
        None => {
            tracing::debug!("No enrichment key configured, tweets will be saved without context");
            ingestor
        }
    }
}

pub(crate) fn build_stars_syncer(
    db: Arc<DatabaseConnection>,
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> StarsSyncer {
    let client = GitHubClient::new(transport, config.github.token.clone());
    StarsSyncer::new(db, client)
}
