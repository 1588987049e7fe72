//! GitHub stars sync engine.
//!
//! A sync fetches every page first and only then writes, so a failure while
//! paginating leaves the store untouched. The write phase runs in one
//! transaction:
//!
//! 1. ensure the user's GitHub source list exists,
//! 2. insert stars whose URL the user does not already have,
//! 3. link the inserted items to the source list,
//! 4. record page 1's ETag for the next conditional fetch.
//!
//! If any step fails the transaction rolls back, so the stored ETag never
//! claims stars that were not saved.
//!
//! # Example
//!
//! ```ignore
//! use linkhoard::github::GitHubClient;
//! use linkhoard::sync::StarsSyncer;
//!
//! let syncer = StarsSyncer::new(Arc::new(db), GitHubClient::new(transport, token));
//! let result = syncer.sync_github_stars(user_id, "octocat", None).await?;
//! println!("added {} of {}", result.added, result.total);
//! ```

mod convert;
mod fetch;

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::registry::SyncRegistry;
use super::types::{StarsSyncResult, SyncError};
use crate::entity::item_type::ItemType;
use crate::entity::list_source::ListSource;
use crate::github::{self, GitHubClient, GitHubError};
use crate::repository::{self, ItemFilter, RepositoryError};
use crate::source_list::ensure_source_list;

pub use convert::star_to_item;

/// Imports a user's GitHub stars as items.
#[derive(Clone)]
pub struct StarsSyncer {
    db: Arc<DatabaseConnection>,
    client: GitHubClient,
    registry: SyncRegistry,
}

impl StarsSyncer {
    pub fn new(db: Arc<DatabaseConnection>, client: GitHubClient) -> Self {
        Self {
            db,
            client,
            registry: SyncRegistry::new(),
        }
    }

    /// Share an in-progress registry with other syncers.
    #[must_use]
    pub fn with_registry(mut self, registry: SyncRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &SyncRegistry {
        &self.registry
    }

    /// Sync `username`'s stars into `user_id`'s items.
    ///
    /// Returns zero counts without writing anything when GitHub reports the
    /// first page unchanged since the last sync. Fails with
    /// [`SyncError::AlreadyRunning`] if this user already has a sync in flight.
    pub async fn sync_github_stars(
        &self,
        user_id: Uuid,
        username: &str,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<StarsSyncResult, SyncError> {
        if !github::is_valid_username(username) {
            return Err(GitHubError::InvalidUsername(username.to_string()).into());
        }
        let _guard = self
            .registry
            .try_begin(user_id)
            .ok_or(SyncError::AlreadyRunning { user_id })?;

        emit(
            on_progress,
            SyncProgress::Starting {
                username: username.to_string(),
            },
        );

        // A stored ETag belongs to the username it was fetched for.
        let stored_etag = repository::sync_state::find(self.db.as_ref(), user_id)
            .await?
            .filter(|state| state.github_username.eq_ignore_ascii_case(username))
            .and_then(|state| state.etag);

        let Some(fetched) =
            fetch::fetch_all_stars(&self.client, username, stored_etag.as_deref(), on_progress)
                .await?
        else {
            tracing::info!(%user_id, username, "Stars unchanged since last sync");
            emit(
                on_progress,
                SyncProgress::NotModified {
                    username: username.to_string(),
                },
            );
            return Ok(StarsSyncResult::default());
        };

        let total = fetched.stars.len();
        emit(on_progress, SyncProgress::FetchComplete { total });

        let existing =
            repository::item::find_urls_by_type(self.db.as_ref(), user_id, ItemType::GithubStar)
                .await?;
        let (fresh, skipped) = convert::partition_new(fetched.stars, &existing);
        emit(
            on_progress,
            SyncProgress::Partitioned {
                new: fresh.len(),
                skipped,
            },
        );

        let txn = self.db.begin().await.map_err(RepositoryError::from)?;
        let list_id = ensure_source_list(&txn, user_id, ListSource::GitHub).await?;

        let urls: Vec<String> = fresh.iter().map(|s| s.repo.html_url.clone()).collect();
        let models = fresh
            .into_iter()
            .map(|star| star_to_item(user_id, star).into_active_model())
            .collect();
        let added = repository::item::create_many(&txn, models).await? as usize;

        let linked = if urls.is_empty() {
            0
        } else {
            let filter = ItemFilter::for_user(user_id)
                .with_type(ItemType::GithubStar)
                .with_urls(urls);
            let ids: Vec<Uuid> = repository::item::find_many(&txn, filter)
                .await?
                .into_iter()
                .map(|item| item.id)
                .collect();
            repository::list::link_items(&txn, list_id, &ids).await? as usize
        };

        repository::sync_state::upsert(
            &txn,
            user_id,
            username,
            fetched.etag,
            Utc::now().fixed_offset(),
        )
        .await?;
        txn.commit().await.map_err(RepositoryError::from)?;

        emit(on_progress, SyncProgress::Persisted { added });
        emit(on_progress, SyncProgress::Linked { linked });

        let result = StarsSyncResult {
            added,
            skipped,
            total,
        };
        tracing::info!(
            %user_id,
            username,
            added = result.added,
            skipped = result.skipped,
            total = result.total,
            "GitHub stars sync complete"
        );
        emit(on_progress, SyncProgress::Complete { result });
        Ok(result)
    }
}
