//! Item store: duplicate lookups, inserts and archival.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::Expr,
};
use uuid::Uuid;

use crate::entity::item::{ActiveModel, Column, Entity as Item, Model};
use crate::entity::item_type::ItemType;

use super::errors::Result;

/// Maximum rows per multi-row INSERT, keeps bound parameters under SQLite's limit.
const INSERT_CHUNK_SIZE: usize = 500;

/// Maximum values per `IN (...)` list.
const IN_CHUNK_SIZE: usize = 500;

/// Fields of an item about to be created.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub user_id: Uuid,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub context: Option<String>,
    pub image: Option<String>,
    pub item_type: ItemType,
    pub metadata: serde_json::Value,
    /// Defaults to now when unset.
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl NewItem {
    /// Start a new item with only the required fields set.
    pub fn new(
        user_id: Uuid,
        url: impl Into<String>,
        title: impl Into<String>,
        item_type: ItemType,
    ) -> Self {
        Self {
            user_id,
            url: url.into(),
            title: title.into(),
            description: None,
            content: None,
            context: None,
            image: None,
            item_type,
            metadata: serde_json::json!({}),
            created_at: None,
        }
    }

    /// Convert into an active model with a fresh id.
    pub fn into_active_model(self) -> ActiveModel {
        let now = Utc::now().fixed_offset();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(self.user_id),
            url: Set(self.url),
            title: Set(self.title),
            description: Set(self.description),
            content: Set(self.content),
            context: Set(self.context),
            image: Set(self.image),
            item_type: Set(self.item_type),
            metadata: Set(self.metadata),
            created_at: Set(self.created_at.unwrap_or(now)),
            updated_at: Set(now),
            is_deleted: Set(false),
            deleted_at: Set(None),
        }
    }
}

/// Filter for [`find_many`].
#[derive(Debug, Clone)]
pub struct ItemFilter {
    pub user_id: Uuid,
    pub item_type: Option<ItemType>,
    /// Restrict to these exact URLs.
    pub urls: Option<Vec<String>>,
    pub include_deleted: bool,
}

impl ItemFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            item_type: None,
            urls: None,
            include_deleted: false,
        }
    }

    #[must_use]
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    #[must_use]
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = Some(urls);
        self
    }
}

/// Find the live (non-archived) item with exactly this URL for this user.
pub async fn find_duplicate(
    db: &DatabaseConnection,
    url: &str,
    user_id: Uuid,
) -> Result<Option<Model>> {
    let existing = Item::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Url.eq(url))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .one(db)
        .await?;
    Ok(existing)
}

/// Whether a live item with exactly this URL exists for this user.
///
/// The check is not atomic with any subsequent insert; two concurrent
/// submissions of the same URL can both observe `false`.
pub async fn is_duplicate(db: &DatabaseConnection, url: &str, user_id: Uuid) -> Result<bool> {
    Ok(find_duplicate(db, url, user_id).await?.is_some())
}

/// Insert a single item and return the stored row.
pub async fn create(db: &DatabaseConnection, item: NewItem) -> Result<Model> {
    let model = item.into_active_model().insert(db).await?;
    tracing::debug!(
        item_id = %model.id,
        url = %model.url,
        item_type = %model.item_type,
        "Created item"
    );
    Ok(model)
}

/// Insert many items in chunks and return the number of rows stored.
///
/// Nothing here deduplicates: callers filter out URLs the user already has
/// before building `models`. Pass a transaction to make the chunks atomic.
pub async fn create_many<C>(db: &C, models: Vec<ActiveModel>) -> Result<u64>
where
    C: ConnectionTrait,
{
    let mut inserted = 0u64;
    let mut models = models.into_iter().peekable();
    while models.peek().is_some() {
        let chunk: Vec<ActiveModel> = models.by_ref().take(INSERT_CHUNK_SIZE).collect();
        inserted += Item::insert_many(chunk).exec_without_returning(db).await?;
    }
    Ok(inserted)
}

/// Query items for a user.
pub async fn find_many<C>(db: &C, filter: ItemFilter) -> Result<Vec<Model>>
where
    C: ConnectionTrait,
{
    let mut base = Item::find().filter(Column::UserId.eq(filter.user_id));
    if let Some(item_type) = filter.item_type {
        base = base.filter(Column::ItemType.eq(item_type));
    }
    if !filter.include_deleted {
        base = base.filter(Column::IsDeleted.eq(false));
    }

    let Some(urls) = filter.urls else {
        return Ok(base.order_by_asc(Column::CreatedAt).all(db).await?);
    };

    let mut found = Vec::with_capacity(urls.len());
    for chunk in urls.chunks(IN_CHUNK_SIZE) {
        let rows = base
            .clone()
            .filter(Column::Url.is_in(chunk.iter().cloned()))
            .all(db)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

/// URLs of all live items of a type for a user.
pub async fn find_urls_by_type(
    db: &DatabaseConnection,
    user_id: Uuid,
    item_type: ItemType,
) -> Result<HashSet<String>> {
    let urls: Vec<String> = Item::find()
        .select_only()
        .column(Column::Url)
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ItemType.eq(item_type))
        .filter(Column::IsDeleted.eq(false))
        .into_tuple()
        .all(db)
        .await?;
    Ok(urls.into_iter().collect())
}

/// Archive an item. Archived items no longer count as duplicates.
///
/// Returns the number of rows changed (0 when already archived or missing).
pub async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> Result<u64> {
    let now = Utc::now().fixed_offset();
    let result = Item::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::DeletedAt, Expr::value(Some(now)))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Find an item by id, including archived ones.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>> {
    Ok(Item::find_by_id(id).one(db).await?)
}
