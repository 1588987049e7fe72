//! List and list-membership store.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entity::item_list::{
    ActiveModel as ItemListActiveModel, Column as ItemListColumn, Entity as ItemList,
};
use crate::entity::list::{ActiveModel, Column, Entity as List, Model};
use crate::entity::list_source::ListSource;

use super::errors::Result;

/// Fields of a list about to be created.
#[derive(Debug, Clone)]
pub struct NewList {
    pub user_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub source: Option<ListSource>,
}

/// Find the live list a source owns for this user.
///
/// If several live rows exist (possible only under a creation race) the
/// oldest one wins, so every caller converges on the same list.
pub async fn find_source_list<C>(
    db: &C,
    user_id: Uuid,
    source: ListSource,
) -> Result<Option<Model>>
where
    C: ConnectionTrait,
{
    let list = List::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Source.eq(source))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(list)
}

/// Insert a list.
pub async fn create<C>(db: &C, list: NewList) -> Result<Model>
where
    C: ConnectionTrait,
{
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(list.user_id),
        name: Set(list.name),
        slug: Set(list.slug),
        description: Set(list.description),
        source: Set(list.source),
        is_deleted: Set(false),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await?;
    Ok(model)
}

/// Link items to a list, ignoring pairs that are already linked.
///
/// Returns the number of new links.
pub async fn link_items<C>(db: &C, list_id: Uuid, item_ids: &[Uuid]) -> Result<u64>
where
    C: ConnectionTrait,
{
    if item_ids.is_empty() {
        return Ok(0);
    }

    let now = Utc::now().fixed_offset();
    let mut linked = 0u64;
    for chunk in item_ids.chunks(500) {
        let models = chunk.iter().map(|item_id| ItemListActiveModel {
            item_id: Set(*item_id),
            list_id: Set(list_id),
            created_at: Set(now),
        });
        linked += ItemList::insert_many(models)
            .on_conflict(
                OnConflict::columns([ItemListColumn::ItemId, ItemListColumn::ListId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }
    Ok(linked)
}

/// Ids of the items linked to a list.
pub async fn item_ids(db: &DatabaseConnection, list_id: Uuid) -> Result<Vec<Uuid>> {
    let ids = ItemList::find()
        .select_only()
        .column(ItemListColumn::ItemId)
        .filter(ItemListColumn::ListId.eq(list_id))
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids)
}
