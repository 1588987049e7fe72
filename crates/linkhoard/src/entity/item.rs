//! Item entity - a saved link owned by a single user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::item_type::ItemType;

/// A saved link.
///
/// `url` is the canonical address produced by [`crate::link::normalize`] (or
/// the repository `html_url` for stars). There is no unique index on
/// `(user_id, url)`; duplicate detection happens in the ingestion layer and
/// only considers rows where `is_deleted` is false.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owner of the item.
    pub user_id: Uuid,

    // ─── Content ─────────────────────────────────────────────────────────────
    #[sea_orm(column_type = "Text")]
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Body text (tweet text for tweets).
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    /// Searchable context produced by the enricher.
    #[sea_orm(column_type = "Text", nullable)]
    pub context: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    pub item_type: ItemType,
    /// Type-specific metadata (tweet ids, star counts, ...).
    #[sea_orm(column_type = "Json")]
    pub metadata: serde_json::Value,

    // ─── Timestamps ──────────────────────────────────────────────────────────
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,

    // ─── Archival ────────────────────────────────────────────────────────────
    #[sea_orm(default_value = false)]
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_list::Entity")]
    ItemList,
}

impl Related<super::item_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemList.def()
    }
}

impl Related<super::list::Entity> for Entity {
    fn to() -> RelationDef {
        super::item_list::Relation::List.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::item_list::Relation::Item.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
