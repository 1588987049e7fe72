//! List entity - a named collection of items.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::list_source::ListSource;

/// A user-visible list. Lists with a `source` are managed by integrations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub source: Option<ListSource>,
    #[sea_orm(default_value = false)]
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
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

impl ActiveModelBehavior for ActiveModel {}
