//! GitHubStarsSync entity - per-user state of the stars sync.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per user. Written only by the stars sync engine and never deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "github_stars_syncs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub github_username: String,
    /// ETag of page 1 from the last successful full fetch.
    #[sea_orm(column_type = "Text", nullable)]
    pub etag: Option<String>,
    pub last_synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
