//! Item type enum.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The kind of content an item points at.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Any web page.
    #[sea_orm(string_value = "website")]
    Website,
    /// A post on X/Twitter, saved directly or from bookmarks.
    #[sea_orm(string_value = "tweet")]
    Tweet,
    /// A repository starred on GitHub.
    #[sea_orm(string_value = "github_star")]
    GithubStar,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Website => write!(f, "website"),
            ItemType::Tweet => write!(f, "tweet"),
            ItemType::GithubStar => write!(f, "github_star"),
        }
    }
}
