//! Common re-exports for convenient entity usage.

pub use super::api_token::{
    ActiveModel as ApiTokenActiveModel, Column as ApiTokenColumn, Entity as ApiToken,
    Model as ApiTokenModel,
};
pub use super::github_stars_sync::{
    ActiveModel as GitHubStarsSyncActiveModel, Column as GitHubStarsSyncColumn,
    Entity as GitHubStarsSync, Model as GitHubStarsSyncModel,
};
pub use super::item::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as Item, Model as ItemModel,
};
pub use super::item_list::{
    ActiveModel as ItemListActiveModel, Column as ItemListColumn, Entity as ItemList,
    Model as ItemListModel,
};
pub use super::item_type::ItemType;
pub use super::list::{
    ActiveModel as ListActiveModel, Column as ListColumn, Entity as List, Model as ListModel,
};
pub use super::list_source::ListSource;
