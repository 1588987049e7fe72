//! SeaORM entity definitions for the linkhoard database schema.

pub mod api_token;
pub mod github_stars_sync;
pub mod item;
pub mod item_list;
pub mod item_type;
pub mod list;
pub mod list_source;
pub mod prelude;
