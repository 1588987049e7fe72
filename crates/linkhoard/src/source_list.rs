//! Auto-managed lists that group items imported from one platform.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::entity::list_source::ListSource;
use crate::repository::{self, NewList, Result};

/// Return the user's list for `source`, creating it on first use.
///
/// The list gets the source's canonical name, slug and description.
pub async fn ensure_source_list<C>(db: &C, user_id: Uuid, source: ListSource) -> Result<Uuid>
where
    C: ConnectionTrait,
{
    if let Some(list) = repository::list::find_source_list(db, user_id, source).await? {
        return Ok(list.id);
    }

    let list = repository::list::create(
        db,
        NewList {
            user_id,
            name: source.list_name().to_string(),
            slug: source.list_slug().to_string(),
            description: Some(source.list_description().to_string()),
            source: Some(source),
        },
    )
    .await?;
    tracing::info!(%user_id, %source, list_id = %list.id, "Created source list");
    Ok(list.id)
}
