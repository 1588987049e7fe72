//! GitHub stars sync state store.

use chrono::{DateTime, FixedOffset};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use uuid::Uuid;

use crate::entity::github_stars_sync::{ActiveModel, Column, Entity as GitHubStarsSync, Model};

use super::errors::Result;

/// Load the stored sync state for a user.
pub async fn find(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<Model>> {
    Ok(GitHubStarsSync::find_by_id(user_id).one(db).await?)
}

/// Insert or replace the sync state for a user.
pub async fn upsert<C>(
    db: &C,
    user_id: Uuid,
    github_username: &str,
    etag: Option<String>,
    last_synced_at: DateTime<FixedOffset>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let model = ActiveModel {
        user_id: Set(user_id),
        github_username: Set(github_username.to_string()),
        etag: Set(etag),
        last_synced_at: Set(last_synced_at),
    };

    GitHubStarsSync::insert(model)
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([Column::GithubUsername, Column::Etag, Column::LastSyncedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn upsert_updates_on_user_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                rows_affected: 1,
                last_insert_id: 0,
            }])
            .into_connection();

        upsert(
            &db,
            Uuid::new_v4(),
            "octocat",
            Some("W/\"abc\"".to_string()),
            Utc::now().fixed_offset(),
        )
        .await
        .unwrap();

        let sql = format!("{:?}", db.into_transaction_log());
        assert!(sql.contains("ON CONFLICT"), "{sql}");
        assert!(sql.contains("DO UPDATE"), "{sql}");
        assert!(sql.contains("etag"), "{sql}");
    }
}
