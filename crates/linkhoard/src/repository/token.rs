//! API token store.

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::entity::api_token::{ActiveModel, Column, Entity as ApiToken, Model};

use super::errors::{RepositoryError, Result};

/// Store a token hash.
pub async fn insert(
    db: &DatabaseConnection,
    user_id: Uuid,
    token_hash: String,
    label: &str,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        token_hash: Set(token_hash),
        label: Set(label.to_string()),
        created_at: Set(Utc::now().fixed_offset()),
        last_used_at: Set(None),
        revoked_at: Set(None),
    }
    .insert(db)
    .await?;
    Ok(model)
}

/// Find an unrevoked token by hash.
pub async fn find_active_by_hash(
    db: &DatabaseConnection,
    token_hash: &str,
) -> Result<Option<Model>> {
    let token = ApiToken::find()
        .filter(Column::TokenHash.eq(token_hash))
        .filter(Column::RevokedAt.is_null())
        .one(db)
        .await?;
    Ok(token)
}

/// Record a successful authentication.
pub async fn touch(db: &DatabaseConnection, id: Uuid, at: DateTime<FixedOffset>) -> Result<()> {
    let result = ApiToken::update_many()
        .col_expr(Column::LastUsedAt, Expr::value(Some(at)))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found_by_id(id));
    }
    Ok(())
}

/// Revoke a token. Returns false when it was missing or already revoked.
pub async fn revoke(db: &DatabaseConnection, id: Uuid) -> Result<bool> {
    let result = ApiToken::update_many()
        .col_expr(Column::RevokedAt, Expr::value(Some(Utc::now().fixed_offset())))
        .filter(Column::Id.eq(id))
        .filter(Column::RevokedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
