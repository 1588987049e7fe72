//! API token issuance and bearer-token resolution.
//!
//! Tokens are random secrets shown once at issue time. Only their SHA-256
//! digest is stored, so a leaked database does not leak usable tokens.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::api_token::Model;
use crate::repository::{self, RepositoryError};

/// Prefix on every issued token, making them easy to spot in logs and configs.
pub const TOKEN_PREFIX: &str = "lh_";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing bearer token")]
    Missing,

    #[error("Malformed Authorization header")]
    Malformed,

    #[error("Invalid or revoked token")]
    Invalid,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A freshly issued token. `token` is the only copy of the secret.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub record: Model,
}

/// Lowercase hex SHA-256 of a token.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// A new random token secret.
pub fn generate_token() -> String {
    format!(
        "{TOKEN_PREFIX}{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// Create and store a token for `user_id`.
pub async fn issue_token(
    db: &DatabaseConnection,
    user_id: Uuid,
    label: &str,
) -> Result<IssuedToken, TokenError> {
    let token = generate_token();
    let record = repository::token::insert(db, user_id, hash_token(&token), label).await?;
    tracing::info!(%user_id, token_id = %record.id, label, "Issued API token");
    Ok(IssuedToken { token, record })
}

/// Resolve a token secret to the user it belongs to.
///
/// Updates the token's `last_used_at` on success.
pub async fn resolve_token(db: &DatabaseConnection, token: &str) -> Result<Uuid, TokenError> {
    let record = repository::token::find_active_by_hash(db, &hash_token(token))
        .await?
        .ok_or(TokenError::Invalid)?;

    if let Err(e) = repository::token::touch(db, record.id, Utc::now().fixed_offset()).await {
        tracing::warn!(token_id = %record.id, error = %e, "Failed to record token use");
    }
    Ok(record.user_id)
}

/// Extract the secret from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, TokenError> {
    let header = header.ok_or(TokenError::Missing)?;
    let (scheme, token) = header.trim().split_once(' ').ok_or(TokenError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(TokenError::Malformed);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Missing);
    }
    Ok(token)
}

/// Resolve an `Authorization` header value to a user id.
pub async fn resolve_bearer(
    db: &DatabaseConnection,
    header: Option<&str>,
) -> Result<Uuid, TokenError> {
    let token = bearer_token(header)?;
    resolve_token(db, token).await
}

/// Revoke a token by id. Returns false when it was unknown or already revoked.
pub async fn revoke_token(db: &DatabaseConnection, id: Uuid) -> Result<bool, TokenError> {
    let revoked = repository::token::revoke(db, id).await?;
    if revoked {
        tracing::info!(token_id = %id, "Revoked API token");
    }
    Ok(revoked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn generated_tokens_are_prefixed_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_eq!(a.len(), TOKEN_PREFIX.len() + 64);
        assert_ne!(a, b);
    }

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token(Some("Bearer lh_abc")).unwrap(), "lh_abc");
        assert_eq!(bearer_token(Some("bearer  lh_abc ")).unwrap(), "lh_abc");
        assert!(matches!(bearer_token(None), Err(TokenError::Missing)));
        assert!(matches!(
            bearer_token(Some("Basic dXNlcg==")),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(bearer_token(Some("lh_abc")), Err(TokenError::Malformed)));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let err = resolve_token(&db, "lh_nope").await.unwrap_err();
        assert!(matches!(err, TokenError::Invalid));

        let sql = format!("{:?}", db.into_transaction_log());
        assert!(sql.contains(&hash_token("lh_nope")));
        assert!(!sql.contains("lh_nope\""));
    }
}
