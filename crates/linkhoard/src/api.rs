//! JSON HTTP API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/items` | Save one URL (`{"url": ...}`) |
//! | `POST` | `/api/items/bulk` | Save up to 100 URLs (`{"urls": [...]}`) |
//! | `POST` | `/api/sync/github-stars` | Import stars (`{"githubUsername": ...}`) |
//! | `GET`  | `/health` | Health check |
//!
//! Every `/api` route requires `Authorization: Bearer <token>`.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "..." } }
//! ```
//!
//! Codes: `bad_request` (400), `unauthorized` (401), `not_found` (404),
//! `conflict` (409), `rate_limited` (429), `upstream` (502), `internal` (500).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::item::Model as ItemModel;
use crate::github::GitHubError;
use crate::ingest::{BulkReport, IngestError, IngestOutcome, Ingestor};
use crate::sync::{StarsSyncResult, StarsSyncer, SyncError};
use crate::token::{self, TokenError};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    db: Arc<DatabaseConnection>,
    ingestor: Ingestor,
    stars: StarsSyncer,
}

impl AppState {
    pub fn new(ingestor: Ingestor, stars: StarsSyncer) -> Self {
        Self {
            db: Arc::clone(ingestor.db()),
            ingestor,
            stars,
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/items", post(handle_create_item))
        .route("/api/items/bulk", post(handle_bulk_create))
        .route("/api/sync/github-stars", post(handle_sync_stars))
        .with_state(state)
}

// ============ Errors ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

/// An error rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "internal server error",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Repository(ref e) => Self::internal(e),
            other => Self::new(StatusCode::UNAUTHORIZED, "unauthorized", other.to_string()),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            e if e.is_validation() => Self::bad_request(e.to_string()),
            IngestError::Tweet { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "upstream", err.to_string())
            }
            e => Self::internal(&e),
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::GitHub(GitHubError::InvalidUsername(_)) => {
                Self::bad_request(err.to_string())
            }
            SyncError::GitHub(GitHubError::NotFound { .. }) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            SyncError::GitHub(GitHubError::RateLimited { .. }) => {
                Self::new(StatusCode::TOO_MANY_REQUESTS, "rate_limited", err.to_string())
            }
            SyncError::GitHub(_) => Self::new(StatusCode::BAD_GATEWAY, "upstream", err.to_string()),
            SyncError::AlreadyRunning { .. } => {
                Self::new(StatusCode::CONFLICT, "conflict", err.to_string())
            }
            SyncError::Repository(ref e) => Self::internal(e),
        }
    }
}

// ============ Authentication ============

/// The user a request's bearer token resolves to.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let user_id = token::resolve_bearer(&state.db, header).await?;
        Ok(AuthUser(user_id))
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============ POST /api/items ============

#[derive(Deserialize)]
struct CreateItemRequest {
    url: String,
}

#[derive(Serialize)]
struct CreateItemResponse {
    duplicate: bool,
    item: ItemModel,
}

/// 201 with the new item, or 200 with the existing one for a duplicate.
async fn handle_create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateItemResponse>), ApiError> {
    let Json(request) = body?;
    let outcome = state.ingestor.create_item(&request.url, user_id).await?;
    let status = match outcome {
        IngestOutcome::Created(_) => StatusCode::CREATED,
        IngestOutcome::Duplicate(_) => StatusCode::OK,
    };
    Ok((
        status,
        Json(CreateItemResponse {
            duplicate: outcome.is_duplicate(),
            item: outcome.into_item(),
        }),
    ))
}

// ============ POST /api/items/bulk ============

/// Entries may be any JSON value; anything but a string fails on its own
/// line of the report instead of rejecting the batch.
#[derive(Deserialize)]
struct BulkCreateRequest {
    urls: Vec<serde_json::Value>,
}

impl BulkCreateRequest {
    fn into_urls(self) -> Vec<Option<String>> {
        self.urls
            .into_iter()
            .map(|entry| match entry {
                serde_json::Value::String(url) => Some(url),
                _ => None,
            })
            .collect()
    }
}

async fn handle_bulk_create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<BulkCreateRequest>, JsonRejection>,
) -> Result<Json<BulkReport>, ApiError> {
    let Json(request) = body?;
    let urls = request.into_urls();
    let report = state.ingestor.bulk_create(&urls, user_id).await?;
    Ok(Json(report))
}

// ============ POST /api/sync/github-stars ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SyncStarsRequest {
    github_username: String,
}

async fn handle_sync_stars(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<SyncStarsRequest>, JsonRejection>,
) -> Result<Json<StarsSyncResult>, ApiError> {
    let Json(request) = body?;
    let result = state
        .stars
        .sync_github_stars(user_id, request.github_username.trim(), None)
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    use super::*;
    use crate::entity::api_token::Model as TokenModel;
    use crate::github::GitHubClient;
    use crate::http::MockTransport;
    use crate::services::{MetadataFetcher, PageMetadata, ServiceError, Tweet, TweetFetcher};

    struct NoServices;

    #[async_trait]
    impl MetadataFetcher for NoServices {
        async fn fetch_metadata(&self, _url: &str) -> Result<PageMetadata, ServiceError> {
            Ok(PageMetadata::default())
        }
    }

    #[async_trait]
    impl TweetFetcher for NoServices {
        async fn fetch_tweet(&self, id: &str) -> Result<Tweet, ServiceError> {
            Err(ServiceError::Decode(format!("no tweet {id}")))
        }
    }

    fn state(db: DatabaseConnection) -> AppState {
        let db = Arc::new(db);
        let ingestor = Ingestor::new(Arc::clone(&db), Arc::new(NoServices), Arc::new(NoServices));
        let client = GitHubClient::new(Arc::new(MockTransport::new()), None);
        AppState::new(ingestor, StarsSyncer::new(db, client))
    }

    fn authorized_db(user_id: Uuid) -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![token_row(user_id)]])
            .append_exec_results([sea_orm::MockExecResult {
                rows_affected: 1,
                last_insert_id: 0,
            }])
            .into_connection()
    }

    fn token_row(user_id: Uuid) -> TokenModel {
        TokenModel {
            id: Uuid::new_v4(),
            user_id,
            token_hash: token::hash_token("lh_test"),
            label: "test".to_string(),
            created_at: Utc::now().fixed_offset(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn health_needs_no_auth() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let response = router(state(db))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Sqlite).into_connection());
        let ingestor = Ingestor::new(Arc::clone(&db), Arc::new(NoServices), Arc::new(NoServices));
        let client = GitHubClient::new(Arc::new(MockTransport::new()), None);
        let app = router(AppState::new(ingestor, StarsSyncer::new(Arc::clone(&db), client)));

        let response = app
            .oneshot(
                Request::post("/api/items")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"url":"https://example.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let db = Arc::into_inner(db).expect("router dropped");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn invalid_github_username_is_bad_request() {
        let response = router(state(authorized_db(Uuid::new_v4())))
            .oneshot(
                Request::post("/api/sync/github-stars")
                    .header("authorization", "Bearer lh_test")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"githubUsername":"bad--name"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_entries_that_are_not_strings_fail_individually() {
        let response = router(state(authorized_db(Uuid::new_v4())))
            .oneshot(
                Request::post("/api/items/bulk")
                    .header("authorization", "Bearer lh_test")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"urls":[42,{"u":1},null,["x"]]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["created"], 0);
        assert_eq!(report["failed"], 4);
        assert_eq!(report["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn bulk_request_maps_non_strings_to_missing_urls() {
        let request: BulkCreateRequest =
            serde_json::from_str(r#"{"urls":["https://example.com/a",42,{"u":1},true]}"#).unwrap();
        assert_eq!(
            request.into_urls(),
            vec![Some("https://example.com/a".to_string()), None, None, None]
        );
    }

    #[test]
    fn sync_errors_map_to_statuses() {
        let cases = [
            (
                SyncError::GitHub(GitHubError::NotFound {
                    username: "ghost".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                SyncError::GitHub(GitHubError::RateLimited {
                    reset_at: Utc::now(),
                }),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                SyncError::GitHub(GitHubError::Upstream {
                    status: 500,
                    message: "boom".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                SyncError::AlreadyRunning {
                    user_id: Uuid::new_v4(),
                },
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn ingest_validation_is_bad_request() {
        let err = ApiError::from(IngestError::Validation("urls must not be empty".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
