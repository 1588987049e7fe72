use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Item store failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// An update matched no row.
    #[error("Record not found: {context}")]
    NotFound { context: String },
}

impl RepositoryError {
    pub fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFound {
            context: format!("id={}", id),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
