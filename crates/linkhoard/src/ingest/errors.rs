use thiserror::Error;

use crate::link::LinkError;
use crate::repository::RepositoryError;
use crate::services::ServiceError;

/// Errors from ingesting a single URL or a batch.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request itself is malformed (empty batch, batch over the cap).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] LinkError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Failed to fetch post {id}: {source}")]
    Tweet {
        id: String,
        #[source]
        source: ServiceError,
    },

    #[error("No post id found in {0}")]
    MissingPostId(String),
}

impl IngestError {
    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IngestError::Validation(_) | IngestError::InvalidUrl(_) | IngestError::MissingPostId(_)
        )
    }
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
