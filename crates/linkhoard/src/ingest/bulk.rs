//! Bulk ingestion.

use serde::Serialize;
use uuid::Uuid;

use crate::link::looks_like_http_url;

use super::{IngestError, IngestOutcome, Ingestor, Result};

/// Most URLs accepted by one [`Ingestor::bulk_create`] call.
pub const MAX_BULK_URLS: usize = 100;

const INVALID_URL: &str = "Invalid URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStatus {
    Created,
    Duplicate,
    Failed,
}

/// Outcome for one input entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemResult {
    /// The entry as submitted.
    pub url: Option<String>,
    pub status: BulkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a bulk call. `results[i]` describes input entry `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub created: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub results: Vec<BulkItemResult>,
}

impl BulkReport {
    fn record(&mut self, result: BulkItemResult) {
        match result.status {
            BulkStatus::Created => self.created += 1,
            BulkStatus::Duplicate => self.duplicates += 1,
            BulkStatus::Failed => self.failed += 1,
        }
        self.results.push(result);
    }
}

/// Reject batches that are empty or over [`MAX_BULK_URLS`].
pub fn validate_batch_size(len: usize) -> Result<()> {
    if len == 0 {
        return Err(IngestError::Validation(
            "urls must contain at least one entry".to_string(),
        ));
    }
    if len > MAX_BULK_URLS {
        return Err(IngestError::Validation(format!(
            "urls must contain at most {MAX_BULK_URLS} entries, got {len}"
        )));
    }
    Ok(())
}

impl Ingestor {
    /// Ingest a batch of URLs one at a time, in input order.
    ///
    /// `None` entries and strings that are not http(s) URLs are reported as
    /// failed without aborting the batch. Only the batch size check can fail
    /// the whole call.
    pub async fn bulk_create(&self, urls: &[Option<String>], user_id: Uuid) -> Result<BulkReport> {
        validate_batch_size(urls.len())?;

        let mut report = BulkReport::default();
        for entry in urls {
            let result = self.bulk_entry(entry.as_deref(), user_id).await;
            report.record(result);
        }

        tracing::info!(
            %user_id,
            created = report.created,
            duplicates = report.duplicates,
            failed = report.failed,
            "Bulk ingestion finished"
        );
        Ok(report)
    }

    async fn bulk_entry(&self, entry: Option<&str>, user_id: Uuid) -> BulkItemResult {
        let url = entry.map(str::to_string);
        let Some(raw) = entry.filter(|raw| looks_like_http_url(raw)) else {
            return BulkItemResult {
                url,
                status: BulkStatus::Failed,
                item_id: None,
                error: Some(INVALID_URL.to_string()),
            };
        };

        match self.create_item(raw, user_id).await {
            Ok(IngestOutcome::Created(item)) => BulkItemResult {
                url,
                status: BulkStatus::Created,
                item_id: Some(item.id),
                error: None,
            },
            Ok(IngestOutcome::Duplicate(item)) => BulkItemResult {
                url,
                status: BulkStatus::Duplicate,
                item_id: Some(item.id),
                error: None,
            },
            Err(IngestError::InvalidUrl(_)) => BulkItemResult {
                url,
                status: BulkStatus::Failed,
                item_id: None,
                error: Some(INVALID_URL.to_string()),
            },
            Err(e) => {
                tracing::warn!(url = raw, error = %e, "Bulk entry failed");
                BulkItemResult {
                    url,
                    status: BulkStatus::Failed,
                    item_id: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
