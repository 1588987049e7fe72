use std::path::Path;

use console::style;
use linkhoard::Ingestor;
use linkhoard::ingest::{BulkItemResult, BulkReport, BulkStatus, MAX_BULK_URLS};
use tabled::{Table, Tabled, settings::Style};
use uuid::Uuid;

use crate::OutputFormat;

#[derive(Debug, Tabled)]
struct ImportRow {
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl From<&BulkItemResult> for ImportRow {
    fn from(r: &BulkItemResult) -> Self {
        Self {
            url: r.url.clone().unwrap_or_default(),
            status: match r.status {
                BulkStatus::Created => "created",
                BulkStatus::Duplicate => "duplicate",
                BulkStatus::Failed => "failed",
            },
            item: r.item_id.map(|id| id.to_string()).unwrap_or_default(),
            error: r.error.clone().unwrap_or_default(),
        }
    }
}

/// One URL per line. Blank lines and `#` comments are ignored.
fn read_urls(contents: &str) -> Vec<Option<String>> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Some(line.to_string()))
        .collect()
}

fn merge(total: &mut BulkReport, chunk: BulkReport) {
    total.created += chunk.created;
    total.duplicates += chunk.duplicates;
    total.failed += chunk.failed;
    total.results.extend(chunk.results);
}

/// Import every URL in `path`, in batches of [`MAX_BULK_URLS`].
pub(crate) async fn handle_import(
    ingestor: &Ingestor,
    path: &Path,
    user_id: Uuid,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let urls = read_urls(&contents);
    if urls.is_empty() {
        println!("No URLs found in {}.", path.display());
        return Ok(());
    }

    let mut report = BulkReport::default();
    for (i, chunk) in urls.chunks(MAX_BULK_URLS).enumerate() {
        tracing::debug!(batch = i + 1, size = chunk.len(), "Importing batch");
        merge(&mut report, ingestor.bulk_create(chunk, user_id).await?);
    }

    match output {
        OutputFormat::Table => {
            let rows: Vec<ImportRow> = report.results.iter().map(ImportRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!(
                "{} {} created, {} duplicates, {} failed",
                style("✓").green().bold(),
                report.created,
                report.duplicates,
                report.failed
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_urls_skips_blanks_and_comments() {
        let urls = read_urls(
            "https://a.example\n\n  # saved from chrome\n  https://b.example  \nnot a url\n",
        );
        assert_eq!(
            urls,
            vec![
                Some("https://a.example".to_string()),
                Some("https://b.example".to_string()),
                Some("not a url".to_string()),
            ]
        );
    }

    #[test]
    fn merge_sums_counts_and_keeps_order() {
        let result = |url: &str, status| BulkItemResult {
            url: Some(url.to_string()),
            status,
            item_id: None,
            error: None,
        };
        let mut total = BulkReport::default();
        merge(
            &mut total,
            BulkReport {
                created: 1,
                duplicates: 1,
                failed: 0,
                results: vec![
                    result("https://a.example", BulkStatus::Created),
                    result("https://b.example", BulkStatus::Duplicate),
                ],
            },
        );
        merge(
            &mut total,
            BulkReport {
                created: 0,
                duplicates: 0,
                failed: 1,
                results: vec![result("bad", BulkStatus::Failed)],
            },
        );

        assert_eq!((total.created, total.duplicates, total.failed), (1, 1, 1));
        let urls: Vec<_> = total.results.iter().map(|r| r.url.as_deref()).collect();
        assert_eq!(
            urls,
            vec![Some("https://a.example"), Some("https://b.example"), Some("bad")]
        );
    }

    #[test]
    fn row_renders_failed_entry() {
        let row = ImportRow::from(&BulkItemResult {
            url: None,
            status: BulkStatus::Failed,
            item_id: None,
            error: Some("Invalid URL".to_string()),
        });
        assert_eq!(row.status, "failed");
        assert_eq!(row.url, "");
        assert_eq!(row.error, "Invalid URL");
    }
}
