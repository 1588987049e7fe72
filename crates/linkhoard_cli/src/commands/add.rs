use console::style;
use linkhoard::{IngestOutcome, Ingestor};
use uuid::Uuid;

/// Save a single URL for `user_id`.
pub(crate) async fn handle_add(
    ingestor: &Ingestor,
    url: &str,
    user_id: Uuid,
) -> Result<(), Box<dyn std::error::Error>> {
    match ingestor.create_item(url, user_id).await? {
        IngestOutcome::Created(item) => {
            println!(
                "{} Saved {} '{}'",
                style("✓").green().bold(),
                item.item_type,
                style(&item.title).cyan()
            );
            println!("  {}", item.url);
            if let Some(context) = &item.context {
                println!("  {}", style(context).dim());
            }
        }
        IngestOutcome::Duplicate(item) => {
            println!(
                "{} Already saved: '{}' ({})",
                style("⚠").yellow().bold(),
                style(&item.title).cyan(),
                item.id
            );
        }
    }

    Ok(())
}
