use console::style;
use linkhoard::db;
use linkhoard::migration::{Migrator, MigratorTrait};

use crate::MigrateAction;

pub(crate) async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = db::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            let pending = Migrator::get_pending_migrations(&db).await?.len();
            if pending == 0 {
                println!("{} Schema is up to date.", style("✓").green().bold());
                return Ok(());
            }
            Migrator::up(&db, None).await?;
            println!(
                "{} Applied {} migration(s).",
                style("✓").green().bold(),
                pending
            );
        }
        MigrateAction::Down => {
            Migrator::down(&db, Some(1)).await?;
            println!("{} Rolled back the last migration.", style("✓").green().bold());
        }
        MigrateAction::Status => {
            Migrator::status(&db).await?;
        }
        MigrateAction::Fresh => {
            println!(
                "{} Dropping all linkhoard tables and recreating the schema...",
                style("⚠").yellow().bold()
            );
            Migrator::fresh(&db).await?;
            println!("{} Fresh schema ready.", style("✓").green().bold());
        }
    }

    tracing::debug!("Migration command finished");
    Ok(())
}
