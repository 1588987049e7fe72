use console::style;
use linkhoard::token;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::TokenAction;
use crate::config::Config;

pub(crate) async fn handle_token(
    action: TokenAction,
    db: &DatabaseConnection,
    config: &Config,
    user_flag: Option<Uuid>,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TokenAction::Create { label } => {
            let user_id = config.user_id(user_flag)?;
            let issued = token::issue_token(db, user_id, &label).await?;
            println!(
                "{} Created token '{}' ({})",
                style("✓").green().bold(),
                style(&issued.record.label).cyan(),
                issued.record.id
            );
            println!();
            println!("  {}", style(&issued.token).bold());
            println!();
            println!("Store it now, it will not be shown again.");
        }
        TokenAction::Revoke { id } => {
            if token::revoke_token(db, id).await? {
                println!("{} Revoked token {}", style("✓").green().bold(), id);
            } else {
                println!(
                    "{} No active token with id {}",
                    style("⚠").yellow().bold(),
                    id
                );
            }
        }
    }

    Ok(())
}
