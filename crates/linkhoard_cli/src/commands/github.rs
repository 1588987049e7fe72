use std::sync::Arc;

use linkhoard::StarsSyncer;
use uuid::Uuid;

use crate::GithubAction;
use crate::progress::ProgressReporter;

pub(crate) async fn handle_github(
    action: GithubAction,
    syncer: &StarsSyncer,
    user_id: Uuid,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GithubAction::Stars { username } => sync_stars(syncer, &username, user_id).await,
    }
}

async fn sync_stars(
    syncer: &StarsSyncer,
    username: &str,
    user_id: Uuid,
) -> Result<(), Box<dyn std::error::Error>> {
    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();

    // The reporter prints the summary; only failures need handling here.
    let result = syncer
        .sync_github_stars(user_id, username, Some(&callback))
        .await;
    reporter.finish();
    result?;

    Ok(())
}
