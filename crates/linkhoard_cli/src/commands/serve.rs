use console::style;
use linkhoard::api::{self, AppState};
use linkhoard::{Ingestor, StarsSyncer};
use tokio::net::TcpListener;

use crate::shutdown::shutdown_signal;

/// Serve the JSON API on `bind` until Ctrl+C or SIGTERM.
pub(crate) async fn handle_serve(
    ingestor: Ingestor,
    stars: StarsSyncer,
    bind: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = api::router(AppState::new(ingestor, stars));
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "API server listening");
    if console::Term::stdout().is_term() {
        println!(
            "{} Listening on {}",
            style("✓").green().bold(),
            style(format!("http://{addr}")).cyan()
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}
