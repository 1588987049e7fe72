use console::Term;

/// Resolves when the process receives Ctrl+C or SIGTERM.
///
/// Used with `axum::serve(..).with_graceful_shutdown` so in-flight requests
/// finish before the server exits.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if Term::stdout().is_term() {
        eprintln!("\nShutdown requested, finishing in-flight requests...");
    } else {
        tracing::warn!("Shutdown requested, finishing in-flight requests");
    }
}
