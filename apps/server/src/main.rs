//! Medibook - Web Server Entry Point

use anyhow::Context;
use medibook::{api::create_router, config::Config, logging, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first to get logging settings
    let config = Config::load().context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Medibook server"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    tracing::info!(
        listen_addr = %addr,
        currency = %config.payment.currency,
        run_migrations = config.database.run_migrations,
        "Configuration loaded"
    );

    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;

    let app = create_router(state);

    tracing::info!("Medibook listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server terminated unexpectedly");
        return Err(e.into());
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
/// Docker sends SIGTERM, while Ctrl+C sends SIGINT
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler; using Ctrl+C only");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    let sigint = tokio::signal::ctrl_c();

    tokio::select! {
        _ = sigint => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

/// Wait for shutdown signal (SIGINT only on non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
