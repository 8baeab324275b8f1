use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use student_records::config::ServerConfig;
use student_records::server::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    if let Some(public_dir) = &config.public_dir {
        tracing::info!("Serving static files from {}", public_dir.display());
    }
    if config.legacy_write_status {
        tracing::info!("Write failures will be reported with status 200");
    }

    let state = AppState::from_config(&config)
        .await
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    tracing::info!("Data directory: {}", state.store.dir().display());
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("Server is running at http://{}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
