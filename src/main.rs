//! Server binary: load configuration, connect the store, serve until
//! shutdown.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tera::Tera;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use packscan::config::Config;
use packscan::server::{AppState, build_router};
use packscan::storage::MongoOrderStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    // The process cannot serve requests without its store; failing to reach
    // it at startup is fatal.
    let store = MongoOrderStore::connect(&config.mongo)
        .await
        .context("unable to connect to the order store")?;

    let templates = Tera::new("templates/**/*.html").context("unable to compile templates")?;

    let addr = format!("{}:{}", config.http.hostname, config.http.port);
    let state = AppState::new(Arc::new(store), templates, config);
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("unable to bind {addr}"))?;
    tracing::info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
