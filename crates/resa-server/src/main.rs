//! Resa booking server - REST backend for flight reservations.

mod api;
mod config;
mod error;
mod loops;
mod seed;
mod state;

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resa_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting resa booking server...");

    let config = Config::from_env();
    let port = config.server_port;
    let state = Arc::new(AppState::new(config.clone()));
    seed::seed(&state);

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);
    tokio::spawn(loops::hold_expiry::run_hold_expiry_loop(
        state.clone(),
        shutdown_tx.subscribe(),
    ));

    let app = api::routes(&config)
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
            }
            tracing::info!("Shutting down");
            let _ = shutdown_tx.send(());
        })
        .await?;

    Ok(())
}
