//! LINE Bot Server - Main Entry Point
//!
//! Serves the echo bot on the configured callback path.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use lb_server::bot::EchoBot;
use lb_server::messaging::LineMessagingClient;
use lb_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lb_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        callback_path = %config.callback_path,
        "Starting LINE bot server"
    );

    // Messaging API client
    let client = LineMessagingClient::new(&config)?;
    info!(api = %config.api_base_url, "Messaging API client ready");

    // Build application state
    let state = api::AppState::new(config.clone(), Arc::new(client), Arc::new(EchoBot));

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
