//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{
    bot::BotHandler,
    config::{Config, HEALTH_PATH},
    messaging::MessagingApi,
    webhooks::{self, CallbackParser, SignatureValidator},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Signature check and decoding for inbound callbacks
    pub parser: Arc<CallbackParser>,
    /// Messaging API used for replies and lookups
    pub api: Arc<dyn MessagingApi>,
    /// The bot
    pub handler: Arc<dyn BotHandler>,
}

impl AppState {
    /// Create new application state. The parser is keyed with the configured
    /// channel secret.
    #[must_use]
    pub fn new(config: Config, api: Arc<dyn MessagingApi>, handler: Arc<dyn BotHandler>) -> Self {
        let parser = CallbackParser::new(SignatureValidator::new(&config.channel_secret));
        Self {
            config: Arc::new(config),
            parser: Arc::new(parser),
            api,
            handler,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let callback_path = state.config.callback_path.clone();
    let max_body_size = state.config.max_body_size;

    Router::new()
        .route(&callback_path, post(webhooks::handlers::callback))
        .route(HEALTH_PATH, get(health))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}
