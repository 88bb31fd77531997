//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router, plus a recording `MessagingApi` so no test talks to the real platform.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lb_server::api::{create_router, AppState};
use lb_server::bot::{BotHandler, EchoBot};
use lb_server::config::Config;
use lb_server::messaging::{ApiError, Content, MessagingApi, ReplyMessage, UserProfile};
use lb_server::webhooks::handlers::SIGNATURE_HEADER;
use lb_server::webhooks::SignatureValidator;
use tower::ServiceExt;

// ============================================================================
// Recording messaging API
// ============================================================================

/// In-memory `MessagingApi` that records replies instead of sending them.
#[derive(Default)]
pub struct RecordingApi {
    replies: Mutex<Vec<ReplyMessage>>,
}

impl RecordingApi {
    pub fn replies(&self) -> Vec<ReplyMessage> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingApi for RecordingApi {
    async fn reply_message(&self, reply: &ReplyMessage) -> Result<(), ApiError> {
        self.replies.lock().unwrap().push(reply.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            display_name: "Test User".into(),
            user_id: user_id.into(),
            picture_url: None,
            status_message: None,
            language: Some("en".into()),
        })
    }

    async fn get_message_content(&self, _message_id: &str) -> Result<Content, ApiError> {
        Ok(Content::from_bytes(
            Some("image/jpeg".into()),
            &b"\xff\xd8\xff"[..],
        ))
    }
}

// ============================================================================
// TestApp
// ============================================================================

/// Full router wired to a [`RecordingApi`].
pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub api: Arc<RecordingApi>,
}

impl TestApp {
    /// Echo bot with the default test configuration.
    pub fn new() -> Self {
        Self::with_handler(Config::default_for_test(), Arc::new(EchoBot))
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_handler(config, Arc::new(EchoBot))
    }

    pub fn with_handler(config: Config, handler: Arc<dyn BotHandler>) -> Self {
        let api = Arc::new(RecordingApi::default());
        let state = AppState::new(config.clone(), api.clone(), handler);
        Self {
            router: create_router(state),
            config,
            api,
        }
    }

    /// Build a request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router.
    pub async fn oneshot(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    /// A callback request signed with the configured channel secret.
    pub fn signed_callback(&self, body: &str) -> Request<Body> {
        let signature = SignatureValidator::new(&self.config.channel_secret).sign(body.as_bytes());
        Self::request(Method::POST, &self.config.callback_path)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

/// Collect a response body as JSON.
pub async fn body_to_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A one-event callback body carrying a text message.
pub fn text_callback(reply_token: &str, text: &str) -> String {
    serde_json::json!({
        "destination": "Ubot",
        "events": [{
            "type": "message",
            "mode": "active",
            "timestamp": 1462629479859_i64,
            "source": { "type": "user", "userId": "U4af4980629" },
            "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
            "deliveryContext": { "isRedelivery": false },
            "replyToken": reply_token,
            "message": { "id": "444573844083572737", "type": "text", "text": text }
        }]
    })
    .to_string()
}
