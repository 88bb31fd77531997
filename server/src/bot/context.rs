//! Handler Context
//!
//! Per-callback state handed to every [`BotHandler`](super::BotHandler) call.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::messaging::{ApiError, Content, MessagingApi, UserProfile};

/// What a handler can see and call while processing one callback.
#[derive(Clone)]
pub struct BotContext {
    api: Arc<dyn MessagingApi>,
    destination: Option<String>,
    headers: HeaderMap,
}

impl BotContext {
    pub fn new(api: Arc<dyn MessagingApi>) -> Self {
        Self {
            api,
            destination: None,
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn with_destination(mut self, destination: Option<String>) -> Self {
        self.destination = destination;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Messaging API client for calls beyond the returned reply.
    pub fn api(&self) -> &dyn MessagingApi {
        self.api.as_ref()
    }

    /// Bot user ID the callback was addressed to.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Headers of the inbound callback request.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up the profile of the user behind an event.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.api.get_profile(user_id).await
    }

    /// Download the content of an image, video, audio or file message.
    pub async fn get_message_content(&self, message_id: &str) -> Result<Content, ApiError> {
        self.api.get_message_content(message_id).await
    }
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}
